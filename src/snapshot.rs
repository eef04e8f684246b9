use serde::{Deserialize, Serialize};

use crate::{error::Result, params::ParamsPatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub neurons: Vec<NeuronRecord>,
    pub synapses: Vec<SynapseRecord>,
    #[serde(default)]
    pub params: ParamsPatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronRecord {
    pub x: f64,
    pub y: f64,
    pub id: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynapseRecord {
    pub from: usize,
    pub to: usize,
    pub strength: f64,
    pub delay: f64,
}

impl NetworkSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
