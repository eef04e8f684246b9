use simple_error::SimpleError;
use thiserror::Error;

use crate::types::SynapseRef;

pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Reference,
    Config,
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no neuron with id {0}")]
    UnknownNeuron(usize),

    #[error("no synapse {0:?}")]
    UnknownSynapse(SynapseRef),

    #[error("self-loop synapses are not supported (neuron {0})")]
    SelfLoop(usize),

    #[error("synapse {synapse_index} refers to neuron index {neuron_index}, but the snapshot has {num_neurons} neurons")]
    DanglingSynapse {
        synapse_index: usize,
        neuron_index: usize,
        num_neurons: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] SimpleError),
}

impl NetworkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetworkError::Parse(_) => ErrorKind::Parse,
            NetworkError::UnknownNeuron(_)
            | NetworkError::UnknownSynapse(_)
            | NetworkError::SelfLoop(_)
            | NetworkError::DanglingSynapse { .. } => ErrorKind::Reference,
            NetworkError::Config(_) => ErrorKind::Config,
        }
    }
}
