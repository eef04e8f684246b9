use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

pub type HashMap<K, V> = FxHashMap<K, V>;

pub type HashSet<K> = FxHashSet<K>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronKey(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SynapseRef(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
