pub mod clock;
pub mod demo;
pub mod error;
pub mod network;
pub mod neuron;
pub mod params;
pub mod random;
pub mod snapshot;
pub mod synapse;
pub mod types;

mod util;
