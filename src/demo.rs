use crate::{
    error::Result,
    network::Network,
    params::SimParams,
    random::RandomSource,
    types::Position,
};

const DEMO_LAYOUT: [(f64, f64); 6] = [
    (0.25, 0.30),
    (0.75, 0.22),
    (0.80, 0.60),
    (0.56, 0.82),
    (0.18, 0.75),
    (0.45, 0.45),
];

const DEMO_CONNECTIONS: [(usize, usize); 8] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 0),
    (1, 5),
    (5, 3),
    (0, 5),
];

pub fn create_demo_network(
    width: f64,
    height: f64,
    params: SimParams,
    rng: Box<dyn RandomSource>,
) -> Result<Network> {
    let mut network = Network::new(params, rng)?;
    populate_demo(&mut network, width, height)?;
    Ok(network)
}

pub fn populate_demo(network: &mut Network, width: f64, height: f64) -> Result<()> {
    network.clear();

    for (x, y) in DEMO_LAYOUT {
        network.add_neuron(Position::new(width * x, height * y));
    }

    for (from_id, to_id) in DEMO_CONNECTIONS {
        network.add_synapse(from_id, to_id, None, None)?;
    }

    Ok(())
}
