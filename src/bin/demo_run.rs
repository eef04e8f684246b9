use log::info;
use spikeplay::{demo, random::SeededSource};

#[path = "../scenario_params.rs"]
mod scenario_params;

const FRAME_DT: f64 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let mut network = demo::create_demo_network(
        800.0,
        600.0,
        scenario_params::get_scenario_params(),
        Box::new(SeededSource::new(0)),
    )
    .unwrap();

    // same kick the interactive version gives on start
    network.set_potential(0, 1.0).unwrap();

    let num_frames = 60 * 60;
    let mut spike_counts = vec![0usize; network.neuron_count()];
    let mut delivered_count = 0usize;
    let mut checksum = 0.0;

    for _ in 0..num_frames {
        let step_result = network.advance(FRAME_DT);
        delivered_count += step_result.delivered_count;

        for id in step_result.fired_ids {
            spike_counts[id] += 1;
            checksum += step_result.t * (id + 1) as f64;
        }
    }

    info!("simulated {:.1} ms", network.now());

    println!("spikes per neuron:");
    for (id, count) in spike_counts.iter().enumerate() {
        println!("...N{}: {}", id + 1, count);
    }
    println!("delivered transmissions: {}", delivered_count);
    println!("spike checksum: {:.3}", checksum);

    let in_flight: usize = network
        .synapses()
        .iter()
        .map(|synapse| synapse.pending_count())
        .sum();
    println!("transmissions in flight: {}", in_flight);

    println!("{}", network.export_json().unwrap());
}
