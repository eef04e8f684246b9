use spikeplay::params::SimParams;

pub fn get_scenario_params() -> SimParams {
    let params_yaml_str = r#"
threshold: 1.0
refractoryPeriod: 500.0
decayRate: 0.05
synapticStrength: 0.8
noiseLevel: 0.02
spontaneousRate: 0.5
speedMultiplier: 1.0
"#;

    serde_yaml::from_str(params_yaml_str).unwrap()
}
