use serde::{Deserialize, Serialize};
use simple_error::SimpleError;

/// Simulation constants. Times are in milliseconds, rates are per second of simulated time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimParams {
    pub threshold: f64,
    pub refractory_period: f64,
    pub decay_rate: f64,
    pub synaptic_strength: f64,
    pub noise_level: f64,
    pub spontaneous_rate: f64,
    pub speed_multiplier: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            refractory_period: 500.0,
            decay_rate: 0.05,
            synaptic_strength: 0.5,
            noise_level: 0.02,
            spontaneous_rate: 0.01,
            speed_multiplier: 1.0,
        }
    }
}

impl SimParams {
    pub fn max_potential(&self) -> f64 {
        self.threshold * 1.5
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refractory_period: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synaptic_strength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spontaneous_rate: Option<f64>,
}

impl ParamsPatch {
    pub fn from_params(params: &SimParams) -> Self {
        Self {
            threshold: Some(params.threshold),
            refractory_period: Some(params.refractory_period),
            decay_rate: Some(params.decay_rate),
            synaptic_strength: Some(params.synaptic_strength),
            noise_level: Some(params.noise_level),
            spontaneous_rate: Some(params.spontaneous_rate),
        }
    }

    pub fn apply_to(&self, params: &mut SimParams) {
        let fields = [
            (self.threshold, &mut params.threshold),
            (self.refractory_period, &mut params.refractory_period),
            (self.decay_rate, &mut params.decay_rate),
            (self.synaptic_strength, &mut params.synaptic_strength),
            (self.noise_level, &mut params.noise_level),
            (self.spontaneous_rate, &mut params.spontaneous_rate),
        ];

        for (patch_value, target) in fields {
            if let Some(value) = patch_value {
                *target = value;
            }
        }
    }
}

pub fn validate_sim_params(params: &SimParams) -> Result<(), SimpleError> {
    let all_fields = [
        ("threshold", params.threshold),
        ("refractoryPeriod", params.refractory_period),
        ("decayRate", params.decay_rate),
        ("synapticStrength", params.synaptic_strength),
        ("noiseLevel", params.noise_level),
        ("spontaneousRate", params.spontaneous_rate),
        ("speedMultiplier", params.speed_multiplier),
    ];

    for (name, value) in all_fields {
        if !value.is_finite() {
            return Err(SimpleError::new(format!("{} must be finite", name)));
        }
    }

    if params.threshold <= 0.0 {
        return Err(SimpleError::new("threshold must be strictly positive"));
    }

    if params.refractory_period <= 0.0 {
        return Err(SimpleError::new("refractoryPeriod must be strictly positive"));
    }

    if params.decay_rate < 0.0 {
        return Err(SimpleError::new("decayRate must not be negative"));
    }

    if params.synaptic_strength < 0.0 {
        return Err(SimpleError::new("synapticStrength must not be negative"));
    }

    if params.noise_level < 0.0 {
        return Err(SimpleError::new("noiseLevel must not be negative"));
    }

    if params.spontaneous_rate < 0.0 {
        return Err(SimpleError::new("spontaneousRate must not be negative"));
    }

    if params.speed_multiplier <= 0.0 {
        return Err(SimpleError::new("speedMultiplier must be strictly positive"));
    }

    Ok(())
}

pub fn validate_synapse_attributes(strength: f64, delay: f64) -> Result<(), SimpleError> {
    if !(strength > 0.0 && strength <= 1.0) {
        return Err(SimpleError::new(format!(
            "synapse strength must be in (0, 1], got {}",
            strength
        )));
    }

    if !delay.is_finite() || delay < 0.0 {
        return Err(SimpleError::new(format!(
            "synapse delay must be finite and not negative, got {}",
            delay
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn valid_params() {
        assert!(validate_sim_params(&SimParams::default()).is_ok());
    }

    #[test]
    fn zero_threshold() {
        let mut params = SimParams::default();
        params.threshold = 0.0;
        let result = validate_sim_params(&params);

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().as_str(),
            "threshold must be strictly positive"
        );
    }

    #[test]
    fn negative_decay_rate() {
        let mut params = SimParams::default();
        params.decay_rate = -0.1;
        let result = validate_sim_params(&params);

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().as_str(),
            "decayRate must not be negative"
        );
    }

    #[test]
    fn nan_noise_level() {
        let mut params = SimParams::default();
        params.noise_level = f64::NAN;
        let result = validate_sim_params(&params);

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().as_str(), "noiseLevel must be finite");
    }

    #[test]
    fn zero_speed_multiplier() {
        let mut params = SimParams::default();
        params.speed_multiplier = 0.0;
        let result = validate_sim_params(&params);

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().as_str(),
            "speedMultiplier must be strictly positive"
        );
    }

    #[test]
    fn zero_rates_are_valid() {
        let mut params = SimParams::default();
        params.decay_rate = 0.0;
        params.noise_level = 0.0;
        params.spontaneous_rate = 0.0;
        assert!(validate_sim_params(&params).is_ok());
    }

    #[test]
    fn zero_refractory_period() {
        let mut params = SimParams::default();
        params.refractory_period = 0.0;
        let result = validate_sim_params(&params);

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().as_str(),
            "refractoryPeriod must be strictly positive"
        );

        params.refractory_period = -10.0;
        assert!(validate_sim_params(&params).is_err());
    }

    #[test]
    fn synapse_attributes() {
        assert!(validate_synapse_attributes(1.0, 0.0).is_ok());
        assert!(validate_synapse_attributes(0.3, 250.0).is_ok());
        assert!(validate_synapse_attributes(0.0, 100.0).is_err());
        assert!(validate_synapse_attributes(1.2, 100.0).is_err());
        assert!(validate_synapse_attributes(f64::NAN, 100.0).is_err());
        assert!(validate_synapse_attributes(0.5, -1.0).is_err());
        assert!(validate_synapse_attributes(0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn patch_keeps_missing_fields() {
        let mut params = SimParams::default();
        params.noise_level = 0.3;

        let patch = ParamsPatch {
            threshold: Some(2.0),
            decay_rate: Some(0.0),
            ..ParamsPatch::default()
        };
        patch.apply_to(&mut params);

        assert_approx_eq!(f64, params.threshold, 2.0);
        assert_approx_eq!(f64, params.decay_rate, 0.0);
        assert_approx_eq!(f64, params.noise_level, 0.3);
        assert_approx_eq!(f64, params.refractory_period, 500.0);
    }

    #[test]
    fn partial_params_from_yaml() {
        let params: SimParams = serde_yaml::from_str("threshold: 1.5\nnoiseLevel: 0.0\n").unwrap();

        assert_approx_eq!(f64, params.threshold, 1.5);
        assert_approx_eq!(f64, params.noise_level, 0.0);
        assert_approx_eq!(f64, params.decay_rate, SimParams::default().decay_rate);
        assert_approx_eq!(f64, params.max_potential(), 2.25);
    }
}
