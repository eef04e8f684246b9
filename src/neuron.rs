use crate::{
    params::SimParams,
    random::RandomSource,
    types::{NeuronKey, Position},
    util::get_decay_factor,
};

const GLOW_DURATION: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeuronState {
    Resting,
    Refractory,
}

#[derive(Debug, Clone)]
pub struct Neuron {
    pub(crate) id: usize,
    pub(crate) key: NeuronKey,
    position: Position,
    potential: f64,
    last_fired_at: Option<f64>,
    refractory_until: f64,
}

impl Neuron {
    pub(crate) fn new(id: usize, key: NeuronKey, position: Position) -> Self {
        Self {
            id,
            key,
            position,
            potential: 0.0,
            last_fired_at: None,
            refractory_until: 0.0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn potential(&self) -> f64 {
        self.potential
    }

    pub fn last_fired_at(&self) -> Option<f64> {
        self.last_fired_at
    }

    pub fn refractory_until(&self) -> f64 {
        self.refractory_until
    }

    pub fn is_refractory(&self, now: f64) -> bool {
        now < self.refractory_until
    }

    pub fn state(&self, now: f64) -> NeuronState {
        if self.is_refractory(now) {
            NeuronState::Refractory
        } else {
            NeuronState::Resting
        }
    }

    pub fn potential_ratio(&self, threshold: f64) -> f64 {
        (self.potential / threshold).min(1.0)
    }

    pub fn glow(&self, now: f64) -> f64 {
        match self.last_fired_at {
            Some(last_fired_at) => (1.0 - (now - last_fired_at) / GLOW_DURATION).max(0.0),
            None => 0.0,
        }
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn set_potential(&mut self, potential: f64, params: &SimParams) {
        self.potential = potential.clamp(0.0, params.max_potential());
    }

    pub(crate) fn receive(&mut self, payload: f64) {
        self.potential += payload;
    }

    pub fn update_potential(
        &mut self,
        params: &SimParams,
        dt: f64,
        now: f64,
        rng: &mut dyn RandomSource,
    ) -> bool {
        if self.is_refractory(now) {
            self.potential = 0.0;
            return false;
        }

        if rng.next_uniform() < params.spontaneous_rate * dt {
            self.potential += params.synaptic_strength * 0.5;
        }

        self.potential += (rng.next_uniform() - 0.5) * params.noise_level * dt;
        self.potential *= get_decay_factor(params.decay_rate, dt);

        let fired = self.potential >= params.threshold;
        if fired {
            self.fire(params, now);
        }

        self.potential = self.potential.clamp(0.0, params.max_potential());

        fired
    }

    pub fn fire(&mut self, params: &SimParams, now: f64) {
        self.last_fired_at = Some(now);
        self.refractory_until = now + params.refractory_period;
        self.potential = 0.0;
    }
}
