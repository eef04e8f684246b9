use crate::{
    params::SimParams,
    types::{NeuronKey, SynapseRef},
    util::get_transmission_progress,
};

const ACTIVITY_DECAY_PER_FRAME: f64 = 0.95;
const FRAMES_PER_SECOND: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTransmission {
    delivery_t: f64,
    payload: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Delivery {
    pub count: usize,
    pub payload: f64,
}

#[derive(Debug, Clone)]
pub struct Synapse {
    pub(crate) syn_ref: SynapseRef,
    pub(crate) from: NeuronKey,
    pub(crate) to: NeuronKey,
    strength: f64,
    delay: f64,
    activity: f64,
    pending: Vec<PendingTransmission>,
}

impl Synapse {
    pub(crate) fn new(
        syn_ref: SynapseRef,
        from: NeuronKey,
        to: NeuronKey,
        strength: f64,
        delay: f64,
    ) -> Self {
        Self {
            syn_ref,
            from,
            to,
            strength,
            delay,
            activity: 0.0,
            pending: Vec::new(),
        }
    }

    pub fn syn_ref(&self) -> SynapseRef {
        self.syn_ref
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// 1 right after a transmission, fading by 5% per 1/60 s.
    pub fn activity(&self) -> f64 {
        self.activity
    }

    pub(crate) fn decay_activity(&mut self, dt: f64) {
        self.activity *= ACTIVITY_DECAY_PER_FRAME.powf(dt * FRAMES_PER_SECOND);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_progress(&self, now: f64) -> impl Iterator<Item = f64> + '_ {
        self.pending.iter().map(move |transmission| {
            get_transmission_progress(now, transmission.delivery_t, self.delay)
        })
    }

    pub fn transmit(&mut self, params: &SimParams, now: f64) {
        self.pending.push(PendingTransmission {
            delivery_t: now + self.delay,
            payload: self.strength * params.synaptic_strength,
        });
        self.activity = 1.0;
    }

    pub fn deliver_due(&mut self, now: f64) -> Delivery {
        let mut delivery = Delivery::default();

        self.pending.retain(|transmission| {
            if transmission.delivery_t <= now {
                delivery.count += 1;
                delivery.payload += transmission.payload;
                false
            } else {
                true
            }
        });

        delivery
    }
}
