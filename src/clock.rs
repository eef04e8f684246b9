pub const MS_PER_SECOND: f64 = 1000.0;

/// Simulation time in milliseconds. Only the network advances it, by the step size given in
/// seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    now: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn advance(&mut self, dt: f64) -> f64 {
        debug_assert!(dt >= 0.0, "negative step size: {}", dt);
        self.now += dt * MS_PER_SECOND;
        self.now
    }
}
