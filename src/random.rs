use rand::{rngs::StdRng, Rng, SeedableRng};

pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;
}

pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }

        let value = self.values[self.pos];
        self.pos += 1;
        if self.pos == self.values.len() {
            self.pos = 0;
        }
        value
    }
}
