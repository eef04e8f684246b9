pub fn get_decay_factor(decay_rate: f64, dt: f64) -> f64 {
    1.0 - decay_rate * dt
}

pub fn get_transmission_progress(now: f64, delivery_t: f64, delay: f64) -> f64 {
    if delay <= 0.0 {
        return 1.0;
    }

    ((now - (delivery_t - delay)) / delay).clamp(0.0, 1.0)
}
