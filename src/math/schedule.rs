/// Exponential cooling from `max_temperature` towards `min_temperature`
///
/// `T(i) = max * exp(k * i / steps)` with `k = -ln(max / min)`, so the
/// temperature reaches `min` exactly at `i = steps` and is just above it on
/// the last executed step.
#[derive(Clone, Copy, Debug)]
pub struct ExponentialSchedule {
    max_temperature: f64,
    decay: f64,
    steps: usize,
}

impl ExponentialSchedule {
    /// Precompute the decay rate for a run of `steps` steps
    ///
    /// Temperatures must be positive; `AnnealConfig::validate` enforces this.
    pub fn new(max_temperature: f64, min_temperature: f64, steps: usize) -> Self {
        Self {
            max_temperature,
            decay: -(max_temperature / min_temperature).ln(),
            steps,
        }
    }

    /// Temperature at step `step`
    pub fn temperature(&self, step: usize) -> f64 {
        if self.steps == 0 {
            return self.max_temperature;
        }
        self.max_temperature * (self.decay * step as f64 / self.steps as f64).exp()
    }
}

/// Metropolis probability of accepting an energy change `delta` at `temperature`
///
/// Non-positive deltas are always accepted.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta <= 0.0 {
        1.0
    } else {
        (-delta / temperature).exp()
    }
}
