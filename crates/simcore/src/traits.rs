use serde::{Deserialize, Serialize};

/// Simulation clock handed to drivers and input profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}

impl SimContext {
    pub fn new(dt: f64) -> Self {
        SimContext { dt, t: 0.0 }
    }

    /// Context for the tick after this one.
    pub fn advanced(self) -> Self {
        SimContext {
            dt: self.dt,
            t: self.t + self.dt,
        }
    }
}

pub trait Model {
    /// Restore the fixed initial state. Parameters are left untouched.
    fn reset(&mut self);
}

/// A model advanced by a single fixed sample interval per call.
pub trait SteppedModel: Model {
    type Input: Copy;
    type State: Copy;

    fn sample_time(&self) -> f64;

    fn state(&self) -> &Self::State;

    fn step(&mut self, input: Self::Input);
}
