use log::debug;

use crate::{Model, SimContext, SteppedModel, Trajectory};

/// Explicit (forward) Euler update of a single state variable.
///
/// `dydt` must be evaluated on the pre-step state.
#[inline]
pub fn euler(y: f64, dydt: f64, dt: f64) -> f64 {
    y + dydt * dt
}

/// Fixed-timestep wrapper that accumulates elapsed time and
/// runs as many model steps as fit into it.
#[derive(Debug, Clone)]
pub struct FixedTimestepRunner<M: SteppedModel> {
    pub model: M,
    accumulator: f64,
    ticks: u64,
}

impl<M: SteppedModel> FixedTimestepRunner<M> {
    pub fn new(model: M) -> Self {
        FixedTimestepRunner {
            model,
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Number of model steps taken since construction or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time covered by the steps taken so far.
    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.model.sample_time()
    }

    pub fn context(&self) -> SimContext {
        SimContext {
            dt: self.model.sample_time(),
            t: self.time(),
        }
    }

    /// Advances the model with `input` held constant, running as many fixed
    /// sub-steps as fit into `elapsed`.
    /// Returns the remaining time that didn't fit into a full step.
    pub fn advance(&mut self, elapsed: f64, input: M::Input) -> f64 {
        let fixed_dt = self.model.sample_time();
        self.accumulator += elapsed;

        // Slack so accumulated rounding doesn't drop a whole step.
        let eps = fixed_dt * 1e-9;
        while self.accumulator + eps >= fixed_dt {
            self.model.step(input);
            self.accumulator -= fixed_dt;
            self.ticks += 1;
        }
        if self.accumulator < 0.0 {
            self.accumulator = 0.0;
        }

        self.accumulator
    }

    /// Runs exactly `n` steps, querying `input` with the context of each tick.
    pub fn run<F>(&mut self, n: usize, mut input: F)
    where
        F: FnMut(&SimContext, &M::State) -> M::Input,
    {
        for _ in 0..n {
            let ctx = self.context();
            let u = input(&ctx, self.model.state());
            self.model.step(u);
            self.ticks += 1;
        }
    }

    /// Like [`run`](Self::run), recording the state before the first step
    /// and after every step.
    pub fn run_recorded<F>(&mut self, n: usize, input: F) -> Trajectory<M::State>
    where
        F: FnMut(&SimContext, &M::State) -> M::Input,
    {
        let mut input = input;
        let mut trajectory = Trajectory::with_capacity(n + 1);
        trajectory.record(self.time(), *self.model.state());
        for _ in 0..n {
            self.run(1, &mut input);
            trajectory.record(self.time(), *self.model.state());
        }
        trajectory
    }
}

impl<M: SteppedModel> Model for FixedTimestepRunner<M> {
    fn reset(&mut self) {
        debug!("runner reset after {} ticks", self.ticks);
        self.model.reset();
        self.accumulator = 0.0;
        self.ticks = 0;
    }
}
