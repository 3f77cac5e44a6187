use serde::{Deserialize, Serialize};

/// One recorded tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample<S> {
    pub t: f64,
    pub state: S,
}

/// Ordered history of model states, as read back by a driver loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory<S> {
    samples: Vec<Sample<S>>,
}

impl<S> Default for Trajectory<S> {
    fn default() -> Self {
        Trajectory { samples: Vec::new() }
    }
}

impl<S: Copy> Trajectory<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Trajectory {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, t: f64, state: S) {
        debug_assert!(
            self.samples.last().is_none_or(|s| s.t <= t),
            "samples must be recorded in time order"
        );
        self.samples.push(Sample { t, state });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample<S>> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample<S>> {
        self.samples.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample<S>> {
        self.samples.iter()
    }

    /// Projects one scalar channel out of the recorded states.
    pub fn channel<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(&S) -> f64,
    {
        self.samples.iter().map(|s| f(&s.state)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_channel() {
        let mut traj = Trajectory::new();
        traj.record(0.0, (1.0, 2.0));
        traj.record(0.1, (3.0, 4.0));

        assert_eq!(traj.len(), 2);
        assert_eq!(traj.channel(|s| s.1), vec![2.0, 4.0]);
        assert_eq!(traj.iter().map(|s| s.t).collect::<Vec<_>>(), vec![0.0, 0.1]);
        assert_eq!(traj.last().map(|s| s.state), Some((3.0, 4.0)));
    }

    #[test]
    fn test_serializes_as_samples() {
        let mut traj = Trajectory::new();
        traj.record(0.5, 7.0_f64);
        let json = serde_json::to_string(&traj).unwrap();
        assert_eq!(json, r#"{"samples":[{"t":0.5,"state":7.0}]}"#);
    }
}
