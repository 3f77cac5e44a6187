//! Shared simulation plumbing: the model contract, fixed-step integration
//! helpers, trajectory recording and the error type.

pub mod error;
pub mod integrators;
pub mod trajectory;
pub mod traits;

pub use error::{SimError, SimResult};
pub use integrators::{FixedTimestepRunner, euler};
pub use trajectory::{Sample, Trajectory};
pub use traits::{Model, SimContext, SteppedModel};
