//! Driver-side control: input profiles and closed-loop helpers that feed
//! the vehicle models one tick at a time.

pub mod pid;
pub mod profiles;
pub mod speed_hold;
pub mod steering;

pub use pid::{PidConfig, PidController};
pub use profiles::{InclineProfile, Profile, SteeringSchedule, ThrottleRamp, loop_speed};
pub use speed_hold::{SpeedHold, SpeedHoldConfig};
pub use steering::SteeringTracker;
