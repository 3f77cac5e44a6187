//! Vehicle motion models and their building blocks.

pub mod bicycle;
pub mod driveline;
pub mod engine;
pub mod longitudinal;
pub mod road_load;
pub mod tire;

pub use bicycle::{BicycleInput, BicycleParams, BicycleState, KinematicBicycle, SteeringCommand};
pub use driveline::Driveline;
pub use engine::EngineMap;
pub use longitudinal::{
    LongitudinalForces, LongitudinalInput, LongitudinalModel, LongitudinalParams,
    LongitudinalState,
};
pub use road_load::RoadLoad;
pub use tire::{LongitudinalTire, SaturationPolicy};
