//! Vehicle lifecycle: state machine and virtual-stock arrival estimation

pub mod arrival;
pub mod manager;

pub use arrival::{ArrivalEstimator, FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use manager::{OrderPlacement, VehicleLifecycleManager};
