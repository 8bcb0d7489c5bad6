//! Used-device pricing (trade-in estimate).
//!
//! This crate contains the buy-back rules as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod estimate;

pub use estimate::{
    estimate, Diagnostics, AVERAGE_CONDITION_FACTOR, BATTERY_PENALTY, CAMERA_FACTOR, FACE_ID_FACTOR,
    MIN_ESTIMATE, PIVOT_FACTOR, SCREEN_FACTOR,
};
