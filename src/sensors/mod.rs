//! Sensor subsystem — battery divider sampling and fusion-output frames.
//!
//! Neither module classifies anything; they only turn raw driver data
//! into the value types the [`classify`](crate::classify) core consumes.

pub mod battery;
pub mod fusion;
