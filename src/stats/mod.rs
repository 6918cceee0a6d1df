//! Event detectors over a player's reconstructed frames.
//!
//! Each detector is a single forward pass with a small rolling state,
//! appending typed records into the player's [`types::Stats`] bag. The
//! [`computer::StatsComputer`] resolves players and drives the passes.

pub mod common;
pub mod computer;
pub mod dash;
pub mod l_cancel;
pub mod shield_drop;
pub mod take_hit;
pub mod tech;
pub mod types;
pub mod wavedash;

pub use computer::{ComputeOptions, Player, PlayerId, StatsComputer, StatsError};
pub use types::{
	project_rows, DashData, LCancelData, LCancels, ShieldDropData, Stats, StatsHeader, TakeHitData,
	TechData, WavedashData,
};
