//! Parser and stats engine for [Slippi](https://github.com/project-slippi/project-slippi)
//! replay files (`.slp`).
//!
//! The decoder reconstructs one [`frame::Frame`] per in-game frame (with
//! rollback resolution), and the [`stats`] layer runs a library of event
//! detectors (wavedashes, dashes, tech options, hits taken, L-cancels,
//! shield drops) over a player's frames.
//!
//! ```no_run
//! let game = slp_stats::game::Game::open("game.slp", false)?;
//! println!("{:?}", game.start.stage);
//! println!("{} frames", game.frames.len());
//! # Ok::<(), slp_stats::parse::ParseError>(())
//! ```

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// Logs `info!` exactly once per distinct (type, value) pair. Replays from
/// newer recorders can legally contain enum values we don't know about, so
/// unknown values are preserved rather than rejected, and mentioned once.
pub(crate) fn log_unknown(kind: &'static str, value: i64) {
	static SEEN: OnceLock<Mutex<HashSet<(&'static str, i64)>>> = OnceLock::new();
	let mut seen = SEEN
		.get_or_init(|| Mutex::new(HashSet::new()))
		.lock()
		.unwrap_or_else(|e| e.into_inner());
	if seen.insert((kind, value)) {
		log::info!("unknown {}: {}", kind, value);
	}
}

/// Defines an "open" enum: a newtype over an integer, with named constants
/// for the known values. Unknown values survive decoding untouched, which is
/// what keeps old readers working on new replays.
macro_rules! pseudo_enum {
	($name:ident : $type:ty { $( $value:literal => $variant:ident ),* $(,)? }) => {
		#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
		#[serde(transparent)]
		pub struct $name(pub $type);

		impl $name {
			$( pub const $variant: $name = $name($value); )*

			/// Constructor that logs once per unknown value.
			pub fn new(value: $type) -> $name {
				let v = $name(value);
				if v.name().is_none() {
					crate::log_unknown(stringify!($name), value as i64);
				}
				v
			}

			pub fn name(&self) -> Option<&'static str> {
				match self.0 {
					$( $value => Some(stringify!($variant)), )*
					_ => None,
				}
			}
		}

		impl std::fmt::Debug for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				match self.name() {
					Some(name) => write!(f, "{}:{}", self.0, name),
					_ => write!(f, "{}", self.0),
				}
			}
		}

		impl From<$type> for $name {
			fn from(value: $type) -> $name {
				$name::new(value)
			}
		}
	}
}

/// Defines a bitmask newtype with named bits. Unknown bits are preserved.
macro_rules! pseudo_bitmask {
	($name:ident : $type:ty { $( $value:expr => $variant:ident ),* $(,)? }) => {
		#[derive(Copy, Clone, PartialEq, Eq, Hash, serde::Serialize)]
		#[serde(transparent)]
		pub struct $name(pub $type);

		impl $name {
			$( pub const $variant: $name = $name($value); )*

			pub fn contains(self, other: $name) -> bool {
				self.0 & other.0 == other.0
			}
		}

		impl std::ops::BitAnd for $name {
			type Output = Self;
			fn bitand(self, rhs: Self) -> Self {
				$name(self.0 & rhs.0)
			}
		}

		impl std::ops::BitOr for $name {
			type Output = Self;
			fn bitor(self, rhs: Self) -> Self {
				$name(self.0 | rhs.0)
			}
		}

		impl std::fmt::Debug for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				write!(f, "{}", self.0)?;
				let mut named = false;
				$( if self.contains($name::$variant) && $value != 0 {
					write!(f, "{}{}", if named { "|" } else { ":" }, stringify!($variant))?;
					named = true;
				} )*
				let _ = named;
				Ok(())
			}
		}
	}
}

pub mod action_state;
pub mod attack;
pub mod buttons;
pub mod character;
pub mod frame;
pub mod game;
pub mod ground;
pub mod item;
pub mod metadata;
pub mod parse;
pub mod stage;
pub mod stats;
pub mod triggers;
pub mod ubjson;
