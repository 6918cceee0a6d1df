//! Wavedash detection: an airdodge into the ground, with or without the
//! preceding jumpsquat (the latter being a waveland).

use crate::action_state::ActionState;
use crate::buttons::Physical;
use crate::frame::Data;

use super::types::WavedashData;

const TRIGGER_WINDOW: usize = 5;
const JUMPSQUAT_WINDOW: usize = 5;

/// One pass over a player's frames. A record is emitted for every entry
/// into `LAND_FALL_SPECIAL` that has an L or R press within the trigger
/// window; the jumpsquat lookback then distinguishes wavedash from
/// waveland.
pub fn compute(frames: &[Data]) -> Vec<WavedashData> {
	let mut wavedashes = Vec::new();

	for i in 1..frames.len() {
		let state = frames[i].post.state;
		let prev_state = frames[i - 1].post.state;

		if state != ActionState::LAND_FALL_SPECIAL || prev_state == ActionState::LAND_FALL_SPECIAL
		{
			continue;
		}

		// find the airdodge input: first L/R press within the window
		let mut airdodge_frames = None;
		for j in 0..TRIGGER_WINDOW.min(i + 1) {
			let held = frames[i - j].pre.buttons.physical;
			if held.contains(Physical::R) || held.contains(Physical::L) {
				airdodge_frames = Some(j);
				break;
			}
		}
		let Some(j) = airdodge_frames else {
			continue;
		};

		let mut wavedash = WavedashData::new(i, j as u8, frames[i].pre.joystick);

		// from the trigger, look further back for the jumpsquat
		for k in 0..JUMPSQUAT_WINDOW.min(i + 1 - j) {
			if frames[i - j - k].post.state == ActionState::KNEE_BEND {
				wavedash.trigger_frame = k as u8;
				wavedash.waveland = false;
				break;
			}
		}

		wavedashes.push(wavedash);
	}

	wavedashes
}
