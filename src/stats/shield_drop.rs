//! Shield-drop detection: a direct transition from a guard-family state
//! into the platform drop state.

use crate::action_state::ActionState;
use crate::frame::Data;
use crate::ground::get_ground;
use crate::stage::Stage;

use super::types::ShieldDropData;

/// Lookback for attributing a drop to shield-stun release.
const SHIELDSTUN_WINDOW: usize = 8;

/// Guard states a shield drop can come from. `GUARD_OFF` is deliberately
/// absent: dropping shield and then falling through a platform is not a
/// shield drop.
fn was_shielding(state: ActionState) -> bool {
	state == ActionState::GUARD
		|| state == ActionState::GUARD_ON
		|| state == ActionState::GUARD_REFLECT
		|| state == ActionState::GUARD_SET_OFF
}

pub fn compute(frames: &[Data], stage: Stage) -> Vec<ShieldDropData> {
	let mut shield_drops = Vec::new();

	for i in 1..frames.len() {
		let state = frames[i].post.state;
		let prev_state = frames[i - 1].post.state;

		if state != ActionState::PASS || !was_shielding(prev_state) {
			continue;
		}

		// distance from the last shield-stun frame, when there is one close
		// enough to call this an out-of-shieldstun drop
		let mut oo_shieldstun_frame = None;
		for j in 1..=SHIELDSTUN_WINDOW.min(i) {
			if frames[i - j].post.state == ActionState::GUARD_SET_OFF {
				oo_shieldstun_frame = Some(j as u32);
				break;
			}
		}

		shield_drops.push(ShieldDropData {
			frame_index: i,
			ground: frames[i].post.ground().map(|id| get_ground(stage, id)),
			oo_shieldstun_frame,
		});
	}

	shield_drops
}
