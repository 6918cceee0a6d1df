//! L-cancel detection: one record per frame on which the game reports a
//! success or failure, with attribution of the trigger press that caused
//! (or missed) it.

use log::warn;

use crate::action_state::ActionState;
use crate::attack::Attack;
use crate::frame::{Data, LCancel};
use crate::game::SlippiVersion;
use crate::ground::get_ground;
use crate::stage::Stage;

use super::common::{is_fastfalling, is_in_hitlag, just_input_l_cancel};
use super::types::{LCancelData, LCancels};

/// Base lookback for the trigger press. Hitlag freezes the timing window,
/// so every hitlag frame encountered extends it by one.
const LOOKBACK_WINDOW: usize = 15;
/// How far to look for a late press on a failed l-cancel.
const LATE_PRESS_WINDOW: usize = 5;

/// Maps the aerial-attack state (or its landing-lag state, for attacks cut
/// short by landing) to the attack that landed.
fn attack_for_state(state: ActionState) -> Option<Attack> {
	use ActionState as S;
	match state {
		S::ATTACK_AIR_N | S::LANDING_AIR_N => Some(Attack::NAIR),
		S::ATTACK_AIR_F | S::LANDING_AIR_F => Some(Attack::FAIR),
		S::ATTACK_AIR_B | S::LANDING_AIR_B => Some(Attack::BAIR),
		S::ATTACK_AIR_HI | S::LANDING_AIR_HI => Some(Attack::UAIR),
		S::ATTACK_AIR_LW | S::LANDING_AIR_LW => Some(Attack::DAIR),
		_ => None,
	}
}

pub fn compute(frames: &[Data], stage: Stage, version: SlippiVersion) -> LCancels {
	let mut l_cancels = LCancels::default();

	if !version.gte(2, 0, 0) {
		warn!(
			"no l-cancel computation: requires replay version 2.0.0, got {}",
			version
		);
		return l_cancels;
	}

	for i in 0..frames.len() {
		let Some(status) = frames[i].post.l_cancel() else {
			continue;
		};
		if status != LCancel::SUCCESSFUL && status != LCancel::UNSUCCESSFUL {
			continue;
		}

		// backward scan for the press, extending the window by one per
		// hitlag frame encountered
		let mut trigger_input_frame: Option<i32> = None;
		let mut during_hitlag = false;
		let mut hitlag_seen = 0;
		let mut j = 0;
		while j < LOOKBACK_WINDOW + hitlag_seen && j < i {
			let frame = &frames[i - j];
			if is_in_hitlag(frame.post.flags()) {
				hitlag_seen += 1;
			}
			if just_input_l_cancel(frame, &frames[i - j - 1]) {
				trigger_input_frame = Some(-(j as i32));
				during_hitlag = is_in_hitlag(frame.post.flags());
				break;
			}
			j += 1;
		}

		// a failure with no press in range may have been a late press
		if trigger_input_frame.is_none() && status == LCancel::UNSUCCESSFUL {
			for j in 1..=LATE_PRESS_WINDOW {
				if i + j >= frames.len() {
					break;
				}
				if just_input_l_cancel(&frames[i + j], &frames[i + j - 1]) {
					trigger_input_frame = Some(j as i32);
					break;
				}
			}
		}

		let move_state = match i {
			0 => frames[i].post.state,
			_ => frames[i - 1].post.state,
		};

		l_cancels.append(LCancelData {
			frame_index: i,
			l_cancel: status == LCancel::SUCCESSFUL,
			attack: attack_for_state(move_state),
			trigger_input_frame,
			during_hitlag,
			fastfall: i > 0 && is_fastfalling(frames[i - 1].post.flags()),
			ground: frames[i].post.ground().map(|id| get_ground(stage, id)),
		});
	}

	l_cancels
}
