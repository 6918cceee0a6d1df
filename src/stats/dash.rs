//! Dash detection: one record per `DASH` span, with dash-dance marking for
//! dash → turn → dash patterns.

use crate::action_state::ActionState;
use crate::frame::Data;

use super::common::{just_entered_state, just_exited_state};
use super::types::DashData;

pub fn compute(frames: &[Data]) -> Vec<DashData> {
	let mut dashes: Vec<DashData> = Vec::new();
	let mut current: Option<DashData> = None;

	for i in 2..frames.len() {
		let post = &frames[i].post;
		let state = post.state;
		let prev_state = frames[i - 1].post.state;
		let prev_prev_state = frames[i - 2].post.state;

		if just_entered_state(ActionState::DASH, state, prev_state) {
			let mut dash = DashData {
				frame_index: i,
				start_pos: post.position.x,
				end_pos: post.position.x,
				direction: post.direction,
				stocks_remaining: post.stocks,
				is_dashdance: false,
			};

			// dash -> turn -> dash marks both dashes as a dash-dance
			if prev_state == ActionState::TURN && prev_prev_state == ActionState::DASH {
				dash.is_dashdance = true;
				if let Some(last) = dashes.last_mut() {
					last.is_dashdance = true;
				}
			}

			current = Some(dash);
		}

		if just_exited_state(ActionState::DASH, state, prev_state) {
			if let Some(mut dash) = current.take() {
				dash.end_pos = post.position.x;
				dashes.push(dash);
			}
		}
	}

	dashes
}
