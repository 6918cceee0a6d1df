//! Tech detection: one record per contiguous span of tech-family states
//! (downed states plus tech animations), classified as the span evolves.

use crate::action_state::ActionState;
use crate::frame::{Data, Direction};
use crate::ground::get_ground;
use crate::stage::Stage;

use super::common::{get_tech_type, is_damaged, is_tech_state, TechType};
use super::types::TechData;

struct TechState {
	tech: TechData,
	/// Facing at the first frame of the span; the reported direction can
	/// flip mid-roll, which would misclassify the roll.
	facing_at_start: Direction,
	last_state: ActionState,
}

pub fn compute(frames: &[Data], opponent: &[Data], stage: Stage) -> Vec<TechData> {
	let mut techs = Vec::new();
	let mut active: Option<TechState> = None;

	for i in 1..frames.len() {
		let post = &frames[i].post;
		let state = post.state;
		let was_teching = is_tech_state(frames[i - 1].post.state);

		if !is_tech_state(state) {
			if was_teching {
				if let Some(mut done) = active.take() {
					if is_damaged(state) {
						done.tech.was_punished = true;
					}
					techs.push(done.tech);
				}
			}
			continue;
		}

		let Some(opponent_post) = opponent.get(i).map(|d| &d.post) else {
			continue;
		};

		if !was_teching {
			active = Some(TechState {
				tech: TechData {
					frame_index: i,
					tech_type: None,
					position: post.position,
					ground: post.ground().map(|id| get_ground(stage, id)),
					is_on_platform: post.position.y > 5.0,
					is_missed_tech: false,
					towards_center: None,
					towards_opponent: None,
					jab_reset: None,
					last_hit_by: opponent_post.last_attack_landed,
					was_punished: false,
				},
				facing_at_start: post.direction,
				// sentinel that can't match a real state
				last_state: ActionState(u16::MAX),
			});
		}

		let Some(tech_state) = active.as_mut() else {
			continue;
		};

		// classification only advances on state change
		if state == tech_state.last_state {
			continue;
		}
		tech_state.last_state = state;

		let Some(tech_type) = get_tech_type(state, tech_state.facing_at_start) else {
			continue;
		};

		match tech_type {
			TechType::MissedTech => {
				tech_state.tech.is_missed_tech = true;
				tech_state.tech.jab_reset = Some(false);
			}
			TechType::JabReset => {
				tech_state.tech.is_missed_tech = true;
				tech_state.tech.jab_reset = Some(true);
			}
			TechType::TechLeft
			| TechType::TechRight
			| TechType::MissedTechRollLeft
			| TechType::MissedTechRollRight => {
				if matches!(
					tech_type,
					TechType::MissedTechRollLeft | TechType::MissedTechRollRight
				) {
					tech_state.tech.is_missed_tech = true;
				}
				let sign = tech_type.movement_sign();
				let player_x = post.position.x;
				let opponent_dx = opponent_post.position.x - player_x;
				tech_state.tech.towards_center = Some(player_x * sign < 0.0);
				tech_state.tech.towards_opponent = Some(opponent_dx * sign > 0.0);
			}
			// tech in place, getup attack, wall/ceiling techs
			_ => {}
		}

		tech_state.tech.tech_type = Some(tech_type);
	}

	techs
}
