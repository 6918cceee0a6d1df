//! Hit detection with DI/SDI/ASDI analysis: one record per contiguous
//! hitlag span that came with a percent increase and wasn't a shield hit.

use log::warn;

use crate::action_state as range;
use crate::frame::{Data, Position};
use crate::game::SlippiVersion;

use super::common::{
	get_angle, get_joystick_region, get_post_di_angle, get_post_di_velocity, is_in_hitlag,
	is_shielding, just_took_damage, JoystickRegion,
};
use super::types::TakeHitData;

/// Maximum knockback rotation from DI, in degrees.
const MAX_DI_DEGREES: f32 = 18.0;

pub fn compute(frames: &[Data], opponent: &[Data], version: SlippiVersion) -> Vec<TakeHitData> {
	if !version.gte(2, 0, 0) {
		warn!(
			"no take-hit computation: requires replay version 2.0.0, got {}",
			version
		);
		return Vec::new();
	}
	if !version.gte(3, 5, 0) {
		warn!(
			"partial take-hit computation: DI and knockback require replay version 3.5.0, got {}",
			version
		);
	}

	let mut take_hits = Vec::new();
	let mut active: Option<TakeHitData> = None;

	for i in 1..frames.len() {
		let curr = &frames[i];
		let prev = &frames[i - 1];

		// Shield hits have hitlag too but no DI, so a span that begins
		// while shielding is ignored.
		let shielding_prev = is_shielding(prev.post.state);
		let in_hitlag = is_in_hitlag(curr.post.flags()) && !shielding_prev;
		let was_in_hitlag = is_in_hitlag(prev.post.flags()) && !shielding_prev;

		if !in_hitlag {
			if was_in_hitlag {
				if let Some(mut hit) = active.take() {
					finish(&mut hit, curr, prev, opponent.get(i), version);
					take_hits.push(hit);
				}
			}
			continue;
		}

		if !was_in_hitlag && just_took_damage(curr.post.damage, prev.post.damage) {
			let kb = curr.post.knockback_velocity();
			let mut hit = TakeHitData {
				frame_index: i,
				last_hit_by: None,
				state_before_hit: prev.post.state,
				grounded: curr.post.airborne().map(|a| !a),
				crouch_cancel: Some(
					range::SQUAT_START <= prev.post.state && prev.post.state < range::SQUAT_END,
				),
				percent: curr.post.damage,
				start_position: curr.post.position,
				end_position: None,
				hitlag_frames: 0,
				stick_regions_during_hitlag: Vec::new(),
				sdi_inputs: Vec::new(),
				asdi: None,
				di_stick: None,
				kb_velocity: kb,
				kb_angle: kb.map(|kb| get_angle(kb.x, kb.y) as f32),
				final_kb_velocity: None,
				final_kb_angle: None,
				di_efficacy: None,
			};
			// the entry frame itself counts toward the hitlag span
			hit.stick_regions_during_hitlag
				.push(get_joystick_region(curr.pre.joystick));
			hit.hitlag_frames += 1;
			active = Some(hit);
			continue;
		}

		if let Some(hit) = active.as_mut() {
			hit.stick_regions_during_hitlag
				.push(get_joystick_region(curr.pre.joystick));
			hit.hitlag_frames += 1;
		}
	}

	take_hits
}

/// Closes out a hitlag span on the first post-hitlag frame: effective DI
/// stick, post-DI knockback, ASDI and SDI extraction.
fn finish(
	hit: &mut TakeHitData,
	curr: &Data,
	prev: &Data,
	opponent: Option<&Data>,
	version: SlippiVersion,
) {
	hit.end_position = Some(prev.post.position);
	hit.last_hit_by = opponent.and_then(|o| o.post.last_attack_landed);

	// Effective DI stick: a pure cardinal zeroes the off axis, the deadzone
	// zeroes both, diagonals keep both.
	let stick = curr.pre.joystick;
	let effective = match get_joystick_region(stick) {
		JoystickRegion::Up | JoystickRegion::Down => Position { x: 0.0, y: stick.y },
		JoystickRegion::Left | JoystickRegion::Right => Position { x: stick.x, y: 0.0 },
		JoystickRegion::DeadZone => Position { x: 0.0, y: 0.0 },
		_ => stick,
	};
	hit.di_stick = Some(effective);

	if version.gte(3, 5, 0) {
		if let (Some(kb), Some(kb_angle)) = (hit.kb_velocity, hit.kb_angle) {
			if kb.x != 0.0 && kb.y != 0.0 {
				let final_angle = get_post_di_angle(effective, kb) as f32;
				let efficacy = ((final_angle - kb_angle).abs() / MAX_DI_DEGREES * 100.0)
					.min(100.0);
				// truncate, don't round
				hit.di_efficacy = Some((efficacy * 100.0).trunc() / 100.0);
				hit.final_kb_angle = Some(final_angle);
			} else {
				hit.final_kb_angle = Some(kb_angle);
			}
			hit.final_kb_velocity = hit
				.final_kb_angle
				.map(|angle| get_post_di_velocity(angle as f64, kb));
		}
	}

	// ASDI reads the c-stick first, then the control stick.
	let cstick = get_joystick_region(curr.pre.cstick);
	hit.asdi = match cstick {
		JoystickRegion::DeadZone => Some(get_joystick_region(curr.pre.joystick)),
		region => Some(region),
	};

	hit.find_valid_sdi();
}
