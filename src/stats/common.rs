//! State predicates and input/physics helpers shared by the stat computers.
//!
//! Everything here is a pure function over action-state integers, flag
//! bitfields, or stick geometry.

use std::f64::consts::PI;

use serde::Serialize;

use crate::action_state::{self as range, ActionState};
use crate::buttons::Physical;
use crate::frame::{Data, Direction, Position, StateFlags, Velocity};
use crate::frame::{Flags2, Flags4};
use crate::stage::Stage;
use crate::triggers;

// ---- state predicates ----

/// Generic damage states, all variants.
pub fn is_damaged(state: ActionState) -> bool {
	range::DAMAGE_START <= state && state <= range::DAMAGE_END
}

/// Hitstun bitflag. Always false on replays too old to carry flags.
pub fn is_in_hitstun(flags: Option<StateFlags>) -> bool {
	flags.is_some_and(|f| f.3.contains(Flags4::HIT_STUN))
}

/// Hitlag bitflag. Always false on replays too old to carry flags.
pub fn is_in_hitlag(flags: Option<StateFlags>) -> bool {
	flags.is_some_and(|f| f.1.contains(Flags2::HIT_LAG))
}

pub fn is_fastfalling(flags: Option<StateFlags>) -> bool {
	flags.is_some_and(|f| f.1.contains(Flags2::FAST_FALL))
}

pub fn is_grabbed(state: ActionState) -> bool {
	range::CAPTURE_START <= state && state <= range::CAPTURE_END
}

/// Command grabs: Falcon up-B, Kirby swallow, cargo carry, bury, sing, and
/// friends. The DK-barrel wait state sits inside the range but isn't one.
pub fn is_cmd_grabbed(state: ActionState) -> bool {
	state != ActionState::BARREL_WAIT
		&& ((range::COMMAND_GRAB_RANGE1_START <= state && state <= range::COMMAND_GRAB_RANGE1_END)
			|| (range::COMMAND_GRAB_RANGE2_START <= state
				&& state <= range::COMMAND_GRAB_RANGE2_END))
}

/// Tech animations proper, including wall/ceiling techs and missed
/// wall/ceiling techs.
pub fn is_teching(state: ActionState) -> bool {
	(range::TECH_START <= state && state <= range::TECH_END)
		|| state == ActionState::FLY_REFLECT_WALL
		|| state == ActionState::FLY_REFLECT_CEIL
}

/// Downed (missed-tech) states.
pub fn is_downed(state: ActionState) -> bool {
	range::DOWN_START <= state && state <= range::DOWN_END
}

/// The full tech situation: tech animations plus the downed states they
/// come from. One contiguous span of these states is one tech event.
pub fn is_tech_state(state: ActionState) -> bool {
	is_teching(state) || is_downed(state)
}

pub fn is_dying(state: ActionState) -> bool {
	range::DYING_START <= state && state <= range::DYING_END
}

pub fn is_shielding(state: ActionState) -> bool {
	range::GUARD_START <= state && state <= range::GUARD_END
}

pub fn is_shield_broken(state: ActionState) -> bool {
	range::GUARD_BREAK_START <= state && state <= range::GUARD_BREAK_END
}

/// Shielded escape options: rolls, spot dodge, airdodge.
pub fn is_dodging(state: ActionState) -> bool {
	range::DODGE_START <= state && state <= range::DODGE_END
}

pub fn is_ledge_action(state: ActionState) -> bool {
	range::LEDGE_ACTION_START <= state && state <= range::LEDGE_ACTION_END
}

pub fn is_special_fall(state: ActionState) -> bool {
	range::FALL_SPECIAL_START <= state && state <= range::FALL_SPECIAL_END
}

pub fn is_aerial_land_lag(state: ActionState) -> bool {
	range::AERIAL_LAND_LAG_START <= state && state <= range::AERIAL_LAND_LAG_END
}

/// Backward shield slideoff.
pub fn is_slideoff_action(state: ActionState) -> bool {
	state == ActionState::MISS_FOOT
}

/// `LAND_FALL_SPECIAL` reached from something other than an airdodge or
/// jumpsquat, i.e. up-B landing lag.
pub fn is_upb_lag(state: ActionState, prev_state: ActionState) -> bool {
	state == ActionState::LAND_FALL_SPECIAL
		&& prev_state != ActionState::LAND_FALL_SPECIAL
		&& prev_state != ActionState::KNEE_BEND
		&& prev_state != ActionState::ESCAPE_AIR
		&& (prev_state <= range::CONTROLLED_JUMP_START
			|| prev_state >= range::CONTROLLED_JUMP_END)
}

/// Airdodge that landed within the last few frames.
pub fn is_wavedashing(state: ActionState, index: usize, frames: &[Data]) -> bool {
	if state != ActionState::ESCAPE_AIR {
		return false;
	}
	for i in 1..4 {
		if index >= i && frames[index - i].post.state == ActionState::LAND_FALL_SPECIAL {
			return true;
		}
	}
	false
}

/// Whether a position is outside the stage's horizontal bounds (or below
/// the floor). Bounds cover the tournament-legal stages only.
pub fn is_offstage(position: Position, stage: Stage) -> bool {
	if position.y < -5.0 {
		return true;
	}

	let bounds = match stage {
		Stage::FOUNTAIN_OF_DREAMS => (-64.0, 64.0),
		Stage::YOSHIS_STORY => (-56.0, 56.0),
		Stage::DREAM_LAND_N64 => (-73.0, 73.0),
		Stage::POKEMON_STADIUM => (-88.0, 88.0),
		Stage::BATTLEFIELD => (-67.0, 67.0),
		Stage::FINAL_DESTINATION => (-89.0, 89.0),
		_ => (f32::NEG_INFINITY, f32::INFINITY),
	};

	position.x < bounds.0 || position.x > bounds.1
}

pub fn did_lose_stock(curr_stocks: u8, prev_stocks: u8) -> bool {
	prev_stocks > curr_stocks
}

// ---- transition helpers ----

pub fn just_entered_state(target: ActionState, curr: ActionState, prev: ActionState) -> bool {
	curr == target && prev != target
}

pub fn just_exited_state(target: ActionState, curr: ActionState, prev: ActionState) -> bool {
	curr != target && prev == target
}

pub fn just_took_damage(percent: f32, prev_percent: f32) -> bool {
	percent > prev_percent
}

pub fn calc_damage_taken(percent: f32, prev_percent: f32) -> f32 {
	percent - prev_percent
}

/// L-cancel inputs: a digital L/R/Z press, or an analog trigger crossing the
/// press threshold, on this frame but not the previous one.
pub fn just_input_l_cancel(curr: &Data, prev: &Data) -> bool {
	let newly = |button: Physical| {
		curr.pre.buttons.physical.contains(button) && !prev.pre.buttons.physical.contains(button)
	};
	let analog = |curr_v: f32, prev_v: f32| {
		curr_v >= triggers::PRESS_THRESHOLD && prev_v < triggers::PRESS_THRESHOLD
	};
	newly(Physical::L)
		|| newly(Physical::R)
		|| newly(Physical::Z)
		|| analog(curr.pre.triggers.physical.l, prev.pre.triggers.physical.l)
		|| analog(curr.pre.triggers.physical.r, prev.pre.triggers.physical.r)
}

// ---- stick geometry ----

/// Stick position quantized into nine regions. The deadzone is -1;
/// cardinals have even ordinals and diagonals odd ones, which the SDI
/// extraction rules lean on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(i8)]
pub enum JoystickRegion {
	DeadZone = -1,
	Up = 0,
	UpRight = 1,
	Right = 2,
	DownRight = 3,
	Down = 4,
	DownLeft = 5,
	Left = 6,
	UpLeft = 7,
}

impl JoystickRegion {
	pub fn ordinal(self) -> i8 {
		self as i8
	}

	pub fn is_cardinal(self) -> bool {
		self.ordinal() >= 0 && self.ordinal() % 2 == 0
	}

	pub fn is_diagonal(self) -> bool {
		self.ordinal() % 2 == 1
	}
}

const STICK_REGION_THRESHOLD: f32 = 0.2875;

pub fn get_joystick_region(stick: Position) -> JoystickRegion {
	use JoystickRegion::*;
	let (x, y) = (stick.x, stick.y);
	let t = STICK_REGION_THRESHOLD;

	if x >= t && y >= t {
		UpRight
	} else if x >= t && y <= -t {
		DownRight
	} else if x <= -t && y <= -t {
		DownLeft
	} else if x <= -t && y >= t {
		UpLeft
	} else if y >= t {
		Up
	} else if x >= t {
		Right
	} else if y <= -t {
		Down
	} else if x <= -t {
		Left
	} else {
		DeadZone
	}
}

// ---- tech classification ----

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TechType {
	TechInPlace,
	TechLeft,
	TechRight,
	GetUpAttack,
	MissedTech,
	MissedTechRollLeft,
	MissedTechRollRight,
	JabReset,
	WallTech,
	WallJumpTech,
	CeilingTech,
	MissedWallTech,
	MissedCeilingTech,
}

impl TechType {
	/// -1 for leftward rolls, +1 for rightward, 0 otherwise.
	pub fn movement_sign(self) -> f32 {
		match self {
			TechType::TechLeft | TechType::MissedTechRollLeft => -1.0,
			TechType::TechRight | TechType::MissedTechRollRight => 1.0,
			_ => 0.0,
		}
	}
}

/// Classifies a tech-family state. Facing must be the direction recorded at
/// the start of the tech situation: the reported direction can flip mid-roll.
///
/// The face-down roll states move opposite to facing (the character lies
/// head-to-feet reversed), so they classify mirrored relative to the face-up
/// ones.
pub fn get_tech_type(state: ActionState, facing: Direction) -> Option<TechType> {
	use ActionState as S;
	let right = facing.sign() > 0.0;
	match state {
		S::PASSIVE | S::DOWN_STAND_U | S::DOWN_STAND_D => Some(TechType::TechInPlace),
		S::PASSIVE_STAND_F => Some(match right {
			true => TechType::TechRight,
			_ => TechType::TechLeft,
		}),
		S::PASSIVE_STAND_B => Some(match right {
			true => TechType::TechLeft,
			_ => TechType::TechRight,
		}),
		S::DOWN_FOWARD_U => Some(match right {
			true => TechType::MissedTechRollRight,
			_ => TechType::MissedTechRollLeft,
		}),
		S::DOWN_BACK_U => Some(match right {
			true => TechType::MissedTechRollLeft,
			_ => TechType::MissedTechRollRight,
		}),
		S::DOWN_FOWARD_D => Some(match right {
			true => TechType::MissedTechRollLeft,
			_ => TechType::MissedTechRollRight,
		}),
		S::DOWN_BACK_D => Some(match right {
			true => TechType::MissedTechRollRight,
			_ => TechType::MissedTechRollLeft,
		}),
		S::DOWN_ATTACK_U | S::DOWN_ATTACK_D => Some(TechType::GetUpAttack),
		S::DOWN_BOUND_U | S::DOWN_BOUND_D | S::DOWN_WAIT_U | S::DOWN_WAIT_D => {
			Some(TechType::MissedTech)
		}
		S::DOWN_DAMAGE_U | S::DOWN_DAMAGE_D => Some(TechType::JabReset),
		S::PASSIVE_WALL => Some(TechType::WallTech),
		S::PASSIVE_WALL_JUMP => Some(TechType::WallJumpTech),
		S::PASSIVE_CEIL => Some(TechType::CeilingTech),
		S::FLY_REFLECT_WALL => Some(TechType::MissedWallTech),
		S::FLY_REFLECT_CEIL => Some(TechType::MissedCeilingTech),
		_ => None,
	}
}

// ---- angles & DI ----

/// Angle of a vector in degrees, in (-180, 180].
pub fn get_angle(x: f32, y: f32) -> f64 {
	(y as f64).atan2(x as f64).to_degrees()
}

/// Total movement this frame: self-induced velocity (air or ground,
/// whichever applies) plus knockback.
pub fn get_total_velocity(post: &crate::frame::Post) -> Option<Velocity> {
	let air = post.self_air_velocity()?;
	let ground = post.self_ground_velocity()?;
	let kb = post.knockback_velocity()?;
	match post.airborne() {
		Some(true) => Some(air + kb),
		_ => Some(ground + kb),
	}
}

/// Knockback angle after DI, in degrees.
///
/// The stick rotates knockback by up to 18°, scaled by the square of the
/// stick's perpendicular component relative to the knockback vector. A stick
/// parallel (or antiparallel) to the knockback, or centered, changes
/// nothing.
pub fn get_post_di_angle(stick: Position, kb: Velocity) -> f64 {
	let kb_angle = (kb.y as f64).atan2(kb.x as f64);
	let stick_angle = (stick.y as f64).atan2(stick.x as f64);

	// normalize to (-pi, pi]
	let mut diff = kb_angle - stick_angle;
	if diff <= -PI {
		diff += 2.0 * PI;
	} else if diff > PI {
		diff -= 2.0 * PI;
	}

	let magnitude = ((stick.x as f64).powi(2) + (stick.y as f64).powi(2)).sqrt();
	let perp = diff.sin() * magnitude;
	let mut offset = (perp * perp * 18.0).min(18.0);
	if diff > -PI && diff < 0.0 {
		offset = -offset;
	}

	kb_angle.to_degrees() - offset
}

/// Reconstructs the knockback vector at the post-DI angle, preserving
/// magnitude.
pub fn get_post_di_velocity(angle_deg: f64, kb: Velocity) -> Velocity {
	let magnitude = kb.magnitude() as f64;
	let rad = angle_deg.to_radians();
	Velocity {
		x: (magnitude * rad.cos()) as f32,
		y: (magnitude * rad.sin()) as f32,
	}
}

/// The two stick angles that produce maximum DI for a given knockback
/// angle (perpendicular on either side), in degrees in (-180, 180].
pub fn max_di_angles(kb_angle_deg: f64) -> [f64; 2] {
	let mut angles = [kb_angle_deg - 90.0, kb_angle_deg + 90.0];
	for a in &mut angles {
		if *a <= -180.0 {
			*a += 360.0;
		}
		if *a > 180.0 {
			*a -= 360.0;
		}
	}
	angles
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pos(x: f32, y: f32) -> Position {
		Position { x, y }
	}

	#[test]
	fn joystick_regions() {
		assert_eq!(get_joystick_region(pos(0.0, 0.0)), JoystickRegion::DeadZone);
		assert_eq!(get_joystick_region(pos(0.1, -0.1)), JoystickRegion::DeadZone);
		assert_eq!(get_joystick_region(pos(0.0, 0.9)), JoystickRegion::Up);
		assert_eq!(get_joystick_region(pos(0.5, 0.5)), JoystickRegion::UpRight);
		assert_eq!(get_joystick_region(pos(0.9, 0.0)), JoystickRegion::Right);
		assert_eq!(get_joystick_region(pos(0.5, -0.5)), JoystickRegion::DownRight);
		assert_eq!(get_joystick_region(pos(0.0, -0.9)), JoystickRegion::Down);
		assert_eq!(get_joystick_region(pos(-0.5, -0.5)), JoystickRegion::DownLeft);
		assert_eq!(get_joystick_region(pos(-0.9, 0.0)), JoystickRegion::Left);
		assert_eq!(get_joystick_region(pos(-0.5, 0.5)), JoystickRegion::UpLeft);
	}

	#[test]
	fn region_parity() {
		assert!(JoystickRegion::Up.is_cardinal());
		assert!(JoystickRegion::Left.is_cardinal());
		assert!(JoystickRegion::UpRight.is_diagonal());
		assert!(JoystickRegion::DownLeft.is_diagonal());
		assert!(!JoystickRegion::DeadZone.is_cardinal());
	}

	#[test]
	fn post_di_angle_bounds() {
		let kb = Velocity { x: 3.0, y: 2.0 };
		let base = get_angle(kb.x, kb.y);
		for (x, y) in [
			(0.0f32, 1.0f32),
			(0.0, -1.0),
			(1.0, 0.0),
			(-1.0, 0.0),
			(0.7, 0.7),
			(-0.7, -0.7),
			(0.3, -0.9),
		] {
			let post = get_post_di_angle(pos(x, y), kb);
			assert!(
				(post - base).abs() <= 18.0 + 1e-9,
				"DI rotated {} degrees",
				post - base
			);
		}
	}

	#[test]
	fn post_di_angle_unchanged_for_neutral_and_parallel_sticks() {
		let kb = Velocity { x: 3.0, y: 2.0 };
		let base = get_angle(kb.x, kb.y);

		let post = get_post_di_angle(pos(0.0, 0.0), kb);
		assert!((post - base).abs() < 1e-9);

		// parallel stick: same direction as knockback
		let norm = kb.magnitude();
		let post = get_post_di_angle(pos(kb.x / norm, kb.y / norm), kb);
		assert!((post - base).abs() < 1e-9);

		// antiparallel
		let post = get_post_di_angle(pos(-kb.x / norm, -kb.y / norm), kb);
		assert!((post - base).abs() < 1e-6);
	}

	#[test]
	fn post_di_velocity_preserves_magnitude() {
		let kb = Velocity { x: 3.0, y: 2.0 };
		let rotated = get_post_di_velocity(get_angle(kb.x, kb.y) + 12.0, kb);
		assert!((rotated.magnitude() - kb.magnitude()).abs() < 1e-5);
	}

	#[test]
	fn tech_classification_uses_tech_start_facing() {
		use crate::action_state::ActionState as S;
		// face-up rolls move with facing
		assert_eq!(
			get_tech_type(S::DOWN_FOWARD_U, Direction::Right),
			Some(TechType::MissedTechRollRight)
		);
		// face-down rolls move against facing
		assert_eq!(
			get_tech_type(S::DOWN_FOWARD_D, Direction::Right),
			Some(TechType::MissedTechRollLeft)
		);
		assert_eq!(
			get_tech_type(S::PASSIVE_STAND_B, Direction::Right),
			Some(TechType::TechLeft)
		);
		assert_eq!(get_tech_type(S::PASSIVE, Direction::Left), Some(TechType::TechInPlace));
		assert_eq!(get_tech_type(S::WAIT, Direction::Left), None);
	}

	#[test]
	fn upb_lag_excludes_airdodge_and_jumpsquat() {
		use crate::action_state::ActionState as S;
		assert!(is_upb_lag(S::LAND_FALL_SPECIAL, S::FALL_SPECIAL));
		assert!(!is_upb_lag(S::LAND_FALL_SPECIAL, S::ESCAPE_AIR));
		assert!(!is_upb_lag(S::LAND_FALL_SPECIAL, S::KNEE_BEND));
		assert!(!is_upb_lag(S::WAIT, S::FALL_SPECIAL));
	}
}
