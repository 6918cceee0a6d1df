//! Per-frame game state: pre- and post-frame character records, items, and
//! frame bookends, aggregated into one [`Frame`] per in-game frame.
//!
//! Optional fields are grouped into nested version blocks (`PostV2_0` inside
//! `PostV0_2`, and so on). Recorders only ever append fields, so a block can
//! be present only when every earlier block is, and the nesting makes that
//! impossible to misrepresent.

use std::fmt;

use serde::Serialize;

use super::{action_state, attack, buttons, character, game, item, triggers};

pseudo_enum!(LCancel: u8 {
	1 => SUCCESSFUL,
	2 => UNSUCCESSFUL,
});

pseudo_enum!(HurtboxState: u8 {
	0 => VULNERABLE,
	1 => INVULNERABLE,
	2 => INTANGIBLE,
});

/// Facing direction. The engine reports ±1.0; a reading of exactly zero
/// occurs in a handful of states and decodes as `Down`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
	Left,
	Down,
	Right,
}

impl Direction {
	pub fn from_f32(value: f32) -> Direction {
		match value {
			v if v < 0.0 => Direction::Left,
			v if v > 0.0 => Direction::Right,
			_ => Direction::Down,
		}
	}

	pub fn sign(self) -> f32 {
		match self {
			Direction::Left => -1.0,
			Direction::Down => 0.0,
			Direction::Right => 1.0,
		}
	}
}

#[derive(Copy, Clone, PartialEq, Serialize)]
pub struct Position {
	pub x: f32,
	pub y: f32,
}

impl fmt::Debug for Position {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

#[derive(Copy, Clone, PartialEq, Serialize)]
pub struct Velocity {
	pub x: f32,
	pub y: f32,
}

impl Velocity {
	pub fn magnitude(&self) -> f32 {
		(self.x * self.x + self.y * self.y).sqrt()
	}
}

impl std::ops::Add for Velocity {
	type Output = Velocity;
	fn add(self, rhs: Velocity) -> Velocity {
		Velocity { x: self.x + rhs.x, y: self.y + rhs.y }
	}
}

impl fmt::Debug for Velocity {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "({}, {})", self.x, self.y)
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Buttons {
	pub logical: buttons::Logical,
	pub physical: buttons::Physical,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Triggers {
	pub logical: triggers::Logical,
	pub physical: triggers::Physical,
}

// The five post-frame state bitfields. Each byte is an independent bitfield
// with its own meanings; only the bits below have known names.

pseudo_bitmask!(Flags1: u8 {
	1 << 2 => ABSORB_BUBBLE,
	1 << 4 => REFLECT_NO_STEAL,
	1 << 5 => REFLECT_BUBBLE,
});

pseudo_bitmask!(Flags2: u8 {
	1 << 2 => SUBACTION_INVULNERABLE,
	1 << 3 => FAST_FALL,
	1 << 4 => DEFENDER_HIT_LAG,
	1 << 5 => HIT_LAG,
});

pseudo_bitmask!(Flags3: u8 {
	1 << 2 => GRAB_HOLD,
	1 << 7 => SHIELD,
});

pseudo_bitmask!(Flags4: u8 {
	1 << 1 => HIT_STUN,
	1 << 2 => SHIELD_TOUCH,
	1 << 5 => POWER_SHIELD,
});

pseudo_bitmask!(Flags5: u8 {
	1 << 3 => FOLLOWER,
	1 << 4 => SLEEP,
	1 << 6 => DEAD,
	1 << 7 => OFF_SCREEN,
});

/// The five state bitfields, in wire order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StateFlags(pub Flags1, pub Flags2, pub Flags3, pub Flags4, pub Flags5);

impl StateFlags {
	pub fn from_bytes(bytes: [u8; 5]) -> StateFlags {
		StateFlags(
			Flags1(bytes[0]),
			Flags2(bytes[1]),
			Flags3(bytes[2]),
			Flags4(bytes[3]),
			Flags5(bytes[4]),
		)
	}

	pub fn to_bytes(self) -> [u8; 5] {
		let StateFlags(f1, f2, f3, f4, f5) = self;
		[f1.0, f2.0, f3.0, f4.0, f5.0]
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PreV1_4 {
	/// Damage percent (also available post-frame; this is the pre-input view)
	pub damage: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PreV1_2 {
	/// Raw x-axis analog input, used by UCF
	pub raw_analog_x: u8,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v1_4: Option<PreV1_4>,
}

/// Pre-frame update: collected right before controller inputs are used to
/// figure out the character's next action.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Pre {
	pub index: i32,
	pub random_seed: u32,
	pub state: action_state::ActionState,
	pub position: Position,
	pub direction: Direction,
	pub joystick: Position,
	pub cstick: Position,
	pub triggers: Triggers,
	pub buttons: Buttons,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v1_2: Option<PreV1_2>,
}

impl Pre {
	pub fn raw_analog_x(&self) -> Option<u8> {
		self.v1_2.map(|v| v.raw_analog_x)
	}

	pub fn damage(&self) -> Option<f32> {
		self.v1_2.and_then(|v| v.v1_4).map(|v| v.damage)
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PostV3_11 {
	/// Animation the character is in; derived from state
	pub animation_index: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PostV3_8 {
	/// Hitlag frames remaining; zero means "not in hitlag"
	pub hitlag_remaining: f32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v3_11: Option<PostV3_11>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PostV3_5 {
	/// Self-induced air x speed, with the shared y speed
	pub self_air_velocity: Velocity,
	/// Knockback speed; adds with self speeds for total velocity
	pub knockback_velocity: Velocity,
	/// Self-induced ground x speed, with the shared y speed. The y component
	/// matters even when grounded (e.g. walking on slanted ground).
	pub self_ground_velocity: Velocity,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v3_8: Option<PostV3_8>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PostV2_1 {
	pub hurtbox_state: HurtboxState,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v3_5: Option<PostV3_5>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PostV2_0 {
	pub flags: StateFlags,
	/// Multi-purpose state timer (hitstun frames remaining, and other
	/// state-dependent meanings)
	pub misc_as: f32,
	pub airborne: bool,
	/// Id of the ground the character last stood on
	pub ground: u16,
	pub jumps: u8,
	pub l_cancel: Option<LCancel>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v2_1: Option<PostV2_1>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct PostV0_2 {
	/// Number of frames the action state has been active; can be fractional
	pub state_age: f32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v2_0: Option<PostV2_0>,
}

/// Post-frame update: collected at the end of collision detection, the last
/// consideration of the game engine. This is what stat computers read.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Post {
	pub index: i32,
	pub character: character::Internal,
	pub state: action_state::ActionState,
	pub position: Position,
	pub direction: Direction,
	pub damage: f32,
	pub shield: f32,
	pub last_attack_landed: Option<attack::Attack>,
	pub combo_count: u8,
	/// Port of the player that last hit this character
	pub last_hit_by: Option<u8>,
	pub stocks: u8,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v0_2: Option<PostV0_2>,
}

impl Post {
	pub fn state_age(&self) -> Option<f32> {
		self.v0_2.map(|v| v.state_age)
	}

	fn v2_0(&self) -> Option<PostV2_0> {
		self.v0_2.and_then(|v| v.v2_0)
	}

	pub fn flags(&self) -> Option<StateFlags> {
		self.v2_0().map(|v| v.flags)
	}

	pub fn misc_as(&self) -> Option<f32> {
		self.v2_0().map(|v| v.misc_as)
	}

	pub fn airborne(&self) -> Option<bool> {
		self.v2_0().map(|v| v.airborne)
	}

	pub fn ground(&self) -> Option<u16> {
		self.v2_0().map(|v| v.ground)
	}

	pub fn jumps(&self) -> Option<u8> {
		self.v2_0().map(|v| v.jumps)
	}

	pub fn l_cancel(&self) -> Option<LCancel> {
		self.v2_0().and_then(|v| v.l_cancel)
	}

	pub fn hurtbox_state(&self) -> Option<HurtboxState> {
		self.v2_0().and_then(|v| v.v2_1).map(|v| v.hurtbox_state)
	}

	fn v3_5(&self) -> Option<PostV3_5> {
		self.v2_0().and_then(|v| v.v2_1).and_then(|v| v.v3_5)
	}

	pub fn self_air_velocity(&self) -> Option<Velocity> {
		self.v3_5().map(|v| v.self_air_velocity)
	}

	pub fn knockback_velocity(&self) -> Option<Velocity> {
		self.v3_5().map(|v| v.knockback_velocity)
	}

	pub fn self_ground_velocity(&self) -> Option<Velocity> {
		self.v3_5().map(|v| v.self_ground_velocity)
	}

	pub fn hitlag_remaining(&self) -> Option<f32> {
		self.v3_5().and_then(|v| v.v3_8).map(|v| v.hitlag_remaining)
	}

	pub fn animation_index(&self) -> Option<u32> {
		self.v3_5()
			.and_then(|v| v.v3_8)
			.and_then(|v| v.v3_11)
			.map(|v| v.animation_index)
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ItemV3_6 {
	/// Port of the player that owns the item, if any
	pub owner: Option<u8>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ItemV3_2 {
	pub missile_type: item::MissileType,
	pub turnip_face: item::TurnipFace,
	pub is_shot_launched: bool,
	pub charge_power: u8,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v3_6: Option<ItemV3_6>,
}

/// An active item (includes projectiles).
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ItemFrame {
	pub r#type: item::Item,
	pub state: u8,
	pub direction: Option<Direction>,
	pub velocity: Velocity,
	pub position: Position,
	pub damage: u16,
	pub timer: f32,
	/// Unique per spawned item (0, 1, 2, ...)
	pub spawn_id: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub v3_2: Option<ItemV3_2>,
}

/// Start-of-frame data (v2.2+).
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct FrameStart {
	pub random_seed: u32,
}

/// End-of-frame bookend (v3.0+). Carries no decoded payload; its presence
/// marks the frame as finalized by the recorder.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct FrameEnd {}

/// Frame data for one character: both halves of the update cycle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Data {
	pub pre: Pre,
	pub post: Post,
}

/// Frame data for one port. The follower is populated only for the Ice
/// Climbers' Nana.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PortData {
	pub leader: Data,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub follower: Option<Data>,
}

/// A single frame of the game: all active bodies, plus optional bookends.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
	pub index: i32,
	pub ports: [Option<PortData>; game::NUM_PORTS],
	pub items: Vec<ItemFrame>,
	pub start: Option<FrameStart>,
	pub end: Option<FrameEnd>,
}

impl Frame {
	/// 0-based position of this frame in the game's frame sequence
	/// (in-game indices start at -123).
	pub fn array_index(&self) -> usize {
		(self.index - game::FIRST_FRAME_INDEX) as usize
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flags_round_trip() {
		let bytes = [0b0010_0100, 0b0010_1000, 0x80, 0x02, 0xff];
		let flags = StateFlags::from_bytes(bytes);
		assert_eq!(flags.to_bytes(), bytes);
		assert!(flags.1.contains(Flags2::FAST_FALL));
		assert!(flags.1.contains(Flags2::HIT_LAG));
		assert!(flags.2.contains(Flags3::SHIELD));
		assert!(flags.3.contains(Flags4::HIT_STUN));
		assert!(!flags.0.contains(Flags1::REFLECT_BUBBLE));
	}

	#[test]
	fn direction_from_engine_float() {
		assert_eq!(Direction::from_f32(-1.0), Direction::Left);
		assert_eq!(Direction::from_f32(1.0), Direction::Right);
		assert_eq!(Direction::from_f32(0.0), Direction::Down);
	}
}
