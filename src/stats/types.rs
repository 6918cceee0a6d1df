//! Typed records emitted by the stat computers, plus the row projection used
//! for tabular export.
//!
//! Each record is a plain struct; a caller builds a table by concatenating
//! the match header with each record's fields. Rows are ordered JSON objects
//! so column order is stable; no dataframe library is prescribed.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::attack::Attack;
use crate::character::{costume_name, External};
use crate::frame::{Direction, Position, Velocity};
use crate::game::MatchType;
use crate::ground::Ground;
use crate::stage::Stage;

use super::common::{get_angle, JoystickRegion, TechType};

// ---- wavedash ----

/// One airdodge-into-ground landing, wavedash or waveland.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WavedashData {
	pub frame_index: usize,
	/// Stick angle below horizontal, in degrees
	pub angle: Option<f32>,
	pub direction: Option<Direction>,
	/// Frames between the jumpsquat and the airdodge input
	pub trigger_frame: u8,
	/// Frames between the airdodge input and landing
	pub airdodge_frames: u8,
	/// True when there was no jumpsquat in range (a waveland)
	pub waveland: bool,
}

impl WavedashData {
	pub(crate) fn new(frame_index: usize, airdodge_frames: u8, stick: Position) -> WavedashData {
		// Angle folded into the lower hemisphere: degrees below horizontal
		// plus a left/right/down direction.
		let raw = get_angle(stick.x, stick.y) as f32;
		let folded = match raw > 0.0 {
			true => -raw,
			_ => raw,
		};
		let (angle, direction) = if folded == 0.0 {
			(0.0, Direction::Right)
		} else if folded == -180.0 {
			(0.0, Direction::Left)
		} else if folded == -90.0 {
			(90.0, Direction::Down)
		} else if folded < -90.0 {
			(folded + 180.0, Direction::Left)
		} else {
			(-folded, Direction::Right)
		};
		WavedashData {
			frame_index,
			angle: Some(angle),
			direction: Some(direction),
			trigger_frame: 0,
			airdodge_frames,
			waveland: true,
		}
	}

	/// Frames from jumpsquat to landing.
	pub fn total_startup(&self) -> u8 {
		self.trigger_frame + self.airdodge_frames
	}
}

// ---- dash ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashData {
	pub frame_index: usize,
	pub start_pos: f32,
	pub end_pos: f32,
	pub direction: Direction,
	pub stocks_remaining: u8,
	pub is_dashdance: bool,
}

impl DashData {
	pub fn distance(&self) -> f32 {
		(self.end_pos - self.start_pos).abs()
	}
}

// ---- tech ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TechData {
	pub frame_index: usize,
	pub tech_type: Option<TechType>,
	pub position: Position,
	pub ground: Option<Ground>,
	/// Heuristic: y > 5 means the tech happened on a platform
	pub is_on_platform: bool,
	pub is_missed_tech: bool,
	pub towards_center: Option<bool>,
	pub towards_opponent: Option<bool>,
	pub jab_reset: Option<bool>,
	/// The opponent's most recent attack at tech time
	pub last_hit_by: Option<Attack>,
	/// True when the tech span ended in a damage state
	pub was_punished: bool,
}

// ---- take hit ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TakeHitData {
	pub frame_index: usize,
	pub last_hit_by: Option<Attack>,
	pub state_before_hit: crate::action_state::ActionState,
	pub grounded: Option<bool>,
	/// True when the pre-hit state was in the crouch family
	pub crouch_cancel: Option<bool>,
	pub percent: f32,
	pub start_position: Position,
	pub end_position: Option<Position>,
	pub hitlag_frames: u32,
	pub stick_regions_during_hitlag: Vec<JoystickRegion>,
	pub sdi_inputs: Vec<JoystickRegion>,
	pub asdi: Option<JoystickRegion>,
	/// Effective DI stick: final-frame stick with pure cardinals snapped to
	/// their axis
	pub di_stick: Option<Position>,
	pub kb_velocity: Option<Velocity>,
	pub kb_angle: Option<f32>,
	pub final_kb_velocity: Option<Velocity>,
	pub final_kb_angle: Option<f32>,
	/// Percentage of the maximum 18-degree rotation achieved, truncated to
	/// two decimals
	pub di_efficacy: Option<f32>,
}

impl TakeHitData {
	/// Scans the recorded stick regions for changes that register as SDI
	/// inputs.
	pub(crate) fn find_valid_sdi(&mut self) {
		for i in 1..self.stick_regions_during_hitlag.len() {
			let curr = self.stick_regions_during_hitlag[i];
			// the first region and deadzone returns can't be SDI inputs
			if curr == JoystickRegion::DeadZone {
				continue;
			}
			let prev = self.stick_regions_during_hitlag[i - 1];
			if curr == prev {
				continue;
			}
			// leaving the deadzone always counts
			if prev == JoystickRegion::DeadZone {
				self.sdi_inputs.push(curr);
				continue;
			}
			// cardinal -> any new region counts
			if prev.is_cardinal() {
				self.sdi_inputs.push(curr);
				continue;
			}
			// diagonal -> diagonal counts; diagonal -> cardinal only when
			// the cardinal borders the opposite quadrant, which works out
			// to an ordinal distance of 3..=6
			if curr.is_diagonal() {
				self.sdi_inputs.push(curr);
			} else {
				let dist = (curr.ordinal() - prev.ordinal()).abs();
				if (3..7).contains(&dist) {
					self.sdi_inputs.push(curr);
				}
			}
		}
	}

	pub fn change_in_position(&self) -> Option<(f32, f32)> {
		self.end_position
			.map(|end| (end.x - self.start_position.x, end.y - self.start_position.y))
	}

	pub fn distance(&self) -> Option<f32> {
		self.change_in_position()
			.map(|(dx, dy)| (dx * dx + dy * dy).sqrt())
	}
}

// ---- l-cancel ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LCancelData {
	pub frame_index: usize,
	pub l_cancel: bool,
	/// The aerial that landed (from the attack state, or the landing-lag
	/// state when landing coincided with a hit)
	pub attack: Option<Attack>,
	/// Signed offset of the trigger press relative to this frame; negative
	/// means before landing
	pub trigger_input_frame: Option<i32>,
	/// True when the trigger press happened during hitlag
	pub during_hitlag: bool,
	/// Whether the previous frame was fastfalling
	pub fastfall: bool,
	pub ground: Option<Ground>,
}

/// L-cancel records plus the running success tally.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LCancels {
	pub data: Vec<LCancelData>,
	pub successful: u32,
	pub failed: u32,
}

impl LCancels {
	pub(crate) fn append(&mut self, data: LCancelData) {
		match data.l_cancel {
			true => self.successful += 1,
			_ => self.failed += 1,
		}
		self.data.push(data);
	}

	/// `successes / (successes + failures) * 100`, or None with no attempts.
	pub fn percentage(&self) -> Option<f32> {
		let total = self.successful + self.failed;
		match total {
			0 => None,
			_ => Some(self.successful as f32 / total as f32 * 100.0),
		}
	}
}

// ---- shield drop ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShieldDropData {
	pub frame_index: usize,
	pub ground: Option<Ground>,
	/// Frames since shield-stun release, when the drop came out of
	/// shield-stun within the lookback window
	pub oo_shieldstun_frame: Option<u32>,
}

// ---- aggregation ----

/// Per-player storage for every detector's output.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Stats {
	pub wavedashes: Vec<WavedashData>,
	pub dashes: Vec<DashData>,
	pub techs: Vec<TechData>,
	pub take_hits: Vec<TakeHitData>,
	pub l_cancels: LCancels,
	pub shield_drops: Vec<ShieldDropData>,
}

/// The fixed per-match prefix for tabular rows.
#[derive(Clone, Debug, Serialize)]
pub struct StatsHeader {
	pub match_id: Option<String>,
	pub date: Option<String>,
	pub slippi_version: String,
	pub match_type: MatchType,
	pub game_number: Option<u32>,
	pub stage: Stage,
	/// Duration in frames
	pub duration: Option<usize>,
	pub result: &'static str,
	pub port: String,
	pub connect_code: Option<String>,
	pub character: External,
	pub costume: Option<&'static str>,
	pub opponent_character: External,
}

impl StatsHeader {
	fn to_map(&self) -> Map<String, Value> {
		let mut m = Map::new();
		m.insert("match_id".into(), json_opt(self.match_id.as_ref()));
		m.insert("date".into(), json_opt(self.date.as_ref()));
		m.insert("slippi_version".into(), Value::from(self.slippi_version.clone()));
		m.insert("match_type".into(), Value::from(format!("{:?}", self.match_type)));
		m.insert("game_number".into(), json_opt(self.game_number));
		m.insert("stage".into(), Value::from(enum_name(&self.stage.name(), self.stage.0)));
		m.insert("duration".into(), json_opt(self.duration));
		m.insert("result".into(), Value::from(self.result));
		m.insert("port".into(), Value::from(self.port.clone()));
		m.insert("connect_code".into(), json_opt(self.connect_code.as_ref()));
		m.insert(
			"character".into(),
			Value::from(enum_name(&self.character.name(), self.character.0)),
		);
		m.insert("costume".into(), json_opt(self.costume));
		m.insert(
			"opponent_character".into(),
			Value::from(enum_name(&self.opponent_character.name(), self.opponent_character.0)),
		);
		m
	}
}

fn enum_name<T: std::fmt::Display>(name: &Option<&'static str>, raw: T) -> String {
	match name {
		Some(n) => (*n).to_string(),
		_ => raw.to_string(),
	}
}

fn json_opt<T: Serialize>(v: T) -> Value {
	serde_json::to_value(v).unwrap_or(Value::Null)
}

/// Projects records into rows: the match header columns followed by each
/// record's own fields, in declaration order.
pub fn project_rows<T: Serialize>(header: &StatsHeader, records: &[T]) -> Vec<Map<String, Value>> {
	let prefix = header.to_map();
	records
		.iter()
		.map(|record| {
			let mut row = prefix.clone();
			if let Ok(Value::Object(fields)) = serde_json::to_value(record) {
				for (k, v) in fields {
					row.insert(k, v);
				}
			}
			row
		})
		.collect()
}

/// Convenience: a costume column value for the header.
pub fn costume_column(character: External, costume: u8) -> Option<&'static str> {
	costume_name(character, costume)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn wavedash_angle_folding() {
		// down-left, about 19.4 degrees below horizontal
		let wd = WavedashData::new(10, 2, Position { x: -0.85, y: -0.30 });
		assert_eq!(wd.direction, Some(Direction::Left));
		let angle = wd.angle.unwrap();
		assert!((angle - 19.44).abs() < 0.05, "got {}", angle);

		// mirrored stick gives the mirrored direction, same angle
		let wd = WavedashData::new(10, 2, Position { x: 0.85, y: -0.30 });
		assert_eq!(wd.direction, Some(Direction::Right));
		assert!((wd.angle.unwrap() - 19.44).abs() < 0.05);

		// cardinals
		let wd = WavedashData::new(0, 0, Position { x: 1.0, y: 0.0 });
		assert_eq!((wd.angle.unwrap(), wd.direction.unwrap()), (0.0, Direction::Right));
		let wd = WavedashData::new(0, 0, Position { x: -1.0, y: 0.0 });
		assert_eq!((wd.angle.unwrap(), wd.direction.unwrap()), (0.0, Direction::Left));
		let wd = WavedashData::new(0, 0, Position { x: 0.0, y: -1.0 });
		assert_eq!((wd.angle.unwrap(), wd.direction.unwrap()), (90.0, Direction::Down));
	}

	#[test]
	fn sdi_extraction_rules() {
		use JoystickRegion::*;

		let mut hit = take_hit_with_regions(vec![DeadZone, Up, Up, DeadZone]);
		hit.find_valid_sdi();
		assert_eq!(hit.sdi_inputs, vec![Up]);

		// cardinal -> diagonal counts
		let mut hit = take_hit_with_regions(vec![Up, UpRight]);
		hit.find_valid_sdi();
		assert_eq!(hit.sdi_inputs, vec![UpRight]);

		// diagonal -> neighboring cardinal does not count
		let mut hit = take_hit_with_regions(vec![UpRight, Up]);
		hit.find_valid_sdi();
		assert_eq!(hit.sdi_inputs, Vec::<JoystickRegion>::new());

		// diagonal -> cardinal bordering the opposite quadrant counts
		let mut hit = take_hit_with_regions(vec![DownRight, Left]);
		hit.find_valid_sdi();
		assert_eq!(hit.sdi_inputs, vec![Left]);

		// diagonal -> diagonal counts
		let mut hit = take_hit_with_regions(vec![UpRight, DownRight]);
		hit.find_valid_sdi();
		assert_eq!(hit.sdi_inputs, vec![DownRight]);

		// no change, no inputs
		let mut hit = take_hit_with_regions(vec![Down, Down, Down]);
		hit.find_valid_sdi();
		assert_eq!(hit.sdi_inputs, Vec::<JoystickRegion>::new());
	}

	fn take_hit_with_regions(regions: Vec<JoystickRegion>) -> TakeHitData {
		TakeHitData {
			frame_index: 0,
			last_hit_by: None,
			state_before_hit: crate::action_state::ActionState::WAIT,
			grounded: None,
			crouch_cancel: None,
			percent: 0.0,
			start_position: Position { x: 0.0, y: 0.0 },
			end_position: None,
			hitlag_frames: regions.len() as u32,
			stick_regions_during_hitlag: regions,
			sdi_inputs: Vec::new(),
			asdi: None,
			di_stick: None,
			kb_velocity: None,
			kb_angle: None,
			final_kb_velocity: None,
			final_kb_angle: None,
			di_efficacy: None,
		}
	}

	#[test]
	fn l_cancel_percentage_is_exact() {
		let mut lc = LCancels::default();
		assert_eq!(lc.percentage(), None);
		for success in [true, true, false, true] {
			lc.append(LCancelData {
				frame_index: 0,
				l_cancel: success,
				attack: None,
				trigger_input_frame: None,
				during_hitlag: false,
				fastfall: false,
				ground: None,
			});
		}
		assert_eq!(lc.percentage(), Some(75.0));
		assert_eq!(lc.successful, 3);
		assert_eq!(lc.failed, 1);
	}
}
