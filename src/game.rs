//! Game-level records: the start record (settings, ports, recorder version),
//! the end record, and the eager [`Game`] entry point.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Serialize;

use super::character::External;
use super::frame::Frame;
use super::metadata::Metadata;
use super::parse::{self, Handlers, ParseError, ParseErrorKind, Result};
use super::stage::Stage;
use super::ubjson::Object;

pub const NUM_PORTS: usize = 4;

/// Index of the first frame in a replay. Frame 0 is when "GO" appears;
/// players gain control at [`PLAYER_CONTROL_INDEX`].
pub const FIRST_FRAME_INDEX: i32 = -123;
pub const PLAYER_CONTROL_INDEX: i32 = -39;

/// Version of the Slippi recorder that wrote a replay. Ordered; every
/// optional field in the format is gated on a minimum version.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SlippiVersion(pub u8, pub u8, pub u8);

impl SlippiVersion {
	pub fn gte(&self, major: u8, minor: u8, revision: u8) -> bool {
		*self >= SlippiVersion(major, minor, revision)
	}
}

impl fmt::Display for SlippiVersion {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}.{}.{}", self.0, self.1, self.2)
	}
}

impl fmt::Debug for SlippiVersion {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Display::fmt(self, f)
	}
}

pseudo_enum!(PlayerType: u8 {
	0 => HUMAN,
	1 => CPU,
	2 => DEMO,
});

pseudo_enum!(TeamColor: u8 {
	0 => RED,
	1 => BLUE,
	2 => GREEN,
});

pseudo_enum!(TeamShade: u8 {
	0 => NORMAL,
	1 => LIGHT,
	2 => DARK,
});

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Team {
	pub color: TeamColor,
	pub shade: TeamShade,
}

pseudo_enum!(DashBack: u32 {
	1 => UCF,
	2 => ARDUINO,
});

pseudo_enum!(ShieldDrop: u32 {
	1 => UCF,
	2 => ARDUINO,
});

/// UCF controller-fix toggles (v1.0+). `None` means off.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct Ucf {
	pub dash_back: Option<DashBack>,
	pub shield_drop: Option<ShieldDrop>,
}

/// One occupied port slot in the start record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
	pub character: External,
	pub r#type: PlayerType,
	/// Starting stock count
	pub stocks: u8,
	pub costume: u8,
	pub team: Option<Team>,
	pub handicap: u8,
	pub bitfield: u8,
	pub cpu_level: Option<u8>,
	pub offense_ratio: f32,
	pub defense_ratio: f32,
	pub model_scale: f32,
	/// UCF toggles (v1.0+)
	pub ucf: Option<Ucf>,
	/// In-game name tag (v1.3+), shift-JIS decoded
	pub name_tag: Option<String>,
}

/// Matchmaking mode, derived from the 6th character of the match id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MatchType {
	Ranked,
	Unranked,
	Direct,
	Other,
	/// No match id at all (local play)
	Offline,
}

/// Information used to initialize the game: mode, settings, characters,
/// stage.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Start {
	pub slippi: SlippiVersion,
	pub bitfield: [u8; 4],
	pub is_teams: bool,
	pub item_spawn_frequency: i8,
	pub self_destruct_score: i8,
	pub stage: Stage,
	pub timer: u32,
	pub item_spawn_bitfield: [u8; 5],
	pub damage_ratio: f32,
	pub players: [Option<Player>; NUM_PORTS],
	pub random_seed: u32,
	/// v1.5+
	pub is_pal: Option<bool>,
	/// v2.0+
	pub is_frozen_ps: Option<bool>,
	/// v3.14+: mode and start time of the online match
	pub match_id: Option<String>,
	/// v3.14+: ordinal for consecutive games in a set
	pub game_number: Option<u32>,
	pub tiebreak_number: Option<u32>,
}

impl Start {
	pub fn match_type(&self) -> MatchType {
		match &self.match_id {
			Some(id) => match id.as_bytes().get(5) {
				Some(b'r') => MatchType::Ranked,
				Some(b'u') => MatchType::Unranked,
				Some(b'd') => MatchType::Direct,
				_ => MatchType::Other,
			},
			_ => MatchType::Offline,
		}
	}

	/// Number of occupied ports.
	pub fn occupied_ports(&self) -> usize {
		self.players.iter().filter(|p| p.is_some()).count()
	}
}

pseudo_enum!(EndMethod: u8 {
	0 => INCONCLUSIVE,
	1 => TIME,
	2 => GAME,
	3 => CONCLUSIVE,
	7 => NO_CONTEST,
});

/// Information about the end of the game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct End {
	pub method: EndMethod,
	/// v2.0+: port of the player that quit out, if any
	pub lras_initiator: Option<u8>,
	/// v3.13+: 0-indexed placements by port; -1 for absent players
	pub player_placements: Option<[i8; NUM_PORTS]>,
}

/// A fully-materialized replay: start record, every frame (in index order,
/// rollbacks resolved), end record, and metadata.
#[derive(Clone, Debug, Serialize)]
pub struct Game {
	pub start: Start,
	pub frames: Vec<Frame>,
	pub end: Option<End>,
	pub metadata: Option<Metadata>,
	pub metadata_raw: Option<HashMap<String, Object>>,
}

impl Game {
	/// Parses a replay from a reader. With `skip_frames`, seeks past all
	/// frame data (for metadata-only use).
	pub fn new<R: Read>(r: &mut R, skip_frames: bool) -> Result<Game> {
		let mut handlers = GameHandlers::default();
		parse::parse(r, &mut handlers, skip_frames)?;
		handlers.into_game()
	}

	/// Parses a replay file. Errors are annotated with the path.
	pub fn open<P: AsRef<Path>>(path: P, skip_frames: bool) -> Result<Game> {
		let path = path.as_ref();
		let buf = std::fs::read(path)
			.map_err(|e| ParseError::from(ParseErrorKind::Io(e)).with_filename(path))?;
		Game::new(&mut &buf[..], skip_frames).map_err(|e| e.with_filename(path))
	}
}

#[derive(Default)]
struct GameHandlers {
	start: Option<Start>,
	frames: Vec<Frame>,
	end: Option<End>,
	metadata: Option<Metadata>,
	metadata_raw: Option<HashMap<String, Object>>,
}

impl GameHandlers {
	fn into_game(self) -> Result<Game> {
		Ok(Game {
			start: self.start.ok_or_else(|| {
				ParseError::from(ParseErrorKind::UnexpectedEvent(
					"replay contained no game-start event".to_string(),
				))
			})?,
			frames: self.frames,
			end: self.end,
			metadata: self.metadata,
			metadata_raw: self.metadata_raw,
		})
	}
}

impl Handlers for GameHandlers {
	fn game_start(&mut self, start: Start) -> Result<()> {
		self.start = Some(start);
		Ok(())
	}

	fn frame(&mut self, frame: Frame) -> Result<()> {
		let count = self.frames.len() as i64;
		let idx = frame.index as i64 - FIRST_FRAME_INDEX as i64;
		if idx == count {
			self.frames.push(frame);
		} else if idx >= 0 && idx < count {
			// rollback: the same frame was re-simulated with newer data
			debug!("rollback: {} -> {}", count - 1, idx);
			self.frames[idx as usize] = frame;
		} else {
			return Err(ParseErrorKind::MissingFrames {
				expected: FIRST_FRAME_INDEX + count as i32,
				got: frame.index,
			}
			.into());
		}
		Ok(())
	}

	fn game_end(&mut self, end: End) -> Result<()> {
		self.end = Some(end);
		Ok(())
	}

	fn metadata(&mut self, metadata: Metadata) -> Result<()> {
		self.metadata = Some(metadata);
		Ok(())
	}

	fn metadata_raw(&mut self, raw: HashMap<String, Object>) -> Result<()> {
		self.metadata_raw = Some(raw);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn version_ordering() {
		assert!(SlippiVersion(3, 9, 0) > SlippiVersion(2, 11, 0));
		assert!(SlippiVersion(2, 0, 0).gte(2, 0, 0));
		assert!(!SlippiVersion(1, 5, 1).gte(2, 0, 0));
		assert_eq!(SlippiVersion(3, 14, 0).to_string(), "3.14.0");
	}

	#[test]
	fn match_type_from_match_id() {
		let start = |id: Option<&str>| Start {
			slippi: SlippiVersion(3, 14, 0),
			bitfield: [0; 4],
			is_teams: false,
			item_spawn_frequency: -1,
			self_destruct_score: -1,
			stage: Stage::BATTLEFIELD,
			timer: 480,
			item_spawn_bitfield: [0; 5],
			damage_ratio: 1.0,
			players: [None, None, None, None],
			random_seed: 0,
			is_pal: None,
			is_frozen_ps: None,
			match_id: id.map(String::from),
			game_number: None,
			tiebreak_number: None,
		};
		assert_eq!(start(Some("mode.ranked-2022")).match_type(), MatchType::Ranked);
		assert_eq!(start(Some("mode.unranked")).match_type(), MatchType::Unranked);
		assert_eq!(start(Some("mode.direct-x")).match_type(), MatchType::Direct);
		assert_eq!(start(Some("weird")).match_type(), MatchType::Other);
		assert_eq!(start(None).match_type(), MatchType::Offline);
	}
}
