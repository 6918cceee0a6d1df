//! Binds a parsed game to its players and runs the stat computers.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::character::External;
use crate::frame::Data;
use crate::game::{End, Game, SlippiVersion};
use crate::parse::ParseError;

use super::types::{costume_column, Stats, StatsHeader};
use super::{dash, l_cancel, shield_drop, take_hit, tech, wavedash};

/// Domain errors: the replay parsed fine but can't drive the stat pipeline.
/// These must never crash a batch run; callers record them and move on.
#[derive(Debug, Error)]
pub enum StatsError {
	#[error("expected exactly 2 players, got {0}")]
	PlayerCount(usize),
	#[error("no player matching identifier: {0}")]
	UnknownIdentifier(String),
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// A player identifier: connect code (case-sensitive) or port index.
#[derive(Clone, Copy, Debug)]
pub enum PlayerId<'a> {
	Code(&'a str),
	Port(usize),
}

impl fmt::Display for PlayerId<'_> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			PlayerId::Code(code) => write!(f, "{}", code),
			PlayerId::Port(port) => write!(f, "port {}", port),
		}
	}
}

/// One player's identity, frame projection, and computed stats.
#[derive(Clone, Debug, Serialize)]
pub struct Player {
	pub port: usize,
	pub character: External,
	pub costume: u8,
	pub connect_code: Option<String>,
	pub display_name: Option<String>,
	pub did_win: bool,
	/// This port's leader frames, one per game frame
	pub frames: Vec<Data>,
	/// Follower (Nana) frames, for the Ice Climbers only
	pub nana_frames: Option<Vec<Option<Data>>>,
	pub stats: Stats,
}

impl Player {
	/// The fixed row prefix for this player's stat records.
	pub fn stats_header(&self, game: &Game, opponent_character: External) -> StatsHeader {
		StatsHeader {
			match_id: game.start.match_id.clone(),
			date: game
				.metadata
				.as_ref()
				.and_then(|m| m.date)
				.map(|d| d.to_rfc3339()),
			slippi_version: game.start.slippi.to_string(),
			match_type: game.start.match_type(),
			game_number: game.start.game_number,
			stage: game.start.stage,
			duration: game.metadata.as_ref().and_then(|m| m.duration),
			result: match self.did_win {
				true => "win",
				_ => "loss",
			},
			port: format!("P{}", self.port + 1),
			connect_code: self.connect_code.clone(),
			character: self.character,
			costume: costume_column(self.character, self.costume),
			opponent_character,
		}
	}
}

/// Which detectors `stats_compute` runs. All are on by default.
#[derive(Clone, Copy, Debug)]
pub struct ComputeOptions {
	pub wavedash: bool,
	pub dash: bool,
	pub tech: bool,
	pub take_hit: bool,
	pub l_cancel: bool,
	pub shield_drop: bool,
}

impl Default for ComputeOptions {
	fn default() -> ComputeOptions {
		ComputeOptions {
			wavedash: true,
			dash: true,
			tech: true,
			take_hit: true,
			l_cancel: true,
			shield_drop: true,
		}
	}
}

/// Derives win/loss for `port` against `opponent_port`: placements first,
/// then the quit-out initiator, then final stock counts.
fn did_win(end: Option<&End>, last_frame: Option<&crate::frame::Frame>, port: usize, opponent_port: usize) -> bool {
	if let Some(end) = end {
		if let Some(placements) = end.player_placements {
			return placements[port] == 0;
		}
		if let Some(lras) = end.lras_initiator {
			return lras as usize == opponent_port;
		}
	}
	if let Some(frame) = last_frame {
		let stocks = |p: usize| {
			frame.ports[p]
				.as_ref()
				.map(|data| data.leader.post.stocks)
				.unwrap_or(0)
		};
		return stocks(port) > stocks(opponent_port);
	}
	false
}

/// Resolves players from a parsed game and runs stat computers over their
/// frames.
pub struct StatsComputer {
	pub replay: Game,
	pub replay_version: SlippiVersion,
	pub players: Vec<Player>,
}

impl StatsComputer {
	/// Builds the per-player frame projections. Requires exactly two
	/// occupied ports.
	pub fn new(replay: Game) -> Result<StatsComputer, StatsError> {
		let occupied: Vec<usize> = (0..replay.start.players.len())
			.filter(|&p| replay.start.players[p].is_some())
			.collect();
		if occupied.len() != 2 {
			return Err(StatsError::PlayerCount(occupied.len()));
		}

		let mut players = Vec::with_capacity(2);
		for (slot, &port) in occupied.iter().enumerate() {
			let opponent_port = occupied[1 - slot];
			let start_player = replay.start.players[port]
				.as_ref()
				.ok_or(StatsError::PlayerCount(occupied.len()))?;

			let meta_player = replay
				.metadata
				.as_ref()
				.and_then(|m| m.players[port].as_ref());

			let frames: Vec<Data> = replay
				.frames
				.iter()
				.filter_map(|f| f.ports[port].as_ref().map(|p| p.leader))
				.collect();

			let nana_frames = match start_player.character == External::ICE_CLIMBERS {
				true => Some(
					replay
						.frames
						.iter()
						.map(|f| f.ports[port].as_ref().and_then(|p| p.follower))
						.collect(),
				),
				_ => None,
			};

			players.push(Player {
				port,
				character: start_player.character,
				costume: start_player.costume,
				connect_code: meta_player
					.and_then(|p| p.connect_code())
					.map(String::from),
				display_name: meta_player
					.and_then(|p| p.display_name())
					.map(String::from),
				did_win: did_win(replay.end.as_ref(), replay.frames.last(), port, opponent_port),
				frames,
				nana_frames,
				stats: Stats::default(),
			});
		}

		let replay_version = replay.start.slippi;
		Ok(StatsComputer {
			replay,
			replay_version,
			players,
		})
	}

	/// Parses a replay file and primes it. Errors are annotated with the
	/// path.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<StatsComputer, StatsError> {
		StatsComputer::new(Game::open(path, false)?)
	}

	fn index_of(&self, id: PlayerId) -> Result<usize, StatsError> {
		match id {
			PlayerId::Code(code) => self
				.players
				.iter()
				.position(|p| p.connect_code.as_deref() == Some(code))
				.ok_or_else(|| StatsError::UnknownIdentifier(id.to_string())),
			PlayerId::Port(port) => self
				.players
				.iter()
				.position(|p| p.port == port)
				.ok_or_else(|| StatsError::UnknownIdentifier(id.to_string())),
		}
	}

	pub fn get_player(&self, id: PlayerId) -> Result<&Player, StatsError> {
		Ok(&self.players[self.index_of(id)?])
	}

	pub fn get_opponent(&self, id: PlayerId) -> Result<&Player, StatsError> {
		Ok(&self.players[1 - self.index_of(id)?])
	}

	/// Runs the enabled detectors for the identified player, or for both
	/// players when no identifier is given.
	pub fn stats_compute(
		&mut self,
		id: Option<PlayerId>,
		options: ComputeOptions,
	) -> Result<(), StatsError> {
		let indices: Vec<usize> = match id {
			Some(id) => vec![self.index_of(id)?],
			_ => vec![0, 1],
		};

		let stage = self.replay.start.stage;
		let version = self.replay_version;

		for i in indices {
			let opponent = 1 - i;

			if options.wavedash {
				let result = wavedash::compute(&self.players[i].frames);
				self.players[i].stats.wavedashes = result;
			}
			if options.dash {
				let result = dash::compute(&self.players[i].frames);
				self.players[i].stats.dashes = result;
			}
			if options.tech {
				let result = tech::compute(
					&self.players[i].frames,
					&self.players[opponent].frames,
					stage,
				);
				self.players[i].stats.techs = result;
			}
			if options.take_hit {
				let result = take_hit::compute(
					&self.players[i].frames,
					&self.players[opponent].frames,
					version,
				);
				self.players[i].stats.take_hits = result;
			}
			if options.l_cancel {
				let result = l_cancel::compute(&self.players[i].frames, stage, version);
				self.players[i].stats.l_cancels = result;
			}
			if options.shield_drop {
				let result = shield_drop::compute(&self.players[i].frames, stage);
				self.players[i].stats.shield_drops = result;
			}
		}

		Ok(())
	}
}
