//! Streaming decoder for the replay container.
//!
//! The container is a UBJSON-style dictionary whose `raw` element holds a
//! linear event stream. The first event declares the payload size of every
//! other event code, and those sizes are honored even for codes we don't
//! understand, which is what keeps old readers working on new replays.
//!
//! Frame-related events are folded into one [`Frame`] per frame index. Frame
//! bookends don't exist before recorder version 3.0, so frame boundaries are
//! detected by a change of frame index instead.

use std::collections::HashMap;
use std::convert::TryFrom;
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ReadBytesExt};
use encoding_rs::SHIFT_JIS;
use log::{debug, trace};
use thiserror::Error;

use super::action_state::ActionState;
use super::attack::Attack;
use super::buttons;
use super::character::{External, Internal};
use super::frame::{
	Buttons, Data, Direction, Frame, FrameEnd, FrameStart, ItemFrame, ItemV3_2, ItemV3_6,
	LCancel, HurtboxState, Position, Post, PostV0_2, PostV2_0, PostV2_1, PostV3_5, PostV3_8,
	PostV3_11, Pre, PreV1_2, PreV1_4, PortData, StateFlags, Triggers, Velocity,
};
use super::game::{
	DashBack, End, EndMethod, Player, PlayerType, ShieldDrop, SlippiVersion, Start, Team,
	TeamColor, TeamShade, Ucf, NUM_PORTS,
};
use super::item::{Item, MissileType, TurnipFace};
use super::metadata::Metadata;
use super::stage::Stage;
use super::triggers;
use super::ubjson::{self, Object};

pub type Result<T> = std::result::Result<T, ParseError>;

/// What went wrong. Enum tolerance is deliberately absent from this list:
/// unknown enum integers are preserved, never fatal.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
	/// The stream ended inside a payload whose declared size was non-zero.
	#[error("stream ended inside a sized payload")]
	Truncated,
	/// An event code with no entry in the payload-size table.
	#[error("unknown event code: {0:#04x}")]
	UnknownCode(u8),
	/// The structural order of events was violated.
	#[error("unexpected event: {0}")]
	UnexpectedEvent(String),
	/// A frame index arrived more than one past the next expected index.
	#[error("missing frames: expected index {expected}, got {got}")]
	MissingFrames { expected: i32, got: i32 },
	#[error("bad container literal: expected {expected:02x?}, got {got:02x?}")]
	BadContainerLiteral { expected: Vec<u8>, got: Vec<u8> },
	#[error("invalid metadata: {0}")]
	Metadata(String),
	#[error("i/o error: {0}")]
	Io(#[from] io::Error),
}

/// A parse failure, annotated with the filename and byte offset where known.
#[derive(Debug)]
pub struct ParseError {
	pub filename: Option<PathBuf>,
	pub pos: Option<u64>,
	pub kind: ParseErrorKind,
}

impl ParseError {
	pub fn with_filename<P: AsRef<Path>>(mut self, path: P) -> ParseError {
		if self.filename.is_none() {
			self.filename = Some(path.as_ref().to_path_buf());
		}
		self
	}

	fn with_pos(mut self, pos: u64) -> ParseError {
		if self.pos.is_none() {
			self.pos = Some(pos);
		}
		self
	}
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "parse error (")?;
		match &self.filename {
			Some(p) => write!(f, "{}", p.display())?,
			_ => write!(f, "?")?,
		}
		match self.pos {
			Some(pos) => write!(f, " @{}", pos)?,
			_ => write!(f, " @?")?,
		}
		write!(f, "): {}", self.kind)
	}
}

impl std::error::Error for ParseError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		Some(&self.kind)
	}
}

impl From<ParseErrorKind> for ParseError {
	fn from(kind: ParseErrorKind) -> ParseError {
		ParseError {
			filename: None,
			pos: None,
			kind,
		}
	}
}

impl From<io::Error> for ParseError {
	fn from(e: io::Error) -> ParseError {
		match e.kind() {
			io::ErrorKind::UnexpectedEof => ParseErrorKind::Truncated.into(),
			_ => ParseErrorKind::Io(e).into(),
		}
	}
}

const PAYLOADS_EVENT_CODE: u8 = 0x35;

#[derive(Clone, Copy, Debug, PartialEq, num_enum::TryFromPrimitive)]
#[repr(u8)]
pub enum Event {
	MessageSplitter = 0x10,
	GameStart = 0x36,
	FramePre = 0x37,
	FramePost = 0x38,
	GameEnd = 0x39,
	FrameStart = 0x3A,
	Item = 0x3B,
	FrameEnd = 0x3C,
	GeckoList = 0x3D,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameId {
	pub index: i32,
	pub port: u8,
	pub is_follower: bool,
}

/// Callbacks invoked as each object is decoded. All have no-op defaults.
pub trait Handlers {
	fn game_start(&mut self, _: Start) -> Result<()> {
		Ok(())
	}
	fn frame(&mut self, _: Frame) -> Result<()> {
		Ok(())
	}
	fn game_end(&mut self, _: End) -> Result<()> {
		Ok(())
	}
	fn metadata(&mut self, _: Metadata) -> Result<()> {
		Ok(())
	}
	fn metadata_raw(&mut self, _: HashMap<String, Object>) -> Result<()> {
		Ok(())
	}
}

/// Tracks the number of bytes consumed, for error reporting.
struct CountingReader<R> {
	inner: R,
	pos: u64,
}

impl<R: Read> Read for CountingReader<R> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		let n = self.inner.read(buf)?;
		self.pos += n as u64;
		Ok(n)
	}
}

fn expect_bytes<R: Read>(r: &mut R, expected: &[u8]) -> Result<()> {
	let mut actual = vec![0; expected.len()];
	r.read_exact(&mut actual)?;
	if expected == actual.as_slice() {
		Ok(())
	} else {
		Err(ParseErrorKind::BadContainerLiteral {
			expected: expected.to_vec(),
			got: actual,
		}
		.into())
	}
}

fn skip_bytes<R: Read>(r: &mut R, n: usize) -> Result<()> {
	let copied = io::copy(&mut r.by_ref().take(n as u64), &mut io::sink())?;
	match copied == n as u64 {
		true => Ok(()),
		_ => Err(ParseErrorKind::Truncated.into()),
	}
}

/// Reads the Event Payloads event, which must come first in the raw stream
/// and declares the payload size for every other event code. The returned
/// map keys are raw codes (not `Event` values) so unknown event types can be
/// skipped by size.
fn payload_sizes<R: Read>(r: &mut R) -> Result<(usize, HashMap<u8, u16>)> {
	let code = r.read_u8()?;
	if code != PAYLOADS_EVENT_CODE {
		return Err(ParseErrorKind::UnexpectedEvent(format!(
			"expected event payloads (0x35), got: {:#04x}",
			code
		))
		.into());
	}

	// Size of the list of (code, size) pairs. Each pair is 3 bytes, but the
	// declared size includes this size byte itself, hence the off-by-one.
	let size = r.read_u8()?;
	if size % 3 != 1 {
		return Err(ParseErrorKind::UnexpectedEvent(format!(
			"payload-size table size not divisible by 3: {}",
			size
		))
		.into());
	}

	let mut sizes = HashMap::new();
	for _ in (0..size - 1).step_by(3) {
		let code = r.read_u8()?;
		sizes.insert(code, r.read_u16::<BigEndian>()?);
		if Event::try_from(code).is_err() {
			debug!("unknown event type in payload table: {:#04x}", code);
		}
	}

	trace!("event payload sizes: {:?}", sizes);
	Ok((1 + size as usize, sizes))
}

fn decode_shift_jis(bytes: &[u8]) -> String {
	let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
	let (decoded, _) = SHIFT_JIS.decode_without_bom_handling(&bytes[..end]);
	decoded.trim_end().to_string()
}

fn player(v0: &[u8; 36], is_teams: bool) -> Result<Option<Player>> {
	let mut r = &v0[..];
	let character = External::new(r.read_u8()?);
	let r#type = r.read_u8()?;
	let stocks = r.read_u8()?;
	let costume = r.read_u8()?;
	r.read_exact(&mut [0; 3])?; // ???
	let team_shade = r.read_u8()?;
	let handicap = r.read_u8()?;
	let team_color = r.read_u8()?;
	let team = match is_teams {
		true => Some(Team {
			color: TeamColor::new(team_color),
			shade: TeamShade::new(team_shade),
		}),
		_ => None,
	};
	r.read_u16::<BigEndian>()?; // ???
	let bitfield = r.read_u8()?;
	r.read_u16::<BigEndian>()?; // ???
	let cpu_level = r.read_u8()?;
	r.read_u32::<BigEndian>()?; // ???
	let offense_ratio = r.read_f32::<BigEndian>()?;
	let defense_ratio = r.read_f32::<BigEndian>()?;
	let model_scale = r.read_f32::<BigEndian>()?;
	r.read_u32::<BigEndian>()?; // ???

	Ok(match r#type {
		0..=2 => {
			let r#type = PlayerType(r#type);
			Some(Player {
				character,
				cpu_level: match r#type {
					PlayerType::CPU => Some(cpu_level),
					_ => None,
				},
				r#type,
				stocks,
				costume,
				team,
				handicap,
				bitfield,
				offense_ratio,
				defense_ratio,
				model_scale,
				ucf: None,
				name_tag: None,
			})
		}
		_ => None, // empty slot
	})
}

fn game_start(r: &mut &[u8]) -> Result<Start> {
	let slippi = SlippiVersion(r.read_u8()?, r.read_u8()?, r.read_u8()?);
	r.read_u8()?; // build number: obsoleted in 2.0, never nonzero

	let bitfield = [r.read_u8()?, r.read_u8()?, r.read_u8()?, r.read_u8()?];
	r.read_u32::<BigEndian>()?; // ???
	let is_teams = r.read_u8()? != 0;
	r.read_u16::<BigEndian>()?; // ???
	let item_spawn_frequency = r.read_i8()?;
	let self_destruct_score = r.read_i8()?;
	r.read_u8()?; // ???
	let stage = Stage::new(r.read_u16::<BigEndian>()?);
	let timer = r.read_u32::<BigEndian>()?;
	r.read_exact(&mut [0; 15])?; // ???
	let mut item_spawn_bitfield = [0; 5];
	r.read_exact(&mut item_spawn_bitfield)?;
	r.read_u64::<BigEndian>()?; // ???
	let damage_ratio = r.read_f32::<BigEndian>()?;
	r.read_exact(&mut [0; 44])?; // ???

	// per-port blocks @0x65 (file offset)
	let mut players_v0 = [[0; 36]; 4];
	for p in &mut players_v0 {
		r.read_exact(p)?;
	}
	r.read_exact(&mut [0; 72])?; // ???
	let random_seed = r.read_u32::<BigEndian>()?;

	let mut players = [
		player(&players_v0[0], is_teams)?,
		player(&players_v0[1], is_teams)?,
		player(&players_v0[2], is_teams)?,
		player(&players_v0[3], is_teams)?,
	];

	// v1.0: UCF toggles
	if !r.is_empty() {
		for p in &mut players {
			let dash_back = r.read_u32::<BigEndian>()?;
			let shield_drop = r.read_u32::<BigEndian>()?;
			if let Some(p) = p {
				p.ucf = Some(Ucf {
					dash_back: match dash_back {
						0 => None,
						db => Some(DashBack::new(db)),
					},
					shield_drop: match shield_drop {
						0 => None,
						sd => Some(ShieldDrop::new(sd)),
					},
				});
			}
		}
	}

	// v1.3: in-game name tags
	if !r.is_empty() {
		for p in &mut players {
			let mut tag = [0; 16];
			r.read_exact(&mut tag)?;
			if let Some(p) = p {
				p.name_tag = Some(decode_shift_jis(&tag));
			}
		}
	}

	// v1.5
	let is_pal = match r.is_empty() {
		true => None,
		_ => Some(r.read_u8()? != 0),
	};

	// v2.0
	let is_frozen_ps = match r.is_empty() {
		true => None,
		_ => Some(r.read_u8()? != 0),
	};

	// v3.14: skip scene numbers and per-port slippi identities, then the
	// match id block. Intermediate versions end partway through the skip.
	let skip = r.len().min(283);
	*r = &r[skip..];

	let match_id = match r.len() >= 50 {
		true => {
			let mut buf = [0; 50];
			r.read_exact(&mut buf)?;
			let id = decode_shift_jis(&buf);
			match id.is_empty() {
				true => None,
				_ => Some(id),
			}
		}
		_ => None,
	};

	if !r.is_empty() {
		r.read_u8()?; // ???
	}

	let game_number = match r.len() >= 4 {
		true => Some(r.read_u32::<BigEndian>()?),
		_ => None,
	};

	let tiebreak_number = match r.len() >= 4 {
		true => Some(r.read_u32::<BigEndian>()?),
		_ => None,
	};

	Ok(Start {
		slippi,
		bitfield,
		is_teams,
		item_spawn_frequency,
		self_destruct_score,
		stage,
		timer,
		item_spawn_bitfield,
		damage_ratio,
		players,
		random_seed,
		is_pal,
		is_frozen_ps,
		match_id,
		game_number,
		tiebreak_number,
	})
}

fn game_end(r: &mut &[u8]) -> Result<End> {
	let method = EndMethod::new(r.read_u8()?);

	// v2.0
	let lras_initiator = match r.is_empty() {
		true => None,
		_ => match r.read_u8()? {
			port if port < NUM_PORTS as u8 => Some(port),
			_ => None,
		},
	};

	// v3.13
	let player_placements = match r.is_empty() {
		true => None,
		_ => Some([r.read_i8()?, r.read_i8()?, r.read_i8()?, r.read_i8()?]),
	};

	Ok(End {
		method,
		lras_initiator,
		player_placements,
	})
}

fn frame_id(r: &mut &[u8]) -> Result<FrameId> {
	let index = r.read_i32::<BigEndian>()?;
	let port = r.read_u8()?;
	if port >= NUM_PORTS as u8 {
		return Err(ParseErrorKind::UnexpectedEvent(format!("invalid port: {}", port)).into());
	}
	Ok(FrameId {
		index,
		port,
		is_follower: r.read_u8()? != 0,
	})
}

fn read_position(r: &mut &[u8]) -> Result<Position> {
	Ok(Position {
		x: r.read_f32::<BigEndian>()?,
		y: r.read_f32::<BigEndian>()?,
	})
}

fn read_velocity(r: &mut &[u8]) -> Result<Velocity> {
	Ok(Velocity {
		x: r.read_f32::<BigEndian>()?,
		y: r.read_f32::<BigEndian>()?,
	})
}

fn frame_pre(r: &mut &[u8]) -> Result<(FrameId, Pre)> {
	let id = frame_id(r)?;
	trace!("pre-frame update: {:?}", id);

	let random_seed = r.read_u32::<BigEndian>()?;
	let state = ActionState::new(r.read_u16::<BigEndian>()?);
	let position = read_position(r)?;
	let direction = Direction::from_f32(r.read_f32::<BigEndian>()?);
	let joystick = read_position(r)?;
	let cstick = read_position(r)?;
	let trigger_logical = r.read_f32::<BigEndian>()?;
	let buttons = Buttons {
		logical: buttons::Logical(r.read_u32::<BigEndian>()?),
		physical: buttons::Physical(r.read_u16::<BigEndian>()?),
	};
	let triggers = Triggers {
		logical: trigger_logical,
		physical: triggers::Physical {
			l: r.read_f32::<BigEndian>()?,
			r: r.read_f32::<BigEndian>()?,
		},
	};

	// v1.2
	let v1_2 = match r.is_empty() {
		true => None,
		_ => Some(PreV1_2 {
			raw_analog_x: r.read_u8()?,
			// v1.4
			v1_4: match r.is_empty() {
				true => None,
				_ => Some(PreV1_4 {
					damage: r.read_f32::<BigEndian>()?,
				}),
			},
		}),
	};

	Ok((
		id,
		Pre {
			index: id.index,
			random_seed,
			state,
			position,
			direction,
			joystick,
			cstick,
			triggers,
			buttons,
			v1_2,
		},
	))
}

fn frame_post(r: &mut &[u8]) -> Result<(FrameId, Post)> {
	let id = frame_id(r)?;
	trace!("post-frame update: {:?}", id);

	let character = Internal::new(r.read_u8()?);
	let state = ActionState::new(r.read_u16::<BigEndian>()?);
	let position = read_position(r)?;
	let direction = Direction::from_f32(r.read_f32::<BigEndian>()?);
	let damage = r.read_f32::<BigEndian>()?;
	let shield = r.read_f32::<BigEndian>()?;
	let last_attack_landed = match r.read_u8()? {
		0 => None,
		attack => Some(Attack::new(attack)),
	};
	let combo_count = r.read_u8()?;
	let last_hit_by = match r.read_u8()? {
		port if port < NUM_PORTS as u8 => Some(port),
		_ => None,
	};
	let stocks = r.read_u8()?;

	// v0.2
	let v0_2 = match r.is_empty() {
		true => None,
		_ => Some(PostV0_2 {
			state_age: r.read_f32::<BigEndian>()?,
			v2_0: frame_post_v2_0(r)?,
		}),
	};

	Ok((
		id,
		Post {
			index: id.index,
			character,
			state,
			position,
			direction,
			damage,
			shield,
			last_attack_landed,
			combo_count,
			last_hit_by,
			stocks,
			v0_2,
		},
	))
}

fn frame_post_v2_0(r: &mut &[u8]) -> Result<Option<PostV2_0>> {
	if r.is_empty() {
		return Ok(None);
	}
	let flags = {
		let mut buf = [0; 5];
		r.read_exact(&mut buf)?;
		StateFlags::from_bytes(buf)
	};
	let misc_as = r.read_f32::<BigEndian>()?;
	let airborne = r.read_u8()? != 0;
	let ground = r.read_u16::<BigEndian>()?;
	let jumps = r.read_u8()?;
	let l_cancel = match r.read_u8()? {
		0 => None,
		lc => Some(LCancel::new(lc)),
	};

	// v2.1
	let v2_1 = match r.is_empty() {
		true => None,
		_ => Some(PostV2_1 {
			hurtbox_state: HurtboxState::new(r.read_u8()?),
			v3_5: frame_post_v3_5(r)?,
		}),
	};

	Ok(Some(PostV2_0 {
		flags,
		misc_as,
		airborne,
		ground,
		jumps,
		l_cancel,
		v2_1,
	}))
}

fn frame_post_v3_5(r: &mut &[u8]) -> Result<Option<PostV3_5>> {
	if r.is_empty() {
		return Ok(None);
	}
	// air x, shared y, knockback x, knockback y, ground x
	let self_air_x = r.read_f32::<BigEndian>()?;
	let self_y = r.read_f32::<BigEndian>()?;
	let kb_x = r.read_f32::<BigEndian>()?;
	let kb_y = r.read_f32::<BigEndian>()?;
	let self_ground_x = r.read_f32::<BigEndian>()?;

	// v3.8
	let v3_8 = match r.is_empty() {
		true => None,
		_ => Some(PostV3_8 {
			hitlag_remaining: r.read_f32::<BigEndian>()?,
			// v3.11
			v3_11: match r.is_empty() {
				true => None,
				_ => Some(PostV3_11 {
					animation_index: r.read_u32::<BigEndian>()?,
				}),
			},
		}),
	};

	Ok(Some(PostV3_5 {
		self_air_velocity: Velocity {
			x: self_air_x,
			y: self_y,
		},
		knockback_velocity: Velocity { x: kb_x, y: kb_y },
		self_ground_velocity: Velocity {
			x: self_ground_x,
			y: self_y,
		},
		v3_8,
	}))
}

fn item(r: &mut &[u8]) -> Result<(i32, ItemFrame)> {
	let index = r.read_i32::<BigEndian>()?;
	trace!("item update: {}", index);

	let r#type = Item::new(r.read_u16::<BigEndian>()?);
	let state = r.read_u8()?;
	let direction = match r.read_f32::<BigEndian>()? {
		d if d == 0.0 => None,
		d => Some(Direction::from_f32(d)),
	};
	let velocity = read_velocity(r)?;
	let position = read_position(r)?;
	let damage = r.read_u16::<BigEndian>()?;
	let timer = r.read_f32::<BigEndian>()?;
	let spawn_id = r.read_u32::<BigEndian>()?;

	// v3.2
	let v3_2 = match r.is_empty() {
		true => None,
		_ => Some(ItemV3_2 {
			missile_type: MissileType::new(r.read_u8()?),
			turnip_face: TurnipFace::new(r.read_u8()?),
			is_shot_launched: r.read_u8()? != 0,
			charge_power: r.read_u8()?,
			// v3.6
			v3_6: match r.is_empty() {
				true => None,
				_ => Some(ItemV3_6 {
					owner: match r.read_i8()? {
						o if o >= 0 && (o as usize) < NUM_PORTS => Some(o as u8),
						_ => None,
					},
				}),
			},
		}),
	};

	Ok((
		index,
		ItemFrame {
			r#type,
			state,
			direction,
			velocity,
			position,
			damage,
			timer,
			spawn_id,
			v3_2,
		},
	))
}

#[derive(Default)]
struct DataBuilder {
	pre: Option<Pre>,
	post: Option<Post>,
}

impl DataBuilder {
	fn build(self) -> Option<Data> {
		match (self.pre, self.post) {
			(Some(pre), Some(post)) => Some(Data { pre, post }),
			_ => None,
		}
	}
}

#[derive(Default)]
struct PortBuilder {
	leader: DataBuilder,
	follower: Option<DataBuilder>,
}

struct FrameBuilder {
	index: i32,
	ports: [Option<PortBuilder>; NUM_PORTS],
	items: Vec<ItemFrame>,
	start: Option<FrameStart>,
	end: Option<FrameEnd>,
}

impl FrameBuilder {
	fn new(index: i32) -> FrameBuilder {
		FrameBuilder {
			index,
			ports: [None, None, None, None],
			items: Vec::new(),
			start: None,
			end: None,
		}
	}

	fn data(&mut self, id: FrameId) -> &mut DataBuilder {
		let port = self.ports[id.port as usize].get_or_insert_with(PortBuilder::default);
		match id.is_follower {
			true => port.follower.get_or_insert_with(DataBuilder::default),
			_ => &mut port.leader,
		}
	}

	fn finalize(self) -> Frame {
		let index = self.index;
		Frame {
			index,
			ports: self.ports.map(|p| {
				p.and_then(|p| match p.leader.build() {
					Some(leader) => Some(PortData {
						leader,
						follower: p.follower.and_then(DataBuilder::build),
					}),
					_ => {
						// only possible when the stream was cut mid-frame
						debug!("dropping incomplete port data on frame {}", index);
						None
					}
				})
			}),
			items: self.items,
			start: self.start,
			end: self.end,
		}
	}
}

/// Accumulates interleaved frame events into whole frames, emitting each
/// frame to the handler as soon as an event for a different index arrives.
struct Folder<'a, H> {
	handlers: &'a mut H,
	current: Option<FrameBuilder>,
}

impl<H: Handlers> Folder<'_, H> {
	fn roll(&mut self, index: i32) -> Result<&mut FrameBuilder> {
		if self.current.as_ref().map(|c| c.index) != Some(index) {
			if let Some(done) = self.current.take() {
				self.handlers.frame(done.finalize())?;
			}
		}
		Ok(self
			.current
			.get_or_insert_with(|| FrameBuilder::new(index)))
	}

	fn flush(&mut self) -> Result<()> {
		match self.current.take() {
			Some(done) => self.handlers.frame(done.finalize()),
			_ => Ok(()),
		}
	}
}

/// Parses a single event from the raw stream, whose code byte has already
/// been read. Returns the payload size and the recognized event, if any.
fn event<R: Read, H: Handlers>(
	r: &mut R,
	code: u8,
	payload_sizes: &HashMap<u8, u16>,
	folder: &mut Folder<H>,
) -> Result<(usize, Option<Event>)> {
	let size = *payload_sizes
		.get(&code)
		.ok_or(ParseErrorKind::UnknownCode(code))? as usize;
	let mut buf = vec![0; size];
	r.read_exact(&mut buf)?;

	let event = Event::try_from(code).ok();
	if let Some(event) = event {
		let mut r = &*buf;
		use Event::*;
		match event {
			FramePre => {
				let (id, pre) = frame_pre(&mut r)?;
				folder.roll(id.index)?.data(id).pre = Some(pre);
			}
			FramePost => {
				let (id, post) = frame_post(&mut r)?;
				folder.roll(id.index)?.data(id).post = Some(post);
			}
			Item => {
				let (index, item) = item(&mut r)?;
				folder.roll(index)?.items.push(item);
			}
			FrameStart => {
				let index = r.read_i32::<BigEndian>()?;
				let random_seed = r.read_u32::<BigEndian>()?;
				folder.roll(index)?.start = Some(super::frame::FrameStart { random_seed });
			}
			FrameEnd => {
				let index = r.read_i32::<BigEndian>()?;
				folder.roll(index)?.end = Some(super::frame::FrameEnd {});
			}
			GameEnd => folder.handlers.game_end(game_end(&mut r)?)?,
			GameStart => {
				return Err(ParseErrorKind::UnexpectedEvent(
					"second game-start event".to_string(),
				)
				.into());
			}
			// consumed by size and ignored
			GeckoList | MessageSplitter => {}
		}
	}

	Ok((size, event))
}

fn parse_inner<R: Read, H: Handlers>(
	r: &mut CountingReader<R>,
	handlers: &mut H,
	skip_frames: bool,
) -> Result<()> {
	// For speed, assume the `raw` element comes first and match it manually.
	// The official JS parser does this too, so it should be reliable.
	expect_bytes(
		r,
		// top-level opening brace, `raw` key & type ("{U\x03raw[$U#l")
		&[0x7b, 0x55, 0x03, 0x72, 0x61, 0x77, 0x5b, 0x24, 0x55, 0x23, 0x6c],
	)?;

	// zero for an in-progress replay
	let raw_len = r.read_u32::<BigEndian>()? as usize;
	let (mut bytes_read, payload_sizes) = payload_sizes(r)?;

	// the first real event must be the game-start record
	let first = r.read_u8()?;
	if first != Event::GameStart as u8 {
		return Err(ParseErrorKind::UnexpectedEvent(format!(
			"expected game start (0x36), got: {:#04x}",
			first
		))
		.into());
	}
	let start_size = *payload_sizes
		.get(&first)
		.ok_or(ParseErrorKind::UnknownCode(first))? as usize;
	let mut buf = vec![0; start_size];
	r.read_exact(&mut buf)?;
	bytes_read += 1 + start_size;
	handlers.game_start(game_start(&mut &*buf)?)?;

	if skip_frames && raw_len != 0 {
		// seek to the start of the game-end event
		let end_size = *payload_sizes
			.get(&(Event::GameEnd as u8))
			.ok_or(ParseErrorKind::UnknownCode(Event::GameEnd as u8))?
			as usize;
		let skip = raw_len
			.checked_sub(bytes_read + end_size + 1)
			.ok_or(ParseErrorKind::Truncated)?;
		skip_bytes(r, skip)?;
		bytes_read += skip;
	}

	let mut folder = Folder {
		handlers: &mut *handlers,
		current: None,
	};
	let mut last_event: Option<Event> = None;
	let mut ended_at_eof = false;

	while (raw_len == 0 || bytes_read < raw_len) && last_event != Some(Event::GameEnd) {
		let code = match r.read_u8() {
			Ok(code) => code,
			// with no declared length, end-of-stream at an event boundary
			// is how an in-progress replay ends
			Err(e) if raw_len == 0 && e.kind() == io::ErrorKind::UnexpectedEof => {
				ended_at_eof = true;
				break;
			}
			Err(e) => return Err(e.into()),
		};
		let (size, ev) = event(r, code, &payload_sizes, &mut folder)?;
		bytes_read += 1 + size;
		last_event = ev;
	}

	folder.flush()?;

	if raw_len != 0 && bytes_read != raw_len {
		return Err(ParseErrorKind::UnexpectedEvent(format!(
			"consumed {} bytes of a {}-byte event stream",
			bytes_read, raw_len
		))
		.into());
	}

	if ended_at_eof {
		return Ok(());
	}

	// `metadata` key & value. Since we read the opening "{" as part of the
	// literal, `parse_map` consumes the matching "}".
	expect_bytes(
		r,
		&[0x55, 0x08, 0x6d, 0x65, 0x74, 0x61, 0x64, 0x61, 0x74, 0x61, 0x7b],
	)?;
	let raw = ubjson::parse_map(r)?;
	handlers.metadata(Metadata::parse(&raw)?)?;
	handlers.metadata_raw(raw)?;

	expect_bytes(r, &[0x7d])?; // top-level closing brace
	Ok(())
}

/// Parses a replay, passing each decoded object to `handlers` as it occurs.
///
/// With `skip_frames`, all frame events are skipped over: only the start,
/// end, and metadata handlers fire. This is the cheap path for callers that
/// only want match-level information.
pub fn parse<R: Read, H: Handlers>(r: &mut R, handlers: &mut H, skip_frames: bool) -> Result<()> {
	let mut counting = CountingReader { inner: r, pos: 0 };
	parse_inner(&mut counting, handlers, skip_frames).map_err(|e| e.with_pos(counting.pos))
}

/// Parses a replay file. Errors are annotated with the path.
pub fn parse_file<P: AsRef<Path>, H: Handlers>(
	path: P,
	handlers: &mut H,
	skip_frames: bool,
) -> Result<()> {
	let path = path.as_ref();
	let buf = std::fs::read(path)
		.map_err(|e| ParseError::from(ParseErrorKind::Io(e)).with_filename(path))?;
	parse(&mut &buf[..], handlers, skip_frames).map_err(|e| e.with_filename(path))
}
