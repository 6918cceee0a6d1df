//! Synthetic replay builder: emits the exact container framing (payload
//! table, game start, frame events, game end, metadata) so decoder behavior
//! can be pinned without fixture files.

#![allow(dead_code)]

pub const PRE_SIZE: u16 = 63; // through v1.4
pub const POST_SIZE: u16 = 80; // through v3.11
pub const PRE_SIZE_V0: u16 = 58; // pre-v1.2
pub const POST_SIZE_V0: u16 = 33; // pre-v0.2
pub const END_SIZE: u16 = 6; // through v3.13
pub const FRAME_START_SIZE: u16 = 8;
pub const FRAME_END_SIZE: u16 = 4;
pub const ITEM_SIZE: u16 = 42; // through v3.6

fn push_f32(buf: &mut Vec<u8>, v: f32) {
	buf.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
	buf.extend_from_slice(&v.to_be_bytes());
}

fn push_u16(buf: &mut Vec<u8>, v: u16) {
	buf.extend_from_slice(&v.to_be_bytes());
}

fn push_i32(buf: &mut Vec<u8>, v: i32) {
	buf.extend_from_slice(&v.to_be_bytes());
}

/// A game-start payload. Size depends on `version`: 320 bytes for pre-1.0
/// recorders, through 760 for 3.14+.
pub fn game_start_payload(
	version: (u8, u8, u8),
	players: [Option<(u8, u8)>; 4], // (css character, starting stocks)
	stage: u16,
	match_id: Option<&str>,
) -> Vec<u8> {
	let mut buf = Vec::new();
	buf.extend_from_slice(&[version.0, version.1, version.2, 0]);
	buf.extend_from_slice(&[0; 4]); // game bitfields
	buf.extend_from_slice(&[0; 4]);
	buf.push(0); // is_teams
	buf.extend_from_slice(&[0; 2]);
	buf.push(0xff); // item spawn frequency (-1: off)
	buf.push(0xff); // self destruct score
	buf.push(0);
	push_u16(&mut buf, stage);
	push_u32(&mut buf, 480 * 60); // timer
	buf.extend_from_slice(&[0; 15]);
	buf.extend_from_slice(&[0; 5]); // item spawn bitfield
	buf.extend_from_slice(&[0; 8]);
	push_f32(&mut buf, 1.0); // damage ratio
	buf.extend_from_slice(&[0; 44]);

	for slot in &players {
		let mut block = [0u8; 36];
		match slot {
			Some((character, stocks)) => {
				block[0] = *character;
				block[1] = 0; // human
				block[2] = *stocks;
				block[3] = 0; // costume
			}
			None => {
				block[1] = 3; // empty
			}
		}
		buf.extend_from_slice(&block);
	}
	buf.extend_from_slice(&[0; 72]);
	push_u32(&mut buf, 0x12345678); // random seed
	assert_eq!(buf.len(), 320);

	if version < (1, 0, 0) {
		return buf;
	}
	for slot in &players {
		let (db, sd) = match slot {
			Some(_) => (1u32, 1u32), // UCF
			None => (0, 0),
		};
		push_u32(&mut buf, db);
		push_u32(&mut buf, sd);
	}

	if version < (1, 3, 0) {
		return buf;
	}
	buf.extend_from_slice(&[0; 64]); // name tags

	if version < (1, 5, 0) {
		return buf;
	}
	buf.push(0); // is_pal

	if version < (2, 0, 0) {
		return buf;
	}
	buf.push(0); // is_frozen_ps

	if version < (3, 14, 0) {
		return buf;
	}
	buf.extend_from_slice(&[0; 283]); // scene + slippi identities
	let mut id = [0u8; 50];
	if let Some(m) = match_id {
		id[..m.len()].copy_from_slice(m.as_bytes());
	}
	buf.extend_from_slice(&id);
	buf.push(0);
	push_u32(&mut buf, 1); // game number
	push_u32(&mut buf, 0); // tiebreak number
	assert_eq!(buf.len(), 760);
	buf
}

/// Everything needed to fabricate one port's pre+post pair on one frame.
#[derive(Clone, Debug)]
pub struct FrameSpec {
	pub state: u16,
	pub position: (f32, f32),
	pub direction: f32,
	pub joystick: (f32, f32),
	pub cstick: (f32, f32),
	pub phys_buttons: u16,
	pub triggers: (f32, f32),
	pub character: u8,
	pub percent: f32,
	pub stocks: u8,
	pub last_attack: u8,
	pub flags2: u8,
	pub flags4: u8,
	pub airborne: bool,
	pub ground: u16,
	pub l_cancel: u8,
	pub kb: (f32, f32),
}

impl Default for FrameSpec {
	fn default() -> FrameSpec {
		FrameSpec {
			state: 14, // WAIT
			position: (0.0, 0.0),
			direction: 1.0,
			joystick: (0.0, 0.0),
			cstick: (0.0, 0.0),
			phys_buttons: 0,
			triggers: (0.0, 0.0),
			character: 2, // falcon (internal)
			percent: 0.0,
			stocks: 4,
			last_attack: 0,
			flags2: 0,
			flags4: 0,
			airborne: false,
			ground: 1,
			l_cancel: 0,
			kb: (0.0, 0.0),
		}
	}
}

/// FramePre event bytes (code + payload), full modern size.
pub fn frame_pre(index: i32, port: u8, spec: &FrameSpec) -> Vec<u8> {
	frame_pre_for(index, port, false, spec)
}

pub fn frame_pre_for(index: i32, port: u8, follower: bool, spec: &FrameSpec) -> Vec<u8> {
	let mut buf = vec![0x37];
	push_i32(&mut buf, index);
	buf.push(port);
	buf.push(follower as u8);
	push_u32(&mut buf, 0); // random seed
	push_u16(&mut buf, spec.state);
	push_f32(&mut buf, spec.position.0);
	push_f32(&mut buf, spec.position.1);
	push_f32(&mut buf, spec.direction);
	push_f32(&mut buf, spec.joystick.0);
	push_f32(&mut buf, spec.joystick.1);
	push_f32(&mut buf, spec.cstick.0);
	push_f32(&mut buf, spec.cstick.1);
	push_f32(&mut buf, spec.triggers.0.max(spec.triggers.1)); // logical
	push_u32(&mut buf, 0); // logical buttons
	push_u16(&mut buf, spec.phys_buttons);
	push_f32(&mut buf, spec.triggers.0);
	push_f32(&mut buf, spec.triggers.1);
	buf.push(0); // raw analog x
	push_f32(&mut buf, spec.percent);
	assert_eq!(buf.len(), 1 + PRE_SIZE as usize);
	buf
}

/// FramePost event bytes (code + payload), full modern size.
pub fn frame_post(index: i32, port: u8, spec: &FrameSpec) -> Vec<u8> {
	frame_post_for(index, port, false, spec)
}

pub fn frame_post_for(index: i32, port: u8, follower: bool, spec: &FrameSpec) -> Vec<u8> {
	let mut buf = vec![0x38];
	push_i32(&mut buf, index);
	buf.push(port);
	buf.push(follower as u8);
	buf.push(spec.character);
	push_u16(&mut buf, spec.state);
	push_f32(&mut buf, spec.position.0);
	push_f32(&mut buf, spec.position.1);
	push_f32(&mut buf, spec.direction);
	push_f32(&mut buf, spec.percent);
	push_f32(&mut buf, 60.0); // shield
	buf.push(spec.last_attack);
	buf.push(0); // combo count
	buf.push(6); // last hit by: none
	buf.push(spec.stocks);
	push_f32(&mut buf, 1.0); // state age
	buf.extend_from_slice(&[0, spec.flags2, 0, spec.flags4, 0]);
	push_f32(&mut buf, 0.0); // misc
	buf.push(spec.airborne as u8);
	push_u16(&mut buf, spec.ground);
	buf.push(1); // jumps
	buf.push(spec.l_cancel);
	buf.push(0); // hurtbox
	push_f32(&mut buf, 0.0); // self air x
	push_f32(&mut buf, 0.0); // shared y
	push_f32(&mut buf, spec.kb.0);
	push_f32(&mut buf, spec.kb.1);
	push_f32(&mut buf, 0.0); // self ground x
	push_f32(&mut buf, 0.0); // hitlag remaining
	push_u32(&mut buf, 0); // animation index
	assert_eq!(buf.len(), 1 + POST_SIZE as usize);
	buf
}

/// Truncated pre-v1.2 / pre-v0.2 variants, for version-gating tests.
pub fn frame_pre_v0(index: i32, port: u8, spec: &FrameSpec) -> Vec<u8> {
	frame_pre_sized(index, port, spec, PRE_SIZE_V0)
}

pub fn frame_post_v0(index: i32, port: u8, spec: &FrameSpec) -> Vec<u8> {
	frame_post_sized(index, port, spec, POST_SIZE_V0)
}

/// Pre payload cut at an arbitrary schema boundary. Fields are written in
/// wire order, so truncation reproduces any older recorder exactly.
pub fn frame_pre_sized(index: i32, port: u8, spec: &FrameSpec, size: u16) -> Vec<u8> {
	let mut buf = frame_pre(index, port, spec);
	buf.truncate(1 + size as usize);
	buf
}

pub fn frame_post_sized(index: i32, port: u8, spec: &FrameSpec, size: u16) -> Vec<u8> {
	let mut buf = frame_post(index, port, spec);
	buf.truncate(1 + size as usize);
	buf
}

/// Both halves for both ports on one frame.
pub fn full_frame(index: i32, p0: &FrameSpec, p1: &FrameSpec) -> Vec<u8> {
	let mut buf = Vec::new();
	buf.extend(frame_pre(index, 0, p0));
	buf.extend(frame_pre(index, 1, p1));
	buf.extend(frame_post(index, 0, p0));
	buf.extend(frame_post(index, 1, p1));
	buf
}

pub fn game_end(placements: Option<[i8; 4]>) -> Vec<u8> {
	let mut buf = vec![0x39, 2]; // method: GAME
	buf.push(0xff); // no LRAS initiator
	buf.extend_from_slice(
		&placements
			.unwrap_or([0, 1, -1, -1])
			.map(|p| p as u8),
	);
	assert_eq!(buf.len(), 1 + END_SIZE as usize);
	buf
}

// UBJSON metadata helpers. The builder output starts after the opening "{"
// (which the parser consumes as part of the `metadata` literal) and includes
// the closing "}".

fn ub_key(buf: &mut Vec<u8>, name: &str) {
	buf.push(0x55);
	buf.push(name.len() as u8);
	buf.extend_from_slice(name.as_bytes());
}

fn ub_str(buf: &mut Vec<u8>, value: &str) {
	buf.extend_from_slice(&[0x53, 0x55, value.len() as u8]);
	buf.extend_from_slice(value.as_bytes());
}

fn ub_i32(buf: &mut Vec<u8>, value: i32) {
	buf.push(0x6c);
	buf.extend_from_slice(&value.to_be_bytes());
}

pub fn metadata(last_frame: i32, codes: [Option<&str>; 2]) -> Vec<u8> {
	let mut buf = Vec::new();
	ub_key(&mut buf, "startAt");
	ub_str(&mut buf, "2023-01-01T00:00:00Z");
	ub_key(&mut buf, "lastFrame");
	ub_i32(&mut buf, last_frame);
	ub_key(&mut buf, "playedOn");
	ub_str(&mut buf, "dolphin");
	ub_key(&mut buf, "players");
	buf.push(0x7b);
	for (port, code) in codes.iter().enumerate() {
		ub_key(&mut buf, &port.to_string());
		buf.push(0x7b);
		ub_key(&mut buf, "characters");
		buf.push(0x7b);
		ub_key(&mut buf, "2"); // internal falcon
		ub_i32(&mut buf, last_frame + 123 + 1);
		buf.push(0x7d);
		if let Some(code) = code {
			ub_key(&mut buf, "names");
			buf.push(0x7b);
			ub_key(&mut buf, "code");
			ub_str(&mut buf, code);
			ub_key(&mut buf, "netplay");
			ub_str(&mut buf, "tester");
			buf.push(0x7d);
		}
		buf.push(0x7d);
	}
	buf.push(0x7d); // players
	buf.push(0x7d); // metadata
	buf
}

/// Standard payload-size table for fully modern events.
pub fn modern_sizes(start_size: u16) -> Vec<(u8, u16)> {
	vec![
		(0x36, start_size),
		(0x37, PRE_SIZE),
		(0x38, POST_SIZE),
		(0x39, END_SIZE),
		(0x3a, FRAME_START_SIZE),
		(0x3b, ITEM_SIZE),
		(0x3c, FRAME_END_SIZE),
	]
}

/// Assembles a container with a zero `raw` length: an in-progress replay,
/// ending mid-stream with no metadata.
pub fn build_in_progress(sizes: &[(u8, u16)], start_payload: &[u8], events: &[u8]) -> Vec<u8> {
	let mut out = b"{U\x03raw[$U#l".to_vec();
	out.extend_from_slice(&0u32.to_be_bytes());
	out.push(0x35);
	out.push((3 * sizes.len() + 1) as u8);
	for (code, size) in sizes {
		out.push(*code);
		out.extend_from_slice(&size.to_be_bytes());
	}
	out.push(0x36);
	out.extend_from_slice(start_payload);
	out.extend_from_slice(events);
	out
}

/// Assembles a complete container.
pub fn build_replay(
	sizes: &[(u8, u16)],
	start_payload: &[u8],
	events: &[u8],
	metadata_body: &[u8],
) -> Vec<u8> {
	let mut raw = vec![0x35, (3 * sizes.len() + 1) as u8];
	for (code, size) in sizes {
		raw.push(*code);
		raw.extend_from_slice(&size.to_be_bytes());
	}
	raw.push(0x36);
	raw.extend_from_slice(start_payload);
	raw.extend_from_slice(events);

	let mut out = b"{U\x03raw[$U#l".to_vec();
	out.extend_from_slice(&(raw.len() as u32).to_be_bytes());
	out.extend_from_slice(&raw);
	out.extend_from_slice(b"U\x08metadata{");
	out.extend_from_slice(metadata_body);
	out.push(0x7d);
	out
}

/// A complete two-human-player replay with the given per-frame specs,
/// starting at frame -123.
pub fn two_player_replay(frames: &[(FrameSpec, FrameSpec)]) -> Vec<u8> {
	let start = game_start_payload(
		(3, 14, 0),
		[Some((0, 4)), Some((0, 4)), None, None],
		31, // battlefield
		Some("mode.unranked-2023-01-01T00:00:00.00-0"),
	);
	let mut events = Vec::new();
	for (i, (p0, p1)) in frames.iter().enumerate() {
		events.extend(full_frame(-123 + i as i32, p0, p1));
	}
	events.extend(game_end(None));
	let last_frame = -123 + frames.len() as i32 - 1;
	build_replay(
		&modern_sizes(start.len() as u16),
		&start,
		&events,
		&metadata(last_frame, [Some("ABCD#123"), Some("WXYZ#456")]),
	)
}
