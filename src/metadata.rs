//! Miscellaneous data not directly provided by the game, parsed from the
//! UBJSON object that trails the event stream.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

use super::character::Internal;
use super::game::{FIRST_FRAME_INDEX, NUM_PORTS};
use super::parse::{ParseError, ParseErrorKind, Result};
use super::ubjson::Object;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Platform {
	Console,
	Dolphin,
	Network,
	Nintendont,
	/// Platform strings we don't recognize are preserved.
	Other(String),
}

impl Platform {
	fn from_str(s: &str) -> Platform {
		match s {
			"console" => Platform::Console,
			"dolphin" => Platform::Dolphin,
			"network" => Platform::Network,
			"nintendont" => Platform::Nintendont,
			other => {
				log::info!("unknown platform: {}", other);
				Platform::Other(other.to_string())
			}
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Netplay {
	/// Connect code, e.g. "CODE#123"
	pub code: String,
	/// Netplay display name
	pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
	/// Character(s) used, with usage duration in frames (Zelda/Sheik can
	/// both appear for one port)
	pub characters: HashMap<Internal, u32>,
	pub netplay: Option<Netplay>,
}

impl Player {
	pub fn connect_code(&self) -> Option<&str> {
		self.netplay.as_ref().map(|n| n.code.as_str())
	}

	pub fn display_name(&self) -> Option<&str> {
		self.netplay.as_ref().map(|n| n.name.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metadata {
	/// Game start time, with the recorded timezone preserved
	pub date: Option<DateTime<FixedOffset>>,
	/// Duration in frames: `1 + last_frame - FIRST_FRAME_INDEX`
	pub duration: Option<usize>,
	pub platform: Option<Platform>,
	pub players: [Option<Player>; NUM_PORTS],
	pub console_name: Option<String>,
}

fn meta_err(msg: impl Into<String>) -> ParseError {
	ParseErrorKind::Metadata(msg.into()).into()
}

/// Parses the `startAt` timestamp: ASCII datetime with optional fractional
/// seconds and timezone offset ("Z", "+HHMM" or nothing, which means UTC).
/// Trailing NULs are tolerated (a Nintendont bug in old recorders).
fn parse_date(raw: &str) -> Result<DateTime<FixedOffset>> {
	let s = raw.trim_end_matches('\0');
	let bad = || meta_err(format!("bad startAt: {:?}", raw));

	if s.len() < 19 || !s.is_ascii() {
		return Err(bad());
	}
	let (datetime, rest) = s.split_at(19);
	let date = NaiveDate::parse_from_str(&datetime[..10], "%Y-%m-%d").map_err(|_| bad())?;
	let time =
		chrono::NaiveTime::parse_from_str(&datetime[11..], "%H:%M:%S").map_err(|_| bad())?;
	if datetime.as_bytes()[10] != b'T' {
		return Err(bad());
	}
	let naive = NaiveDateTime::new(date, time);

	// fractional seconds are recorded by some platforms; ignored here
	let rest = match rest.strip_prefix('.') {
		Some(frac) => {
			let digits = frac.bytes().take_while(|b| b.is_ascii_digit()).count();
			if digits == 0 {
				return Err(bad());
			}
			&frac[digits..]
		}
		_ => rest,
	};

	let offset = match rest {
		"" | "Z" => FixedOffset::east_opt(0),
		_ => {
			let sign = match rest.as_bytes()[0] {
				b'+' => 1,
				b'-' => -1,
				_ => return Err(bad()),
			};
			if rest.len() != 5 || !rest[1..].bytes().all(|b| b.is_ascii_digit()) {
				return Err(bad());
			}
			let hours: i32 = rest[1..3].parse().map_err(|_| bad())?;
			let minutes: i32 = rest[3..5].parse().map_err(|_| bad())?;
			FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
		}
	}
	.ok_or_else(bad)?;

	offset
		.from_local_datetime(&naive)
		.single()
		.ok_or_else(bad)
}

fn parse_player(obj: &HashMap<String, Object>) -> Result<Player> {
	let mut characters = HashMap::new();
	if let Some(chars) = obj.get("characters").and_then(Object::as_map) {
		for (id, frames) in chars {
			let id: u8 = id
				.parse()
				.map_err(|_| meta_err(format!("bad character id: {:?}", id)))?;
			let frames = frames
				.as_int()
				.ok_or_else(|| meta_err("bad character frame count"))?;
			characters.insert(Internal::new(id), frames as u32);
		}
	}

	let netplay = obj.get("names").and_then(Object::as_map).and_then(|names| {
		match (names.get("code"), names.get("netplay")) {
			(Some(Object::Str(code)), Some(Object::Str(name))) => Some(Netplay {
				code: code.clone(),
				name: name.clone(),
			}),
			_ => None,
		}
	});

	Ok(Player { characters, netplay })
}

impl Metadata {
	pub fn parse(obj: &HashMap<String, Object>) -> Result<Metadata> {
		let date = match obj.get("startAt").and_then(Object::as_str) {
			Some(s) => Some(parse_date(s)?),
			_ => None,
		};

		let duration = obj
			.get("lastFrame")
			.and_then(Object::as_int)
			.map(|last| (1 + last - FIRST_FRAME_INDEX as i64) as usize);

		let platform = obj
			.get("playedOn")
			.and_then(Object::as_str)
			.map(Platform::from_str);

		let console_name = obj
			.get("consoleNick")
			.and_then(Object::as_str)
			.map(String::from);

		let mut players: [Option<Player>; NUM_PORTS] = [None, None, None, None];
		if let Some(port_map) = obj.get("players").and_then(Object::as_map) {
			for (port, player) in players.iter_mut().enumerate() {
				if let Some(p) = port_map.get(&port.to_string()).and_then(Object::as_map) {
					*player = Some(parse_player(p)?);
				}
			}
		}

		Ok(Metadata {
			date,
			duration,
			platform,
			players,
			console_name,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn dates_with_and_without_zones() {
		let d = parse_date("2018-06-22T07:52:59Z").unwrap();
		assert_eq!(d.to_rfc3339(), "2018-06-22T07:52:59+00:00");

		let d = parse_date("2018-06-22T07:52:59+0900").unwrap();
		assert_eq!(d.offset().local_minus_utc(), 9 * 3600);
		assert_eq!(d.to_rfc3339(), "2018-06-22T07:52:59+09:00");

		let d = parse_date("2018-06-22T07:52:59.123456Z").unwrap();
		assert_eq!(d.to_rfc3339(), "2018-06-22T07:52:59+00:00");

		// Nintendont NUL padding
		let d = parse_date("2018-06-22T07:52:59\0\0\0").unwrap();
		assert_eq!(d.offset().local_minus_utc(), 0);

		assert!(parse_date("not a date").is_err());
	}

	#[test]
	fn duration_counts_pregame_frames() {
		let mut obj = HashMap::new();
		obj.insert("lastFrame".to_string(), Object::Int(3600));
		let meta = Metadata::parse(&obj).unwrap();
		assert_eq!(meta.duration, Some(3724));
	}

	#[test]
	fn netplay_identity() {
		let mut names = HashMap::new();
		names.insert("code".to_string(), Object::Str("ABCD#123".to_string()));
		names.insert("netplay".to_string(), Object::Str("somebody".to_string()));
		let mut p0 = HashMap::new();
		p0.insert("names".to_string(), Object::Map(names));
		let mut ports = HashMap::new();
		ports.insert("0".to_string(), Object::Map(p0));
		let mut obj = HashMap::new();
		obj.insert("players".to_string(), Object::Map(ports));

		let meta = Metadata::parse(&obj).unwrap();
		let p = meta.players[0].as_ref().unwrap();
		assert_eq!(p.connect_code(), Some("ABCD#123"));
		assert_eq!(p.display_name(), Some("somebody"));
		assert!(meta.players[1].is_none());
	}
}
