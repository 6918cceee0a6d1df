//! Parser for the UBJSON-style metadata object that trails the event
//! stream. Recorders only ever write three value types (length-prefixed
//! strings, 32-bit integers, and maps), so that's all this decodes; any
//! other marker is a malformed file, not a forward-compatibility case.

use std::collections::HashMap;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use super::parse::{ParseError, ParseErrorKind, Result};

// UBJSON type markers are ASCII bytes.
pseudo_enum!(Marker: u8 {
	0x53 => STRING,
	0x55 => UINT8,
	0x6c => INT32,
	0x7b => OBJECT_OPEN,
	0x7d => OBJECT_CLOSE,
});

#[derive(Debug, PartialEq, Eq, Clone, serde::Serialize)]
#[serde(untagged)]
pub enum Object {
	Int(i64),
	Map(HashMap<String, Object>),
	Str(String),
}

impl Object {
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Object::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Object::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&HashMap<String, Object>> {
		match self {
			Object::Map(m) => Some(m),
			_ => None,
		}
	}
}

fn malformed(what: &str, marker: Marker) -> ParseError {
	ParseErrorKind::Metadata(format!("bad {} marker: {:?}", what, marker)).into()
}

/// A uint8-length-prefixed string, used both for keys and (behind a
/// `STRING` marker) for values.
fn sized_string<R: Read>(r: &mut R) -> Result<String> {
	let length = r.read_u8()? as usize;
	let mut buf = vec![0; length];
	r.read_exact(&mut buf)?;
	String::from_utf8(buf)
		.map_err(|e| ParseErrorKind::Metadata(format!("string is not UTF-8: {}", e)).into())
}

fn value<R: Read>(r: &mut R) -> Result<Object> {
	match Marker(r.read_u8()?) {
		// strings carry a nested marker for their length type
		Marker::STRING => match Marker(r.read_u8()?) {
			Marker::UINT8 => Ok(Object::Str(sized_string(r)?)),
			other => Err(malformed("string length", other)),
		},
		Marker::INT32 => Ok(Object::Int(r.read_i32::<BigEndian>()? as i64)),
		Marker::OBJECT_OPEN => Ok(Object::Map(parse_map(r)?)),
		other => Err(malformed("value", other)),
	}
}

/// Parses the body of a map whose opening marker has already been consumed,
/// through the matching close marker.
pub fn parse_map<R: Read>(r: &mut R) -> Result<HashMap<String, Object>> {
	let mut map = HashMap::new();
	loop {
		match Marker(r.read_u8()?) {
			Marker::OBJECT_CLOSE => return Ok(map),
			Marker::UINT8 => {
				let key = sized_string(r)?;
				map.insert(key, value(r)?);
			}
			other => return Err(malformed("key", other)),
		}
	}
}
