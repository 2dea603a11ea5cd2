//! The `key:type:value` tag grammar stored inside a record's name.
//!
//! A tagged name looks like `@<tag-1>;<tag-2>;...;<original-name>`. Tags are
//! always prepended, so the segment after the last `;` is the untagged name.

use std::fmt;
use std::str::{self,FromStr};

use indexmap::IndexMap;

use super::{Error, Field, Mode, Result};

const NAME_PREFIX: u8 = b'@';
const TAG_SEP: u8 = b';';
const PART_SEP: u8 = b':';

/// Wire type of a tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
	Int,
	Text,
	Float,
}

impl TagType {
	pub fn code(self) -> u8 {
		match self {
			TagType::Int   => b'i',
			TagType::Text  => b'Z',
			TagType::Float => b'f',
		}
	}
	
	pub fn from_code(code: &[u8]) -> Option<TagType> {
		match code {
			b"i" => Some(TagType::Int),
			b"Z" => Some(TagType::Text),
			b"f" => Some(TagType::Float),
			_    => None,
		}
	}
}

impl fmt::Display for TagType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.code() as char)
	}
}

/// A decoded tag value. Text payloads keep the record's representation.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue<F> {
	Int(i64),
	Float(f64),
	Text(F),
}

impl<F: Field> TagValue<F> {
	pub fn kind(&self) -> TagType {
		match *self {
			TagValue::Int(_)   => TagType::Int,
			TagValue::Float(_) => TagType::Float,
			TagValue::Text(_)  => TagType::Text,
		}
	}
	
	pub fn as_int(&self) -> Option<i64> {
		match *self { TagValue::Int(v) => Some(v), _ => None }
	}
	
	pub fn as_float(&self) -> Option<f64> {
		match *self { TagValue::Float(v) => Some(v), _ => None }
	}
	
	pub fn as_text(&self) -> Option<&F> {
		match *self { TagValue::Text(ref v) => Some(v), _ => None }
	}
}

/// A value that can be stored as a tag: an integer, a float, text or bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Int(i64),
	Float(f64),
	Str(String),
	Bytes(Vec<u8>),
}

macro_rules! value_from(($($ty:ty => $variant:ident),*) => {$(
	impl From<$ty> for Value {
		fn from(v: $ty) -> Value { Value::$variant(v.into()) }
	}
)*});

value_from!(
	i8 => Int, i16 => Int, i32 => Int, i64 => Int, u8 => Int, u16 => Int, u32 => Int,
	f32 => Float, f64 => Float,
	String => Str, &str => Str,
	Vec<u8> => Bytes, &[u8] => Bytes
);

macro_rules! value_try_from(($($ty:ty),*) => {$(
	impl TryFrom<$ty> for Value {
		type Error = Error;
		
		fn try_from(v: $ty) -> Result<Value> {
			i64::try_from(v).map(Value::Int).map_err(|_| Error::IntegerOverflow(v.to_string()))
		}
	}
)*});

value_try_from!(u64, usize, i128, u128);

impl<F: Field> From<TagValue<F>> for Value {
	fn from(v: TagValue<F>) -> Value {
		match v {
			TagValue::Int(i)   => Value::Int(i),
			TagValue::Float(f) => Value::Float(f),
			TagValue::Text(t)  => t.into(),
		}
	}
}

fn is_reserved(byte: u8) -> bool {
	matches!(byte, TAG_SEP | PART_SEP | b'\n' | b'\r')
}

fn check_text(text: &[u8]) -> Result<()> {
	if text.iter().any(|&b| is_reserved(b)) {
		return Err(Error::ReservedCharacter(String::from_utf8_lossy(text).into_owned()));
	}
	Ok(())
}

/// Check that `key` can be used as a tag key.
pub fn check_key(key: &str) -> Result<()> {
	if key.is_empty() {
		return Err(Error::EmptyTagKey);
	}
	check_text(key.as_bytes())
}

/// Append `key:type:value` for a record held in `mode` to `out`.
pub fn encode_tag(key: &str, value: Value, mode: Mode, out: &mut Vec<u8>) -> Result<()> {
	check_key(key)?;
	out.extend_from_slice(key.as_bytes());
	out.push(PART_SEP);
	match value {
		Value::Int(v) => {
			out.extend_from_slice(&[TagType::Int.code(), PART_SEP]);
			out.extend_from_slice(itoa::Buffer::new().format(v).as_bytes());
		}
		Value::Float(v) => {
			out.extend_from_slice(&[TagType::Float.code(), PART_SEP]);
			out.extend_from_slice(format!("{:?}", v).as_bytes());
		}
		Value::Str(s) => {
			check_text(s.as_bytes())?;
			out.extend_from_slice(&[TagType::Text.code(), PART_SEP]);
			out.extend_from_slice(s.as_bytes());
		}
		Value::Bytes(b) => {
			if mode == Mode::Text {
				str::from_utf8(&b)?;
			}
			check_text(&b)?;
			out.extend_from_slice(&[TagType::Text.code(), PART_SEP]);
			out.extend_from_slice(&b);
		}
	}
	Ok(())
}

/// Tag segments of `name`, excluding the trailing original name.
fn segments(name: &[u8]) -> impl Iterator<Item = &[u8]> {
	let body = name.get(1..).unwrap_or_default();
	let n = body.iter().filter(|&&b| b == TAG_SEP).count();
	body.split(|&b| b == TAG_SEP).take(n)
}

/// The untagged name: everything after the `@` and the last `;`.
pub fn original_name(name: &[u8]) -> &[u8] {
	let body = name.get(1..).unwrap_or_default();
	body.rsplit(|&b| b == TAG_SEP).next().unwrap_or(body)
}

/// Prepend `@<encoded tags>;` to the untagged part of `name`.
///
/// Returns `None` if there was nothing to encode.
pub fn prepend<I>(name: &[u8], tags: I, mode: Mode) -> Result<Option<Vec<u8>>>
	where I: IntoIterator<Item = (String, Value)>
{
	let mut out = vec![NAME_PREFIX];
	let mut empty = true;
	for (key, value) in tags {
		if !empty {
			out.push(TAG_SEP);
		}
		encode_tag(&key, value, mode, &mut out)?;
		empty = false;
	}
	if empty {
		return Ok(None);
	}
	out.push(TAG_SEP);
	out.extend_from_slice(name.get(1..).unwrap_or_default());
	Ok(Some(out))
}

fn parse_number<T: FromStr>(segment: &[u8], value: &[u8]) -> Result<T> {
	str::from_utf8(value).ok()
		.and_then(|v| v.parse().ok())
		.ok_or_else(|| Error::InvalidTagValue(String::from_utf8_lossy(segment).into_owned()))
}

fn decode_tag<F: Field>(segment: &[u8]) -> Result<(String, TagValue<F>)> {
	let mut parts = segment.split(|&b| b == PART_SEP);
	let (key, code, value) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
		(Some(k), Some(t), Some(v), None) => (k, t, v),
		_ => return Err(Error::MalformedTag(String::from_utf8_lossy(segment).into_owned())),
	};
	let key = str::from_utf8(key)?.to_owned();
	let value = match TagType::from_code(code) {
		Some(TagType::Int)   => TagValue::Int(parse_number(segment, value)?),
		Some(TagType::Float) => TagValue::Float(parse_number(segment, value)?),
		Some(TagType::Text)  => TagValue::Text(F::from_bytes(value.to_vec())?),
		None => return Err(Error::UnknownTagType(
			String::from_utf8_lossy(segment).into_owned(),
			String::from_utf8_lossy(code).into_owned(),
		)),
	};
	Ok((key, value))
}

/// Decode every tag in `name`, in name order.
///
/// Fails on the first malformed segment; no partial mapping is returned. When
/// a key repeats, the occurrence nearest the original name wins.
pub fn decode<F: Field>(name: &[u8]) -> Result<IndexMap<String, TagValue<F>>> {
	let mut tags = IndexMap::new();
	for segment in segments(name) {
		let (key, value) = decode_tag::<F>(segment)?;
		tags.insert(key, value);
	}
	Ok(tags)
}

#[cfg(test)]
mod tests {
	use super::*;
	
	fn encode(key: &str, value: impl Into<Value>) -> Result<String> {
		let mut out = Vec::new();
		encode_tag(key, value.into(), Mode::Text, &mut out)?;
		Ok(String::from_utf8(out).unwrap())
	}
	
	#[test]
	fn encodes_each_value_kind() {
		assert_eq!(encode("BC", "ACGT").unwrap(), "BC:Z:ACGT");
		assert_eq!(encode("BC", b"ACGT".to_vec()).unwrap(), "BC:Z:ACGT");
		assert_eq!(encode("NH", 42).unwrap(), "NH:i:42");
		assert_eq!(encode("NH", -7i64).unwrap(), "NH:i:-7");
		assert_eq!(encode("AS", 1.0).unwrap(), "AS:f:1.0");
		assert_eq!(encode("AS", 0.25).unwrap(), "AS:f:0.25");
	}
	
	#[test]
	fn wide_integers_convert_when_they_fit() {
		assert_eq!(Value::try_from(42usize).unwrap(), Value::Int(42));
		assert_eq!(Value::try_from(i64::MAX as u64).unwrap(), Value::Int(i64::MAX));
		assert!(matches!(Value::try_from(u64::MAX), Err(Error::IntegerOverflow(_))));
		assert!(matches!(Value::try_from(-1i128 << 70), Err(Error::IntegerOverflow(_))));
	}
	
	#[test]
	fn refuses_text_that_would_break_the_grammar() {
		assert!(matches!(encode("B:C", "A"), Err(Error::ReservedCharacter(_))));
		assert!(matches!(encode("BC", "A;C"), Err(Error::ReservedCharacter(_))));
		assert!(matches!(encode("", 1), Err(Error::EmptyTagKey)));
	}
	
	#[test]
	fn bytes_must_be_text_for_text_records() {
		let mut out = Vec::new();
		let err = encode_tag("BC", vec![0xffu8].into(), Mode::Text, &mut out).unwrap_err();
		assert!(matches!(err, Error::TypeMismatch(_)));
		out.clear();
		encode_tag("BC", vec![0xffu8].into(), Mode::Binary, &mut out).unwrap();
		assert_eq!(out, b"BC:Z:\xff");
	}
	
	#[test]
	fn decodes_typed_values() {
		let tags = decode::<String>(b"@BC:Z:ACGT;NH:i:3;AS:f:0.5;read_1").unwrap();
		assert_eq!(tags.len(), 3);
		assert_eq!(tags["BC"], TagValue::Text("ACGT".to_owned()));
		assert_eq!(tags["NH"], TagValue::Int(3));
		assert_eq!(tags["AS"], TagValue::Float(0.5));
		assert_eq!(tags.keys().collect::<Vec<_>>(), ["BC", "NH", "AS"]);
	}
	
	#[test]
	fn untagged_names_have_no_tags() {
		assert!(decode::<Vec<u8>>(b"@read_1 1:N:0").unwrap().is_empty());
		assert!(decode::<Vec<u8>>(b"").unwrap().is_empty());
	}
	
	#[test]
	fn malformed_segments_fail() {
		assert!(matches!(decode::<String>(b"@bad_no_colon;orig"), Err(Error::MalformedTag(_))));
		assert!(matches!(decode::<String>(b"@a:Z:b:c;orig"), Err(Error::MalformedTag(_))));
		assert!(matches!(decode::<String>(b"@BC:X:ACGT;orig"), Err(Error::UnknownTagType(_, _))));
		assert!(matches!(decode::<String>(b"@NH:i:three;orig"), Err(Error::InvalidTagValue(_))));
	}
	
	#[test]
	fn later_duplicates_win() {
		let tags = decode::<String>(b"@NH:i:2;NH:i:1;orig").unwrap();
		assert_eq!(tags["NH"], TagValue::Int(1));
	}
	
	#[test]
	fn original_name_is_the_last_segment() {
		assert_eq!(original_name(b"@BC:Z:AC;NH:i:1;read_1"), b"read_1");
		assert_eq!(original_name(b"@read_1"), b"read_1");
		assert_eq!(original_name(b""), b"");
	}
	
	#[test]
	fn prepends_ahead_of_existing_tags() {
		let name = prepend(b"@NH:i:1;read_1", vec![("BC".to_owned(), Value::from("AC"))], Mode::Text).unwrap();
		assert_eq!(name.unwrap(), b"@BC:Z:AC;NH:i:1;read_1");
		assert_eq!(prepend(b"@read_1", Vec::new(), Mode::Text).unwrap(), None);
	}
	
	#[test]
	fn type_codes_round_trip() {
		for kind in [TagType::Int, TagType::Text, TagType::Float] {
			assert_eq!(TagType::from_code(&[kind.code()]), Some(kind));
		}
		assert_eq!(TagType::from_code(b"B"), None);
		assert_eq!(TagType::Text.to_string(), "Z");
	}
}
