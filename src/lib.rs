//! FASTQ records with typed tags embedded in the read name.
//!
//! A record's name can carry BAM-like `key:type:value` annotations ahead of
//! the original name, e.g. `@BC:Z:ACGT;UMI:i:7;read_1`.

#[macro_use] extern crate quick_error;
#[macro_use] extern crate log;

use std::borrow::Cow;
use std::fmt;
use std::io::{self,BufRead};

pub mod bytes;
pub mod error;
pub mod generator;
pub mod lines;
pub mod reader;
pub mod record;
pub mod tags;
pub mod text;

pub use bytes::BytesRecord;
pub use error::{Error, Result};
pub use generator::{ExtractedTag, Stamped, Tag, TagGenerator};
pub use lines::Lines;
pub use reader::{FileReader, LengthEstimate, Reader};
pub use record::Record;
pub use tags::{TagType, TagValue, Value};
pub use text::StrRecord;

/// How lines are read and fields are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	Text,
	Binary,
}

impl fmt::Display for Mode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Mode::Text   => f.write_str("text"),
			Mode::Binary => f.write_str("binary"),
		}
	}
}

/// The representation kind of a record's fields.
///
/// Implemented by `String` (text) and `Vec<u8>` (binary). All four fields of a
/// [`Record`] share one implementation for the record's lifetime.
pub trait Field: Clone + fmt::Debug + PartialEq + Into<Value> {
	/// Mode the line source must be opened in.
	const MODE: Mode;
	
	/// Read one line, keeping its terminator. `None` at end of input.
	fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<Self>>;
	
	/// Raw bytes of the field.
	fn as_bytes(&self) -> &[u8];
	/// Build a field from raw bytes. Fails for text if the bytes are not UTF-8.
	fn from_bytes(bytes: Vec<u8>) -> Result<Self>;
	/// The field as text. Fails for binary fields that are not UTF-8.
	fn to_text(&self) -> Result<Cow<str>>;
	
	/// Number of symbols: characters for text, bytes for binary.
	fn length(&self) -> usize;
	/// Half-open `[start, end)` slice by symbol, clamped to the field.
	fn slice(&self, start: usize, end: usize) -> Self;
	/// Drop one trailing `\n` or `\r\n`, if any.
	fn trim_terminator(&mut self);
}
