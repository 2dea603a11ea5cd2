//! Textual records: every field is a `String`.

use std::borrow::Cow;
use std::io::{self,BufRead};

use super::{Field, Mode, Record, Result};

/// A FASTQ record read in text mode.
pub type StrRecord = Record<String>;

impl Field for String {
	const MODE: Mode = Mode::Text;
	
	fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
		let mut line = String::new();
		match reader.read_line(&mut line)? {
			0 => Ok(None),
			_ => Ok(Some(line)),
		}
	}
	
	fn as_bytes(&self) -> &[u8] { self.as_str().as_bytes() }
	fn from_bytes(bytes: Vec<u8>) -> Result<String> { Ok(String::from_utf8(bytes)?) }
	fn to_text(&self) -> Result<Cow<str>> { Ok(Cow::Borrowed(self.as_str())) }
	
	fn length(&self) -> usize { self.chars().count() }
	
	fn slice(&self, start: usize, end: usize) -> String {
		self.chars().skip(start).take(end.saturating_sub(start)).collect()
	}
	
	fn trim_terminator(&mut self) {
		if self.ends_with('\n') {
			self.pop();
			if self.ends_with('\r') {
				self.pop();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;
	
	#[test]
	fn lines_keep_their_terminator() {
		let mut input = Cursor::new("@r1\nACGT");
		assert_eq!(String::read_line(&mut input).unwrap().as_deref(), Some("@r1\n"));
		assert_eq!(String::read_line(&mut input).unwrap().as_deref(), Some("ACGT"));
		assert_eq!(String::read_line(&mut input).unwrap(), None);
	}
	
	#[test]
	fn slicing_clamps_to_the_field() {
		let seq = "ACGTACGT".to_owned();
		assert_eq!(seq.slice(2, 5), "GTA");
		assert_eq!(seq.slice(6, 20), "GT");
		assert_eq!(seq.slice(20, 30), "");
		assert_eq!(seq.slice(5, 2), "");
	}
	
	#[test]
	fn trims_unix_and_windows_terminators() {
		let mut unix = "ACGT\n".to_owned();
		let mut windows = "ACGT\r\n".to_owned();
		let mut bare = "ACGT".to_owned();
		unix.trim_terminator();
		windows.trim_terminator();
		bare.trim_terminator();
		assert_eq!((unix.as_str(), windows.as_str(), bare.as_str()), ("ACGT", "ACGT", "ACGT"));
	}
	
	#[test]
	fn rejects_invalid_utf8() {
		assert!(String::from_bytes(vec![b'A', 0xfe]).is_err());
	}
}
