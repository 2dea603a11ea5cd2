//! Binary records: every field is a `Vec<u8>`.

use std::borrow::Cow;
use std::io::{self,BufRead};
use std::str;

use super::{Field, Mode, Record, Result};

/// A FASTQ record read in binary mode.
pub type BytesRecord = Record<Vec<u8>>;

impl Field for Vec<u8> {
	const MODE: Mode = Mode::Binary;
	
	fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<Vec<u8>>> {
		let mut line = Vec::new();
		match reader.read_until(b'\n', &mut line)? {
			0 => Ok(None),
			_ => Ok(Some(line)),
		}
	}
	
	fn as_bytes(&self) -> &[u8] { self }
	fn from_bytes(bytes: Vec<u8>) -> Result<Vec<u8>> { Ok(bytes) }
	fn to_text(&self) -> Result<Cow<str>> { Ok(Cow::Borrowed(str::from_utf8(self)?)) }
	
	fn length(&self) -> usize { self.len() }
	
	fn slice(&self, start: usize, end: usize) -> Vec<u8> {
		let end = end.min(self.len());
		let start = start.min(end);
		self[start..end].to_vec()
	}
	
	fn trim_terminator(&mut self) {
		if self.last() == Some(&b'\n') {
			self.pop();
			if self.last() == Some(&b'\r') {
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
		let mut input = Cursor::new(b"+\n\xffII".to_vec());
		assert_eq!(Vec::<u8>::read_line(&mut input).unwrap(), Some(b"+\n".to_vec()));
		assert_eq!(Vec::<u8>::read_line(&mut input).unwrap(), Some(b"\xffII".to_vec()));
		assert_eq!(Vec::<u8>::read_line(&mut input).unwrap(), None);
	}
	
	#[test]
	fn slicing_clamps_to_the_field() {
		let qual = b"IIIIIIII".to_vec();
		assert_eq!(qual.slice(2, 5), b"III");
		assert_eq!(qual.slice(7, 100), b"I");
		assert!(qual.slice(9, 12).is_empty());
	}
	
	#[test]
	fn text_view_requires_utf8() {
		assert_eq!(b"ACGT".to_vec().to_text().unwrap(), "ACGT");
		assert!(vec![0xc3u8].to_text().is_err());
	}
}
