use std::fmt;

use indexmap::IndexMap;

use super::tags::{self,TagValue,Value};
use super::{Error, Field, Result};

const LINES_PER_RECORD: usize = 4;
const PHRED_OFFSET: i64 = 33;

/// A FastQ record: name, sequence, second name and qualities.
///
/// All four fields share the representation `F` (`String` or `Vec<u8>`).
/// Sequence and quality lengths are not checked against each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<F> {
	name: F,
	sequence: F,
	name2: F,
	quality: F,
}

impl<F: Field> Record<F> {
	/// Create a record from four fields. A trailing `\n` or `\r\n` is dropped
	/// from each, since rendering writes its own line breaks.
	pub fn new(mut name: F, mut sequence: F, mut name2: F, mut quality: F) -> Record<F> {
		for field in [&mut name, &mut sequence, &mut name2, &mut quality] {
			field.trim_terminator();
		}
		Record { name: name, sequence: sequence, name2: name2, quality: quality }
	}
	
	/// Create a record from four raw lines.
	pub fn from_lines(lines: [F; LINES_PER_RECORD]) -> Record<F> {
		let [name, sequence, name2, quality] = lines;
		Record::new(name, sequence, name2, quality)
	}
	
	/// The name line, including the leading `@` and any tags.
	pub fn name(&self) -> &F { &self.name }
	pub fn sequence(&self) -> &F { &self.sequence }
	/// The separator line, including the leading `+`.
	pub fn name2(&self) -> &F { &self.name2 }
	pub fn quality(&self) -> &F { &self.quality }
	
	pub fn set_name(&mut self, name: F) { self.name = name }
	pub fn set_sequence(&mut self, sequence: F) { self.sequence = sequence }
	pub fn set_name2(&mut self, name2: F) { self.name2 = name2 }
	pub fn set_quality(&mut self, quality: F) { self.quality = quality }
	
	/// Length of the sequence.
	pub fn len(&self) -> usize {
		self.sequence.length()
	}
	
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
	
	/// All four fields, each followed by a newline.
	pub fn render_as_bytes(&self) -> Vec<u8> {
		let fields = [&self.name, &self.sequence, &self.name2, &self.quality];
		let mut out = Vec::with_capacity(fields.iter().map(|f| f.as_bytes().len() + 1).sum());
		for field in fields {
			out.extend_from_slice(field.as_bytes());
			out.push(b'\n');
		}
		out
	}
	
	/// Like [`render_as_bytes`](Record::render_as_bytes), but as text.
	/// Fails if a binary field is not UTF-8.
	pub fn render_as_text(&self) -> Result<String> {
		let mut out = String::new();
		for field in [&self.name, &self.sequence, &self.name2, &self.quality] {
			out.push_str(&field.to_text()?);
			out.push('\n');
		}
		Ok(out)
	}
	
	/// Mean Phred+33 quality over the first `len()` quality characters,
	/// truncated to a whole number. `None` for an empty record.
	pub fn average_quality(&self) -> Option<i64> {
		let quality = self.quality.as_bytes();
		let quality = &quality[..self.len().min(quality.len())];
		if quality.is_empty() {
			return None;
		}
		let total: i64 = quality.iter().map(|&q| i64::from(q)).sum();
		Some(total / quality.len() as i64 - PHRED_OFFSET)
	}
	
	/// The name without its leading `@` and without tags.
	pub fn original_name(&self) -> &[u8] {
		tags::original_name(self.name.as_bytes())
	}
	
	/// All tags stored in the name.
	pub fn get_tags(&self) -> Result<IndexMap<String, TagValue<F>>> {
		tags::decode(self.name.as_bytes())
	}
	
	/// The tag stored under `key`, or `None` if there is none.
	pub fn get_tag(&self, key: &str) -> Result<Option<TagValue<F>>> {
		Ok(self.get_tags()?.swap_remove(key))
	}
	
	/// Prepend one tag to the name.
	pub fn set_tag<V>(&mut self, key: &str, value: V) -> Result<()>
		where V: TryInto<Value>, Error: From<V::Error>
	{
		self.set_tags(Some((key, value)))
	}
	
	/// Prepend tags to the name, in the given order, ahead of existing tags.
	/// The name is left untouched if any pair fails to encode.
	pub fn set_tags<I, K, V>(&mut self, pairs: I) -> Result<()>
		where I: IntoIterator<Item = (K, V)>, K: Into<String>, V: TryInto<Value>, Error: From<V::Error>
	{
		let pairs = pairs.into_iter()
			.map(|(k, v)| -> Result<(String, Value)> { Ok((k.into(), v.try_into()?)) })
			.collect::<Result<Vec<(String, Value)>>>()?;
		if let Some(name) = tags::prepend(self.name.as_bytes(), pairs, F::MODE)? {
			self.name = F::from_bytes(name)?;
		}
		Ok(())
	}
}

impl<F: Field> fmt::Display for Record<F> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&String::from_utf8_lossy(&self.render_as_bytes()))
	}
}
