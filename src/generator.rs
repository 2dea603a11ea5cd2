//! Pulling fixed substrings out of reads and emitting them as tags.

use std::collections::HashSet;
use std::io;

use super::tags::{self,TagType,Value};
use super::{Error, Field, Reader, Record, Result};

/// A `[start, end)` range of sequence and quality, and the tag names the two
/// substrings are emitted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
	start: usize,
	end: usize,
	sequence_tag: String,
	quality_tag: String,
}

impl Tag {
	pub fn new<S, Q>(start: usize, end: usize, sequence_tag: S, quality_tag: Q) -> Result<Tag>
		where S: Into<String>, Q: Into<String>
	{
		if end < start {
			return Err(Error::InvalidTagRange(start, end));
		}
		let sequence_tag = sequence_tag.into();
		let quality_tag = quality_tag.into();
		tags::check_key(&sequence_tag)?;
		tags::check_key(&quality_tag)?;
		Ok(Tag { start: start, end: end, sequence_tag: sequence_tag, quality_tag: quality_tag })
	}
	
	pub fn start(&self) -> usize { self.start }
	pub fn end(&self) -> usize { self.end }
	pub fn sequence_tag(&self) -> &str { &self.sequence_tag }
	pub fn quality_tag(&self) -> &str { &self.quality_tag }
}

/// One emitted tag: name, extracted substring and wire type (always `Z`).
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTag<F> {
	pub name: String,
	pub value: F,
	pub kind: TagType,
}

impl<F: Field> ExtractedTag<F> {
	fn text(name: &str, value: F) -> Self {
		ExtractedTag { name: name.to_owned(), value: value, kind: TagType::Text }
	}
	
	/// `(name, value)`, ready for [`Record::set_tags`].
	pub fn into_pair(self) -> (String, Value) {
		(self.name, self.value.into())
	}
}

/// Extract the sequence and quality substrings `tag` describes from `record`.
///
/// Ranges past the end of the record yield shorter or empty substrings.
pub fn extract_tag<F: Field>(record: &Record<F>, tag: &Tag) -> [ExtractedTag<F>; 2] {
	[
		ExtractedTag::text(&tag.sequence_tag, record.sequence().slice(tag.start, tag.end)),
		ExtractedTag::text(&tag.quality_tag, record.quality().slice(tag.start, tag.end)),
	]
}

/// Yields, per record, the tags extracted for each descriptor in order:
/// sequence tag first, then quality tag.
pub struct TagGenerator<I> {
	reader: Reader<I>,
	tags: Vec<Tag>,
}

impl<I> TagGenerator<I> {
	/// Fails if two descriptors would emit the same tag name.
	pub fn new(tags: Vec<Tag>, reader: Reader<I>) -> Result<Self> {
		let mut seen = HashSet::new();
		for name in tags.iter().flat_map(|t| [&t.sequence_tag, &t.quality_tag]) {
			if !seen.insert(name) {
				return Err(Error::DuplicateTagName(name.clone()));
			}
		}
		Ok(TagGenerator { reader: reader, tags: tags })
	}
	
	pub fn tags(&self) -> &[Tag] {
		&self.tags
	}
	
	pub fn into_reader(self) -> Reader<I> {
		self.reader
	}
	
	/// Yield the records themselves, with their extracted tags prepended to the name.
	pub fn stamped(self) -> Stamped<I> {
		Stamped { inner: self }
	}
}

impl<I, F> TagGenerator<I> where I: Iterator<Item = io::Result<F>>, F: Field {
	fn extract(&self, record: &Record<F>) -> Vec<ExtractedTag<F>> {
		self.tags.iter().flat_map(|tag| extract_tag(record, tag)).collect()
	}
	
	fn next_tagged(&mut self) -> Option<Result<(Record<F>, Vec<ExtractedTag<F>>)>> {
		let record = match self.reader.next()? {
			Ok(record) => record,
			Err(e) => return Some(Err(e)),
		};
		let extracted = self.extract(&record);
		Some(Ok((record, extracted)))
	}
}

impl<I, F> Iterator for TagGenerator<I> where I: Iterator<Item = io::Result<F>>, F: Field {
	type Item = Result<Vec<ExtractedTag<F>>>;
	
	fn next(&mut self) -> Option<Self::Item> {
		self.next_tagged().map(|r| r.map(|(_, tags)| tags))
	}
}

/// Records with their extracted tags stamped into the name.
pub struct Stamped<I> {
	inner: TagGenerator<I>,
}

impl<I, F> Iterator for Stamped<I> where I: Iterator<Item = io::Result<F>>, F: Field {
	type Item = Result<Record<F>>;
	
	fn next(&mut self) -> Option<Self::Item> {
		let (mut record, extracted) = match self.inner.next_tagged()? {
			Ok(tagged) => tagged,
			Err(e) => return Some(Err(e)),
		};
		match record.set_tags(extracted.into_iter().map(ExtractedTag::into_pair)) {
			Ok(()) => Some(Ok(record)),
			Err(e) => Some(Err(e)),
		}
	}
}
