//! Grouping raw lines into records.

use std::collections::BTreeMap;
use std::io::{self,BufRead};
use std::iter::Fuse;
use std::path::Path;

use super::lines::{self,Lines};
use super::{Field, Record, Result};

/// Number of records [`Reader::estimate_sequence_length`] samples at most.
pub const SAMPLE_SIZE: usize = 10_000;

/// A FastQ reader over raw lines.
///
/// Lines are taken four at a time. If the line count is not a multiple of
/// four, the trailing partial record is dropped without an error. After the
/// line source fails, the reader yields that error once and then ends.
pub struct Reader<I> {
	lines: Fuse<I>,
	records: u64,
	failed: bool,
}

/// A reader over files or standard input.
pub type FileReader<F> = Reader<Lines<Box<dyn BufRead>, F>>;

impl<I: Iterator> Reader<I> {
	/// Read from any iterator of lines.
	pub fn new(lines: I) -> Self {
		Reader { lines: lines.fuse(), records: 0, failed: false }
	}
	
	/// Number of records yielded so far.
	pub fn records_read(&self) -> u64 {
		self.records
	}
}

impl<R: BufRead, F: Field> Reader<Lines<R, F>> {
	/// Read from a given `BufRead`.
	pub fn from_reader(reader: R) -> Self {
		Reader::new(Lines::new(reader))
	}
}

impl<F: Field> FileReader<F> {
	/// Read the given files one after the other, or standard input if there are none.
	pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> io::Result<Self> {
		debug!("Opening {} input(s) in {} mode", paths.len(), F::MODE);
		lines::open(paths).map(Self::from_reader)
	}
	
	/// Read from a given file.
	pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
		Self::from_paths(&[path])
	}
	
	/// Read from standard input.
	pub fn stdin() -> io::Result<Self> {
		Self::from_paths::<&Path>(&[])
	}
}

impl<I, F> Iterator for Reader<I> where I: Iterator<Item = io::Result<F>>, F: Field {
	type Item = Result<Record<F>>;
	
	fn next(&mut self) -> Option<Result<Record<F>>> {
		if self.failed {
			return None;
		}
		let mut group = Vec::with_capacity(4);
		while group.len() < 4 {
			match self.lines.next() {
				Some(Ok(line)) => group.push(line),
				Some(Err(e)) => {
					debug!("Line source failed after record {}, stopping", self.records);
					self.failed = true;
					return Some(Err(e.into()));
				}
				None => {
					if !group.is_empty() {
						debug!("Dropping {} trailing line(s) after record {}", group.len(), self.records);
					}
					return None;
				}
			}
		}
		let lines: [F; 4] = group.try_into().ok()?;
		self.records += 1;
		trace!("Read record {}", self.records);
		Some(Ok(Record::from_lines(lines)))
	}
}

impl<I, F> Reader<I> where I: Iterator<Item = io::Result<F>>, F: Field {
	/// Estimate sequence lengths from the first [`SAMPLE_SIZE`] records.
	///
	/// The sampled records are consumed from this reader. Returns `None` if
	/// there were no records to sample.
	pub fn estimate_sequence_length(&mut self) -> Result<Option<LengthEstimate>> {
		let mut sample = Vec::new();
		for record in self.by_ref().take(SAMPLE_SIZE) {
			sample.push(record?.len());
		}
		let estimate = LengthEstimate::from_sample(&sample);
		if let Some(ref e) = estimate {
			debug!("Sampled {} records: mean length {:.1}, sd {:.1}", sample.len(), e.mean, e.std_dev);
		}
		Ok(estimate)
	}
}

/// Summary of sampled sequence lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthEstimate {
	pub mean: f64,
	/// Population standard deviation.
	pub std_dev: f64,
	/// Distinct observed lengths, ascending.
	pub lengths: Vec<usize>,
	/// Number of records per entry of `lengths`.
	pub counts: Vec<usize>,
}

impl LengthEstimate {
	fn from_sample(sample: &[usize]) -> Option<LengthEstimate> {
		if sample.is_empty() {
			return None;
		}
		let n = sample.len() as f64;
		let mean = sample.iter().sum::<usize>() as f64 / n;
		let variance = sample.iter().map(|&l| (l as f64 - mean).powi(2)).sum::<f64>() / n;
		
		let mut histogram = BTreeMap::new();
		for &length in sample {
			*histogram.entry(length).or_insert(0) += 1;
		}
		let (lengths, counts) = histogram.into_iter().unzip();
		
		Some(LengthEstimate { mean: mean, std_dev: variance.sqrt(), lengths: lengths, counts: counts })
	}
	
	/// `(length, count)` pairs, ascending by length.
	pub fn histogram(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.lengths.iter().copied().zip(self.counts.iter().copied())
	}
}
