//! Line sources: buffered input split into raw lines, terminators kept.

use std::fs::File;
use std::io::{self,BufRead,BufReader,Read};
use std::marker::PhantomData;
use std::path::Path;

use super::Field;

/// Lazily yields the lines of `R` in the representation `F`.
pub struct Lines<R, F> {
	reader: R,
	kind: PhantomData<F>,
}

impl<R: BufRead, F: Field> Lines<R, F> {
	pub fn new(reader: R) -> Self {
		Lines { reader: reader, kind: PhantomData }
	}
	
	pub fn into_inner(self) -> R {
		self.reader
	}
}

impl<R: BufRead, F: Field> Iterator for Lines<R, F> {
	type Item = io::Result<F>;
	
	fn next(&mut self) -> Option<io::Result<F>> {
		F::read_line(&mut self.reader).transpose()
	}
}

/// Open `paths` as one buffered stream, concatenated in order.
/// Reads standard input if `paths` is empty.
///
/// Files are closed when the returned reader is dropped.
pub fn open<P: AsRef<Path>>(paths: &[P]) -> io::Result<Box<dyn BufRead>> {
	if paths.is_empty() {
		info!("Reading from standard input");
		return Ok(Box::new(io::stdin().lock()));
	}
	let mut input: Box<dyn Read> = Box::new(io::empty());
	for path in paths {
		let path = path.as_ref();
		info!("Reading {}", path.display());
		input = Box::new(input.chain(File::open(path)?));
	}
	Ok(Box::new(BufReader::new(input)))
}
