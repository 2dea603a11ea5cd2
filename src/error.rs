use std::convert::Infallible;
use std::io;
use std::str::Utf8Error;
use std::string::FromUtf8Error;

quick_error! {
	/// Everything that can go wrong while reading records or handling tags.
	#[derive(Debug)]
	pub enum Error {
		Io(err: io::Error) {
			from()
			source(err)
			display("I/O error: {}", err)
		}
		TypeMismatch(err: Utf8Error) {
			from()
			from(err: FromUtf8Error) -> (err.utf8_error())
			source(err)
			display("Expected UTF-8 text: {}", err)
		}
		MalformedTag(segment: String) {
			display("Tag {:?} is not of the form key:type:value", segment)
		}
		UnknownTagType(segment: String, code: String) {
			display("Tag {:?} has unknown type {:?}, expected one of i, Z, f", segment, code)
		}
		InvalidTagValue(segment: String) {
			display("Tag {:?} has a value that does not match its type", segment)
		}
		IntegerOverflow(value: String) {
			display("Integer {} does not fit a 64-bit signed tag value", value)
		}
		ReservedCharacter(text: String) {
			display("{:?} contains a reserved tag character (':', ';' or a line break)", text)
		}
		EmptyTagKey {
			display("Tag keys must not be empty")
		}
		InvalidTagRange(start: usize, end: usize) {
			display("Tag range {}..{} ends before it starts", start, end)
		}
		DuplicateTagName(name: String) {
			display("Tag name {:?} is produced more than once", name)
		}
	}
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<Infallible> for Error {
	fn from(never: Infallible) -> Error {
		match never {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	
	#[test]
	fn utf8_errors_are_type_mismatches() {
		let err: Error = String::from_utf8(vec![0xff]).unwrap_err().into();
		assert!(matches!(err, Error::TypeMismatch(_)));
	}
	
	#[test]
	fn messages_name_the_offender() {
		let err = Error::MalformedTag("bad_no_colon".to_owned());
		assert_eq!(err.to_string(), "Tag \"bad_no_colon\" is not of the form key:type:value");
	}
}
