use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a whole text file and returns its content as a single `String`.
///
/// - Reads the entire file into memory
/// - Line breaks are kept as-is, cleaning is left to the caller
pub(crate) fn read_corpus_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}
