//! Corpus preparation: loading, cleaning and tokenization.
//!
//! The model itself never normalizes text. Everything that turns a raw
//! document into a clean, whitespace-separated corpus lives here.

use std::path::Path;

use tracing::debug;

use crate::error::MarkovResult;
use crate::io;

/// Typographic quote characters delimiting a quote in the raw corpus.
const QUOTE_DELIMITERS: [char; 2] = ['“', '”'];

/// Cleaning applied to a raw document before tokenization.
///
/// # Variants
/// - `Raw`: only collapse whitespace.
/// - `Quotes`: keep only the text enclosed in typographic quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorpusSource {
	#[default]
	Raw,
	Quotes,
}

/// Splits a corpus into its maximal non-whitespace runs.
///
/// Order, casing and attached punctuation are preserved. Empty or
/// whitespace-only input yields an empty sequence.
pub fn tokenize(corpus: &str) -> Vec<String> {
	corpus.split_whitespace().map(str::to_owned).collect()
}

/// Collapses every whitespace run into a single space and trims both ends.
pub fn normalize_whitespace(raw: &str) -> String {
	raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the quoted passages of a document and joins them into one corpus.
///
/// # Behavior
/// - Line breaks are replaced by spaces.
/// - The text is split on `“` and `”`; only the odd segments, i.e. the ones
///   between an opening and a closing quote, are kept.
/// - Kept segments are joined with a space, then whitespace is normalized.
///
/// Text without any typographic quote yields an empty string.
pub fn extract_quotes(raw: &str) -> String {
	let flat = raw.replace('\n', " ");
	let quotes: Vec<&str> = flat
		.split(QUOTE_DELIMITERS)
		.skip(1)
		.step_by(2)
		.collect();
	normalize_whitespace(&quotes.join(" "))
}

/// Applies the cleaning selected by `source` to a raw document.
pub fn clean(raw: &str, source: CorpusSource) -> String {
	match source {
		CorpusSource::Raw => normalize_whitespace(raw),
		CorpusSource::Quotes => extract_quotes(raw),
	}
}

/// Reads a text file and returns its cleaned content.
///
/// # Errors
/// Returns `MarkovError::Io` if the file cannot be read.
pub fn load_corpus<P: AsRef<Path>>(filepath: P, source: CorpusSource) -> MarkovResult<String> {
	let raw = io::read_corpus_file(&filepath)?;
	let corpus = clean(&raw, source);
	debug!(
		path = %filepath.as_ref().display(),
		?source,
		raw_bytes = raw.len(),
		clean_bytes = corpus.len(),
		"corpus loaded"
	);
	Ok(corpus)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::io::Write;

	#[rstest]
	#[case("", vec![])]
	#[case("   \n\t ", vec![])]
	#[case("Life is short.", vec!["Life", "is", "short."])]
	#[case("  Be\tyourself;\n everyone  ", vec!["Be", "yourself;", "everyone"])]
	#[case("Don't  don't", vec!["Don't", "don't"])]
	fn tokenize_keeps_non_whitespace_runs(#[case] input: &str, #[case] expected: Vec<&str>) {
		assert_eq!(tokenize(input), expected);
	}

	#[test]
	fn tokenize_is_word_level_not_char_level() {
		assert_eq!(tokenize("abc").len(), 1);
	}

	#[rstest]
	#[case("a  b\n\nc ", "a b c")]
	#[case("   ", "")]
	#[case("single", "single")]
	fn normalize_whitespace_collapses_runs(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(normalize_whitespace(input), expected);
	}

	#[test]
	fn extract_quotes_keeps_text_between_quotes() {
		let raw = "1. “Life is what happens.” - John\n2. “Stay\nhungry,  stay foolish.” - Steve\n";
		assert_eq!(extract_quotes(raw), "Life is what happens. Stay hungry, stay foolish.");
	}

	#[test]
	fn extract_quotes_without_quotes_is_empty() {
		assert_eq!(extract_quotes("no quotes \"here\" at all"), "");
	}

	#[test]
	fn clean_dispatches_on_source() {
		let raw = "intro “quoted text” outro";
		assert_eq!(clean(raw, CorpusSource::Raw), "intro “quoted text” outro");
		assert_eq!(clean(raw, CorpusSource::Quotes), "quoted text");
	}

	#[test]
	fn load_corpus_reads_and_cleans() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "“Be yourself.”\n - Oscar\n“Dream big.”").unwrap();

		let corpus = load_corpus(file.path(), CorpusSource::Quotes).unwrap();
		assert_eq!(corpus, "Be yourself. Dream big.");
	}

	#[test]
	fn load_corpus_missing_file_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = load_corpus(dir.path().join("missing.txt"), CorpusSource::Raw).unwrap_err();
		assert!(matches!(err, crate::error::MarkovError::Io(_)));
	}
}
