use rand::Rng;

use super::generation_input::GenerationInput;
use super::generator;
use super::transition_table::TransitionTable;
use crate::corpus::tokenize;
use crate::error::{MarkovError, MarkovResult};

/// First-order, word-level Markov text model.
///
/// # Responsibilities
/// - Own the corpus and its token sequence
/// - Build the transition table, once
/// - Generate new sequences from that table
///
/// # Invariants
/// - `tokens` is the tokenization of `corpus` and never changes
/// - `term_table` is `None` until [`MarkovText::build_term_table`] is called,
///   then immutable
#[derive(Debug, Clone)]
pub struct MarkovText {
	corpus: String,
	tokens: Vec<String>,
	term_table: Option<TransitionTable>,
}

impl MarkovText {
	/// Creates a model over `corpus` without building the table.
	///
	/// Generation fails with `UninitializedModel` until the table is built.
	pub fn new(corpus: impl Into<String>) -> Self {
		let corpus = corpus.into();
		let tokens = tokenize(&corpus);
		Self { corpus, tokens, term_table: None }
	}

	/// Creates a model over `corpus` and builds its table right away.
	pub fn from_corpus(corpus: impl Into<String>) -> Self {
		let mut model = Self::new(corpus);
		model.build_term_table();
		model
	}

	pub fn corpus(&self) -> &str {
		&self.corpus
	}

	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	/// Builds the transition table from the token sequence.
	///
	/// The table is computed on the first call only; later calls return the
	/// existing table.
	pub fn build_term_table(&mut self) -> &TransitionTable {
		self.term_table
			.get_or_insert_with(|| TransitionTable::from_tokens(&self.tokens))
	}

	/// Returns the transition table.
	///
	/// # Errors
	/// Returns `MarkovError::UninitializedModel` if the table was not built.
	pub fn term_table(&self) -> MarkovResult<&TransitionTable> {
		self.term_table.as_ref().ok_or(MarkovError::UninitializedModel)
	}

	/// Generates a sequence of at most `term_count` terms joined by spaces.
	///
	/// See [`generator::generate_terms`] for the walk itself.
	///
	/// # Errors
	/// - `UninitializedModel` if the table was not built.
	/// - `SeedNotFound`, `EmptyModel` or `InvalidTermCount` from the walk.
	pub fn generate<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		seed_term: Option<&str>,
		term_count: usize,
	) -> MarkovResult<String> {
		generator::generate(self.term_table()?, rng, seed_term, term_count)
	}

	/// Generates a sequence from a validated [`GenerationInput`].
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, input: &GenerationInput) -> MarkovResult<String> {
		self.generate(rng, input.start_seed.as_term(), input.term_count())
	}
}
