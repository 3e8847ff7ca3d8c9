//! Word-level Markov text generation library.
//!
//! This crate provides a minimal first-order Markov generator including:
//! - Corpus loading, cleaning and tokenization
//! - Transition table construction with duplicate-preserving followers
//! - Weighted random generation with an injectable randomness source
//!
//! The table is built once and is read-only afterwards, so a single model
//! can serve any number of generation calls, from any number of threads.

/// Corpus preparation (cleaning, tokenization, file loading).
pub mod corpus;

/// Error taxonomy shared by the whole crate.
pub mod error;

/// Markov model, transition table and generation.
pub mod model;

/// I/O utilities (file loading).
///
/// Not exposed
pub(crate) mod io;

pub use error::{MarkovError, MarkovResult};
pub use model::generation_input::{GenerationInput, StartSeed, TermCountRange};
pub use model::markov_text::MarkovText;
pub use model::transition_table::{TableSummary, TransitionTable};
