//! Top-level module for the Markov text model.
//!
//! This module provides a word-level, first-order Markov generator:
//! - A single chain state and its followers (`Transition`)
//! - The transition table built from a token sequence (`TransitionTable`)
//! - The sampling walk over that table (`generator`)
//! - Generation parameters (`GenerationInput`)
//! - The corpus-owning model (`MarkovText`)

/// Corpus-owning model: tokens, lazily built table and generation.
pub mod markov_text;

/// Transition table construction, lookup and summary.
pub mod transition_table;

/// Weighted random walk over a transition table.
///
/// Randomness is always injected by the caller, so a seeded generator
/// gives reproducible output.
pub mod generator;

/// Single chain state: a term and its followers, duplicates included.
pub mod transition;

/// Start seed strategy and caller-facing term count bounds.
pub mod generation_input;
