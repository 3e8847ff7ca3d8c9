use rand::Rng;
use tracing::trace;

use super::transition_table::TransitionTable;
use crate::error::{MarkovError, MarkovResult};

/// Walks the transition table and returns the generated terms.
///
/// # Parameters
/// - `table`: the read-only transition table.
/// - `rng`: randomness source, used for the random start and every step.
/// - `seed_term`: starting term. `None` picks a random key.
/// - `term_count`: requested number of terms, start term included.
///
/// # Behavior
/// - The start term is pushed first, then up to `term_count - 1` followers
///   are sampled uniformly over the current term's follower list.
/// - When the current term has no follower, generation stops silently and
///   the returned sequence is shorter than requested.
///
/// # Errors
/// - `InvalidTermCount` if `term_count` is 0.
/// - `SeedNotFound` if `seed_term` has no recorded follower.
/// - `EmptyModel` if the table has no key to start from.
pub fn generate_terms<'t, R: Rng + ?Sized>(
	table: &'t TransitionTable,
	rng: &mut R,
	seed_term: Option<&str>,
	term_count: usize,
) -> MarkovResult<Vec<&'t str>> {
	if term_count == 0 {
		return Err(MarkovError::InvalidTermCount {
			value: term_count,
			reason: "at least one term is required".to_owned(),
		});
	}

	let start = match seed_term {
		Some(term) => match table.get(term) {
			Some(transition) => transition.key(),
			None => return Err(MarkovError::SeedNotFound(term.to_owned())),
		},
		None => table.random_key(rng).ok_or(MarkovError::EmptyModel)?,
	};

	let mut terms = vec![start];

	let mut current = start;
	while terms.len() < term_count {
		let Some(next) = table.get(current).and_then(|t| t.predict(rng)) else {
			trace!(term = current, generated = terms.len(), "chain stopped, no follower");
			break;
		};
		terms.push(next);
		current = next;
	}

	Ok(terms)
}

/// Same as [`generate_terms`], joined with single spaces.
pub fn generate<R: Rng + ?Sized>(
	table: &TransitionTable,
	rng: &mut R,
	seed_term: Option<&str>,
	term_count: usize,
) -> MarkovResult<String> {
	Ok(generate_terms(table, rng, seed_term, term_count)?.join(" "))
}
