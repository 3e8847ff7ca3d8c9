use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use tracing::debug;

use super::transition::Transition;

/// Marker appended to a sampled follower list that was truncated.
pub const TRUNCATION_MARKER: &str = "...";

/// Word-level transition table of a first-order Markov chain.
///
/// The `TransitionTable` maps every term that is followed by something in
/// the corpus to the list of terms following it.
///
/// # Responsibilities
/// - Build the table once from a token sequence
/// - Look up followers of a term
/// - Pick a random starting term
/// - Summarize its content for display
///
/// # Invariants
/// - A term is a key iff it appears at a position other than the last
/// - Every stored transition has at least one follower
/// - `entries` are kept in first-occurrence order of each key
/// - The table is never mutated after construction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionTable {
	/// Position of each key in `entries`
	index: HashMap<String, usize>,

	/// Transitions in first-occurrence order
	entries: Vec<Transition>,
}

/// Serializable overview of a table, as shown to an end user.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TableSummary {
	/// Number of distinct states (keys).
	pub states: usize,
	/// Number of recorded transitions, duplicates included.
	pub transitions: usize,
	/// First keys of the table with a truncated follower list.
	pub sample: Vec<SampleEntry>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SampleEntry {
	pub term: String,
	pub followers: Vec<String>,
}

impl TransitionTable {
	/// Builds the table from an ordered token sequence.
	///
	/// For each adjacent pair `(tokens[i], tokens[i + 1])`, `tokens[i + 1]` is
	/// appended to the followers of `tokens[i]`. Sequences shorter than two
	/// tokens yield an empty table.
	pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
		let mut table = Self::default();

		for pair in tokens.windows(2) {
			let (current, next) = (pair[0].as_ref(), pair[1].as_ref());
			let position = match table.index.get(current) {
				Some(position) => *position,
				None => {
					table.entries.push(Transition::new(current));
					table.index.insert(current.to_owned(), table.entries.len() - 1);
					table.entries.len() - 1
				}
			};
			table.entries[position].add_follower(next);
		}

		debug!(
			tokens = tokens.len(),
			states = table.len(),
			"transition table built"
		);
		table
	}

	/// Number of keys (states) in the table.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns `true` if `term` has at least one recorded follower.
	pub fn contains(&self, term: &str) -> bool {
		self.index.contains_key(term)
	}

	/// Returns the transition recorded for `term`, if any.
	pub fn get(&self, term: &str) -> Option<&Transition> {
		self.index.get(term).map(|position| &self.entries[*position])
	}

	/// Returns the followers of `term`, duplicates included.
	pub fn followers(&self, term: &str) -> Option<&[String]> {
		self.get(term).map(Transition::followers)
	}

	/// Iterates over the keys in first-occurrence order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(Transition::key)
	}

	/// Iterates over the transitions in first-occurrence order.
	pub fn iter(&self) -> impl Iterator<Item = &Transition> {
		self.entries.iter()
	}

	/// Total number of recorded transitions, i.e. `tokens.len() - 1`
	/// for a table built from two tokens or more.
	pub fn transition_count(&self) -> usize {
		self.entries.iter().map(|t| t.followers().len()).sum()
	}

	/// Returns a random key, chosen uniformly over distinct keys.
	///
	/// Returns `None` if the table is empty.
	pub fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.entries.choose(rng).map(Transition::key)
	}

	/// Summarizes the table for display.
	///
	/// # Parameters
	/// - `max_keys`: number of leading keys to sample.
	/// - `max_followers`: followers shown per key. Longer lists are cut and
	///   end with [`TRUNCATION_MARKER`].
	pub fn summary(&self, max_keys: usize, max_followers: usize) -> TableSummary {
		let sample = self
			.entries
			.iter()
			.take(max_keys)
			.map(|transition| {
				let all = transition.followers();
				let mut followers: Vec<String> = all.iter().take(max_followers).cloned().collect();
				if all.len() > max_followers {
					followers.push(TRUNCATION_MARKER.to_owned());
				}
				SampleEntry { term: transition.key().to_owned(), followers }
			})
			.collect();

		TableSummary {
			states: self.len(),
			transitions: self.transition_count(),
			sample,
		}
	}
}
