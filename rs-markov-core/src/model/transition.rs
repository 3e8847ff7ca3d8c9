use rand::Rng;
use rand::seq::IndexedRandom;

use serde::Serialize;

/// Represents a state of the word-level Markov chain.
///
/// A `Transition` corresponds to one term (`key`) and stores every term
/// observed right after it in the corpus.
///
/// Conceptually, this is a node in a Markov chain. Unlike a counted
/// histogram, followers are stored with repetition: a follower observed
/// three times appears three times, and the repetition *is* its weight.
///
/// ## Invariants
/// - `followers` is never empty once the transition is part of a table
/// - Order of `followers` follows corpus order
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
	/// The current term.
	key: String,
	/// Every term observed right after `key`, duplicates included.
	/// Example: "Life" => ["is", "is", "short"]
	followers: Vec<String>,
}

impl Transition {
	/// Creates a new transition for the given term, without followers.
	pub(crate) fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			followers: Vec::new(),
		}
	}

	/// Records one more occurrence of `next` following this term.
	pub(crate) fn add_follower(&mut self, next: &str) {
		self.followers.push(next.to_owned());
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn followers(&self) -> &[String] {
		&self.followers
	}

	/// Picks the next term uniformly over the follower list.
	///
	/// Because duplicates are kept, a follower seen `k` times out of `n`
	/// is returned with probability `k / n`.
	///
	/// Returns `None` if the transition has no follower.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.followers.choose(rng).map(String::as_str)
	}
}
