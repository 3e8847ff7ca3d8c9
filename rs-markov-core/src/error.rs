use thiserror::Error;

/// Conditions reported by the Markov model and its helpers.
///
/// Every variant is scoped to a single call: none of them leaves the
/// transition table in an unusable state.
#[derive(Error, Debug)]
pub enum MarkovError {
	/// Generation was requested before the transition table was built.
	#[error("Term table not initialized. Build the table before generating")]
	UninitializedModel,

	/// The requested seed term has no recorded follower.
	#[error("Seed term '{0}' not found in corpus")]
	SeedNotFound(String),

	/// The table has no state to start a chain from.
	#[error("Term table is empty, no starting term available")]
	EmptyModel,

	/// The requested number of terms is outside the accepted range.
	#[error("Invalid term count {value}: {reason}")]
	InvalidTermCount { value: usize, reason: String },

	#[error("IO Error: {0}")]
	Io(#[from] std::io::Error),
}

pub type MarkovResult<T> = Result<T, MarkovError>;
