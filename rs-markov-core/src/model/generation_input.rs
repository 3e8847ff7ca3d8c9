use serde::Serialize;

use crate::error::{MarkovError, MarkovResult};

/// Strategy used to select the starting term of a generated sequence.
///
/// # Variants
/// - `Random`: pick a random key of the transition table.
/// - `Custom(String)`: start from the given term, which must be a key.
///
/// The absence of a seed is an explicit variant rather than an empty
/// string, so an empty term is never mistaken for "no seed".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StartSeed {
	#[default]
	Random,
	Custom(String),
}

impl StartSeed {
	/// Builds a seed from free user text.
	///
	/// Surrounding whitespace is trimmed; blank text means `Random`.
	pub fn from_user_input(input: &str) -> Self {
		match input.trim() {
			"" => Self::Random,
			term => Self::Custom(term.to_owned()),
		}
	}

	pub fn as_term(&self) -> Option<&str> {
		match self {
			Self::Random => None,
			Self::Custom(term) => Some(term.as_str()),
		}
	}
}

/// Caller-facing bounds on the number of generated terms.
///
/// # Invariants
/// - `1 <= min <= default <= max`
/// - `step >= 1`
/// - `default` lies on the step grid starting at `min`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermCountRange {
	min: usize,
	max: usize,
	step: usize,
	default: usize,
}

impl Default for TermCountRange {
	/// 10 to 50 terms, by steps of 5, 15 by default.
	fn default() -> Self {
		Self { min: 10, max: 50, step: 5, default: 15 }
	}
}

impl TermCountRange {
	/// Creates a new range.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidTermCount` if the bounds break the
	/// range invariants.
	pub fn new(min: usize, max: usize, step: usize, default: usize) -> MarkovResult<Self> {
		if min == 0 || step == 0 || min > max {
			return Err(MarkovError::InvalidTermCount {
				value: min,
				reason: format!("range {min}..={max} step {step} is not valid"),
			});
		}
		let range = Self { min, max, step, default };
		range.validate(default)?;
		Ok(range)
	}

	pub fn min(&self) -> usize {
		self.min
	}

	pub fn max(&self) -> usize {
		self.max
	}

	pub fn step(&self) -> usize {
		self.step
	}

	pub fn default_count(&self) -> usize {
		self.default
	}

	/// Checks that `count` lies in the range and on the step grid.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidTermCount` otherwise.
	pub fn validate(&self, count: usize) -> MarkovResult<usize> {
		if !(self.min..=self.max).contains(&count) {
			return Err(MarkovError::InvalidTermCount {
				value: count,
				reason: format!("must be between {} and {}", self.min, self.max),
			});
		}
		if (count - self.min) % self.step != 0 {
			return Err(MarkovError::InvalidTermCount {
				value: count,
				reason: format!("must be {} plus a multiple of {}", self.min, self.step),
			});
		}
		Ok(count)
	}
}

/// Parameters of one generation request.
///
/// `term_count` can only be set through [`GenerationInput::set_term_count`],
/// which validates it against the range the input was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInput {
	/// Starting term strategy.
	pub start_seed: StartSeed,

	/// Requested number of terms, start term included.
	term_count: usize,

	range: TermCountRange,
}

impl GenerationInput {
	/// Creates an input with a random start and the range's default count.
	pub fn new(range: TermCountRange) -> Self {
		Self {
			start_seed: StartSeed::Random,
			term_count: range.default_count(),
			range,
		}
	}

	pub fn term_count(&self) -> usize {
		self.term_count
	}

	pub fn range(&self) -> &TermCountRange {
		&self.range
	}

	/// Sets the requested number of terms.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidTermCount` if `count` is outside the range.
	pub fn set_term_count(&mut self, count: usize) -> MarkovResult<()> {
		self.term_count = self.range.validate(count)?;
		Ok(())
	}
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self::new(TermCountRange::default())
	}
}
