/// A value object invariant was violated at construction.
///
/// Construction is atomic: when a constructor returns this error no value was
/// produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
	#[error("{field} must be between 0.0 and 100.0, got {value}")]
	ChanceOutOfRange { field: &'static str, value: f64 },

	#[error("{field} must be greater than or equal to 0 ticks, got {ticks}")]
	NegativeTime { field: &'static str, ticks: i64 },

	#[error("level must be greater than 0, got {0}")]
	NonPositiveLevel(i64),

	#[error("duplicate level {0}")]
	DuplicateLevel(i32),

	#[error("an enchantment must define at least one level")]
	NoLevels,

	#[error("empty level token in '{expr}'")]
	EmptyLevelToken { expr: String },

	#[error("invalid level token '{token}' in '{expr}'")]
	InvalidLevelToken { expr: String, token: String },

	#[error("descending level range {start}-{end} in '{expr}'")]
	DescendingRange { expr: String, start: i32, end: i32 },

	#[error("level range {start}-{end} in '{expr}' is wider than {max} levels", max = crate::MAX_LEVEL_SPAN)]
	RangeTooWide { expr: String, start: i32, end: i32 },

	#[error("at least one alias is required")]
	NoAliases,

	#[error("missing required field: {0}")]
	MissingField(&'static str),

	#[error("trigger data for '{event_type}' has no FIRST_PLAYER retrieval")]
	MissingFirstPlayer { event_type: String },

	#[error("invalid namespaced key '{0}'")]
	InvalidKey(String),
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

/// Checks that `value` lies in `0.0..=100.0`. NaN is rejected.
pub(crate) fn check_chance(field: &'static str, value: f64) -> Result<()> {
	if (0.0..=100.0).contains(&value) {
		Ok(())
	} else {
		Err(ValidationError::ChanceOutOfRange { field, value })
	}
}

pub(crate) fn check_level(level: i64) -> Result<()> {
	if level > 0 {
		Ok(())
	} else {
		Err(ValidationError::NonPositiveLevel(level))
	}
}
