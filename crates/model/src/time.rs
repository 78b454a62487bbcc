/// Server ticks per second.
pub const TICKS_PER_SECOND: i64 = 20;

/// A duration measured in server ticks.
///
/// `Time` itself may be negative; value objects that hold a delay or cooldown
/// reject negative values at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
	ticks: i64,
}

impl Time {
	pub const ZERO: Time = Time { ticks: 0 };

	pub const fn from_ticks(ticks: i64) -> Self {
		Self { ticks }
	}

	pub const fn from_seconds(seconds: i64) -> Self {
		Self {
			ticks: seconds.saturating_mul(TICKS_PER_SECOND),
		}
	}

	pub const fn ticks(self) -> i64 {
		self.ticks
	}

	pub const fn is_negative(self) -> bool {
		self.ticks < 0
	}

	pub(crate) fn check_non_negative(self, field: &'static str) -> crate::error::Result<Self> {
		if self.is_negative() {
			Err(crate::ValidationError::NegativeTime { field, ticks: self.ticks })
		} else {
			Ok(self)
		}
	}
}

impl std::fmt::Display for Time {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.ticks)
	}
}
