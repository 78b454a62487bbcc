//! Debug-friendly, localized descriptions of value objects.

use underscore_locale::Locale;

/// Renders a value for operators, using locale tokens for labels.
pub trait Describe {
	/// One-line description, or `None` if the value cannot be described on
	/// one line.
	fn describe_shortly(&self, locale: &Locale) -> Option<String>;

	/// Multi-line description. Single-line values return their short form as
	/// the only element, or nothing when that is `None`.
	fn describe(&self, locale: &Locale) -> Vec<String> {
		self.describe_shortly(locale).into_iter().collect()
	}
}

/// Describes `item`, yielding an empty list for `None`.
pub fn describe<T: Describe + ?Sized>(locale: &Locale, item: Option<&T>) -> Vec<String> {
	item.map(|item| item.describe(locale)).unwrap_or_default()
}

/// Short form of `item`, `None` when absent.
pub fn describe_shortly<T: Describe + ?Sized>(locale: &Locale, item: Option<&T>) -> Option<String> {
	item.and_then(|item| item.describe_shortly(locale))
}

/// Formats a chance so whole numbers keep one decimal place (`50.0`).
pub(crate) fn decimal(value: f64) -> String {
	if value.fract() == 0.0 {
		format!("{value:.1}")
	} else {
		value.to_string()
	}
}
