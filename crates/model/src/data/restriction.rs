use underscore_locale::Locale;

use crate::describe::Describe;
use crate::error::{Result, ValidationError, check_level};
use crate::host::EnchantmentObtainmentMeans;

/// Widest `start-end` range a level expression may contain. Item levels are
/// stored as a byte by the game, so no real range exceeds this.
pub const MAX_LEVEL_SPAN: i32 = 255;

/// Levels of an enchantment obtainable through one acquisition method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnchantmentObtainmentRestriction {
	means: EnchantmentObtainmentMeans,
	levels: Vec<i32>,
}

impl EnchantmentObtainmentRestriction {
	pub fn new(means: EnchantmentObtainmentMeans, levels: Vec<i32>) -> Result<Self> {
		for &level in &levels {
			check_level(i64::from(level))?;
		}
		Ok(Self { means, levels })
	}

	/// Parses a level expression such as `1-5`, `1,3` or `1-6, 8`.
	///
	/// Whitespace is ignored. Comma separated tokens are either a single level
	/// or an inclusive `start-end` range. Levels are kept in the order written
	/// and duplicates are preserved, so `2,2` yields `[2, 2]`. A range may
	/// cover at most [`MAX_LEVEL_SPAN`] levels.
	pub fn parse(means: EnchantmentObtainmentMeans, expr: &str) -> Result<Self> {
		let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
		let mut levels = Vec::new();

		for token in compact.split(',') {
			if token.is_empty() {
				return Err(ValidationError::EmptyLevelToken { expr: expr.to_string() });
			}

			match token.split_once('-') {
				Some((start, end)) => {
					let start = parse_level(expr, token, start)?;
					let end = parse_level(expr, token, end)?;
					if start > end {
						return Err(ValidationError::DescendingRange {
							expr: expr.to_string(),
							start,
							end,
						});
					}
					if end - start >= MAX_LEVEL_SPAN {
						return Err(ValidationError::RangeTooWide {
							expr: expr.to_string(),
							start,
							end,
						});
					}
					levels.extend(start..=end);
				}
				None => levels.push(parse_level(expr, token, token)?),
			}
		}

		Ok(Self { means, levels })
	}

	pub fn means(&self) -> EnchantmentObtainmentMeans {
		self.means
	}

	pub fn levels(&self) -> &[i32] {
		&self.levels
	}

	pub fn allows(&self, level: i32) -> bool {
		self.levels.contains(&level)
	}
}

fn parse_level(expr: &str, token: &str, digits: &str) -> Result<i32> {
	let level: i32 = digits.parse().map_err(|_| ValidationError::InvalidLevelToken {
		expr: expr.to_string(),
		token: token.to_string(),
	})?;
	check_level(i64::from(level))?;
	Ok(level)
}

impl Describe for EnchantmentObtainmentRestriction {
	fn describe_shortly(&self, _locale: &Locale) -> Option<String> {
		let levels: Vec<String> = self.levels.iter().map(i32::to_string).collect();
		Some(format!("{} ({})", self.means, levels.join(", ")))
	}
}
