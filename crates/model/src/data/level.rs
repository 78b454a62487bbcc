use underscore_locale::{Locale, Message};

use crate::describe::{Describe, decimal};
use crate::error::{Result, check_chance, check_level};
use crate::registrable::RegistrableLookup;
use crate::time::Time;

use super::{EnchantmentAction, EnchantmentCondition};

/// One level of an enchantment.
#[derive(Debug, Clone)]
pub struct EnchantmentLevel {
	level: i32,
	conditions: Vec<EnchantmentCondition>,
	chance: f64,
	cooldown: Time,
	actions: Vec<EnchantmentAction>,
}

impl EnchantmentLevel {
	pub fn new(
		level: i32,
		conditions: Vec<EnchantmentCondition>,
		chance: f64,
		cooldown: Time,
		actions: Vec<EnchantmentAction>,
	) -> Result<Self> {
		check_level(i64::from(level))?;
		check_chance("chance", chance)?;
		let cooldown = cooldown.check_non_negative("cooldown")?;
		Ok(Self {
			level,
			conditions,
			chance,
			cooldown,
			actions,
		})
	}

	pub fn level(&self) -> i32 {
		self.level
	}

	pub fn conditions(&self) -> &[EnchantmentCondition] {
		&self.conditions
	}

	pub fn chance(&self) -> f64 {
		self.chance
	}

	pub fn cooldown(&self) -> Time {
		self.cooldown
	}

	pub fn actions(&self) -> &[EnchantmentAction] {
		&self.actions
	}

	pub(crate) fn rebind(&self, lookup: &dyn RegistrableLookup, changed: &mut bool) -> Self {
		Self {
			conditions: self.conditions.iter().map(|c| c.rebind(lookup, changed)).collect(),
			actions: self.actions.iter().map(|a| a.rebind(lookup, changed)).collect(),
			..self.clone()
		}
	}
}

impl Describe for EnchantmentLevel {
	fn describe_shortly(&self, locale: &Locale) -> Option<String> {
		let bracketed = |items: Vec<Option<String>>| {
			items
				.into_iter()
				.map(|s| format!("[{}]", s.unwrap_or_default()))
				.collect::<Vec<_>>()
				.join(", ")
		};
		let actions = bracketed(self.actions.iter().map(|a| a.describe_shortly(locale)).collect());
		let conditions = bracketed(self.conditions.iter().map(|c| c.describe_shortly(locale)).collect());

		Some(format!(
			"{}; {}: {}; {}: {}; {}: {}; {}: {}",
			self.level,
			locale.get(Message::TokenEnchantmentActions),
			actions,
			locale.get(Message::TokenEnchantmentConditions),
			conditions,
			locale.get(Message::TokenEnchantmentChance),
			decimal(self.chance),
			locale.get(Message::TokenEnchantmentCooldown),
			self.cooldown.ticks(),
		))
	}
}
