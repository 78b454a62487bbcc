use std::sync::Arc;

use underscore_locale::Locale;

use crate::describe::{Describe, decimal};
use crate::error::{Result, check_chance};
use crate::host::{Event, EventModifications, TargetType};
use crate::registrable::{RegistrableAction, RegistrableLookup, RegistrableTrigger, rebind};
use crate::time::Time;

use super::EnchantmentCondition;

/// An action of an enchantment level, with its chance, delay and arguments.
#[derive(Clone)]
pub struct EnchantmentAction {
	action: Arc<dyn RegistrableAction>,
	chance: f64,
	delay: Time,
	target: TargetType,
	arguments: Vec<String>,
	conditions: Vec<EnchantmentCondition>,
}

impl EnchantmentAction {
	/// Fails if `chance` is outside `0.0..=100.0` or `delay` is negative.
	pub fn new(
		action: Arc<dyn RegistrableAction>,
		chance: f64,
		delay: Time,
		target: TargetType,
		arguments: Vec<String>,
		conditions: Vec<EnchantmentCondition>,
	) -> Result<Self> {
		check_chance("chance", chance)?;
		let delay = delay.check_non_negative("delay")?;
		Ok(Self {
			action,
			chance,
			delay,
			target,
			arguments,
			conditions,
		})
	}

	pub fn action(&self) -> &Arc<dyn RegistrableAction> {
		&self.action
	}

	pub fn chance(&self) -> f64 {
		self.chance
	}

	pub fn delay(&self) -> Time {
		self.delay
	}

	pub fn target(&self) -> TargetType {
		self.target
	}

	pub fn arguments(&self) -> &[String] {
		&self.arguments
	}

	pub fn conditions(&self) -> &[EnchantmentCondition] {
		&self.conditions
	}

	/// Runs the action if every attached condition holds.
	///
	/// Chance and delay are the caller's concern. Returned modifications are
	/// only meaningful when the delay is zero.
	pub fn run(&self, event: &dyn Event, trigger: &dyn RegistrableTrigger) -> Option<EventModifications> {
		if !self.conditions.iter().all(|c| c.evaluate(trigger, event)) {
			return None;
		}
		self.action.execute(event, trigger, &self.arguments, self.target)
	}

	pub(crate) fn rebind(&self, lookup: &dyn RegistrableLookup, changed: &mut bool) -> Self {
		Self {
			action: rebind(&self.action, lookup, changed),
			conditions: self.conditions.iter().map(|c| c.rebind(lookup, changed)).collect(),
			..self.clone()
		}
	}
}

impl std::fmt::Debug for EnchantmentAction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EnchantmentAction")
			.field("action", &self.action.primary_alias())
			.field("chance", &self.chance)
			.field("delay", &self.delay)
			.field("target", &self.target)
			.field("arguments", &self.arguments)
			.field("conditions", &self.conditions)
			.finish()
	}
}

impl Describe for EnchantmentAction {
	/// `name[ (args)][ (conditions)] (TARGET, chance)`
	fn describe_shortly(&self, locale: &Locale) -> Option<String> {
		let name = self.action.primary_alias()?;
		let mut out = String::from(name);
		if !self.arguments.is_empty() {
			out.push_str(&format!(" ({})", self.arguments.join(" ")));
		}
		if !self.conditions.is_empty() {
			let conditions: Vec<String> = self.conditions.iter().filter_map(|c| c.describe_shortly(locale)).collect();
			out.push_str(&format!(" ({})", conditions.join(" ")));
		}
		out.push_str(&format!(" ({}, {})", self.target, decimal(self.chance)));
		Some(out)
	}
}
