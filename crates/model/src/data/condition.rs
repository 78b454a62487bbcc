use std::sync::Arc;

use underscore_locale::{Locale, Message};

use crate::describe::Describe;
use crate::host::{Event, TargetType};
use crate::registrable::{RegistrableCondition, RegistrableLookup, RegistrableTrigger, rebind};

/// A condition attached to an enchantment, level or action.
#[derive(Clone)]
pub struct EnchantmentCondition {
	condition: Arc<dyn RegistrableCondition>,
	negate: bool,
	target: TargetType,
	arguments: Vec<String>,
}

impl EnchantmentCondition {
	pub fn new(condition: Arc<dyn RegistrableCondition>, negate: bool, target: TargetType, arguments: Vec<String>) -> Self {
		Self {
			condition,
			negate,
			target,
			arguments,
		}
	}

	pub fn condition(&self) -> &Arc<dyn RegistrableCondition> {
		&self.condition
	}

	pub fn is_negated(&self) -> bool {
		self.negate
	}

	pub fn target(&self) -> TargetType {
		self.target
	}

	pub fn arguments(&self) -> &[String] {
		&self.arguments
	}

	/// Evaluates the underlying condition, inverted when negated.
	pub fn evaluate(&self, trigger: &dyn RegistrableTrigger, event: &dyn Event) -> bool {
		self.condition.evaluate(trigger, event, self.target, &self.arguments) != self.negate
	}

	pub(crate) fn rebind(&self, lookup: &dyn RegistrableLookup, changed: &mut bool) -> Self {
		Self {
			condition: rebind(&self.condition, lookup, changed),
			..self.clone()
		}
	}
}

impl std::fmt::Debug for EnchantmentCondition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EnchantmentCondition")
			.field("condition", &self.condition.primary_alias())
			.field("negate", &self.negate)
			.field("target", &self.target)
			.field("arguments", &self.arguments)
			.finish()
	}
}

impl Describe for EnchantmentCondition {
	/// `name[ args][ (negated)] (TARGET)`
	fn describe_shortly(&self, locale: &Locale) -> Option<String> {
		let name = self.condition.primary_alias()?;
		let mut out = String::from(name);
		if !self.arguments.is_empty() {
			out.push(' ');
			out.push_str(&self.arguments.join(" "));
		}
		if self.negate {
			out.push_str(&format!(" ({})", locale.get(Message::TokenEnchantmentNegated)));
		}
		out.push_str(&format!(" ({})", self.target));
		Some(out)
	}
}
