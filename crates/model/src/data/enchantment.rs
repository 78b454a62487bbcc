use std::sync::Arc;

use underscore_locale::{Locale, Message};

use crate::describe::{Describe, decimal};
use crate::error::{Result, ValidationError, check_chance};
use crate::host::{EnchantmentObtainmentMeans, Material};
use crate::key::NamespacedKey;
use crate::registrable::{
	Registrable, RegistrableActivationIndicator, RegistrableApplicable, RegistrableEnchantmentSeeker, RegistrableLookup,
	RegistrableTrigger, UndiscoveredRef, rebind,
};
use crate::time::Time;

use super::{
	EnchantmentCondition, EnchantmentLevel, EnchantmentObtainmentRestriction, RequiredEnchantment, RequiredPlugin,
	alias_of,
};

/// A fully assembled enchantment.
///
/// Built through [`Enchantment::builder`]. References to registrables that
/// were not provided yet are held as [`crate::Undiscovered`] placeholders and
/// swapped out by [`Enchantment::rebind`].
#[derive(Clone)]
pub struct Enchantment {
	key: NamespacedKey,
	aliases: Vec<String>,
	author: String,
	description: Vec<String>,
	activation_chance: f64,
	cooldown: Time,
	trigger: Arc<dyn RegistrableTrigger>,
	indicator: Arc<dyn RegistrableActivationIndicator>,
	applicables: Vec<Arc<dyn RegistrableApplicable>>,
	forbidden_materials: Vec<Material>,
	conditions: Vec<EnchantmentCondition>,
	conflicts: Vec<String>,
	levels: Vec<EnchantmentLevel>,
	restrictions: Vec<EnchantmentObtainmentRestriction>,
	seekers: Vec<Arc<dyn RegistrableEnchantmentSeeker>>,
	unique: bool,
	required_enchantments: Vec<RequiredEnchantment>,
	world_blacklist: Vec<String>,
	world_whitelist: Vec<String>,
	required_plugins: Vec<RequiredPlugin>,
}

impl Enchantment {
	pub fn builder(key: NamespacedKey) -> EnchantmentBuilder {
		EnchantmentBuilder::new(key)
	}

	pub fn key(&self) -> &NamespacedKey {
		&self.key
	}

	pub fn author(&self) -> &str {
		&self.author
	}

	pub fn description(&self) -> &[String] {
		&self.description
	}

	pub fn activation_chance(&self) -> f64 {
		self.activation_chance
	}

	pub fn cooldown(&self) -> Time {
		self.cooldown
	}

	pub fn trigger(&self) -> &Arc<dyn RegistrableTrigger> {
		&self.trigger
	}

	pub fn indicator(&self) -> &Arc<dyn RegistrableActivationIndicator> {
		&self.indicator
	}

	pub fn applicables(&self) -> &[Arc<dyn RegistrableApplicable>] {
		&self.applicables
	}

	pub fn forbidden_materials(&self) -> &[Material] {
		&self.forbidden_materials
	}

	pub fn conditions(&self) -> &[EnchantmentCondition] {
		&self.conditions
	}

	/// Names of enchantments this one cannot coexist with.
	pub fn conflicts(&self) -> &[String] {
		&self.conflicts
	}

	/// Levels in declaration order.
	pub fn levels(&self) -> &[EnchantmentLevel] {
		&self.levels
	}

	pub fn restrictions(&self) -> &[EnchantmentObtainmentRestriction] {
		&self.restrictions
	}

	pub fn seekers(&self) -> &[Arc<dyn RegistrableEnchantmentSeeker>] {
		&self.seekers
	}

	/// Unique enchantments are never offered through vanilla obtainment.
	pub fn is_unique(&self) -> bool {
		self.unique
	}

	pub fn required_enchantments(&self) -> &[RequiredEnchantment] {
		&self.required_enchantments
	}

	pub fn world_blacklist(&self) -> &[String] {
		&self.world_blacklist
	}

	pub fn world_whitelist(&self) -> &[String] {
		&self.world_whitelist
	}

	pub fn required_plugins(&self) -> &[RequiredPlugin] {
		&self.required_plugins
	}

	pub fn max_level(&self) -> i32 {
		self.levels.iter().map(EnchantmentLevel::level).max().unwrap_or(0)
	}

	pub fn level(&self, level: i32) -> Option<&EnchantmentLevel> {
		self.levels.iter().find(|l| l.level() == level)
	}

	/// True if some applicable accepts `material` and it is not forbidden.
	pub fn can_be_applied_to(&self, material: &Material) -> bool {
		!self.forbidden_materials.contains(material) && self.applicables.iter().any(|a| a.can_be_applied_to(material))
	}

	/// Compares `other` against the conflict list, ignoring case.
	pub fn conflicts_with(&self, other: &str) -> bool {
		self.conflicts.iter().any(|c| c.eq_ignore_ascii_case(other))
	}

	/// A non-empty whitelist admits only its worlds; otherwise the blacklist
	/// excludes.
	pub fn is_world_allowed(&self, world: &str) -> bool {
		if !self.world_whitelist.is_empty() {
			return self.world_whitelist.iter().any(|w| w == world);
		}
		!self.world_blacklist.iter().any(|w| w == world)
	}

	/// Whether `level` may be obtained through `means`. Means without a
	/// restriction allow every level; unique enchantments allow none.
	pub fn can_be_obtained(&self, means: EnchantmentObtainmentMeans, level: i32) -> bool {
		if self.unique {
			return false;
		}
		self.restrictions
			.iter()
			.find(|r| r.means() == means)
			.is_none_or(|r| r.allows(level))
	}

	/// Lists every placeholder reference this enchantment still holds.
	pub fn undiscovered_refs(&self) -> Vec<UndiscoveredRef> {
		let mut refs = Vec::new();
		let mut push = |item: Option<&UndiscoveredRef>| {
			if let Some(r) = item {
				refs.push(r.clone());
			}
		};

		push(self.trigger.undiscovered());
		push(self.indicator.undiscovered());
		self.applicables.iter().for_each(|a| push(a.undiscovered()));
		self.seekers.iter().for_each(|s| push(s.undiscovered()));

		let conditions = self
			.conditions
			.iter()
			.chain(self.levels.iter().flat_map(EnchantmentLevel::conditions))
			.chain(
				self.levels
					.iter()
					.flat_map(EnchantmentLevel::actions)
					.flat_map(|a| a.conditions()),
			);
		conditions.for_each(|c| push(c.condition().undiscovered()));

		for action in self.levels.iter().flat_map(EnchantmentLevel::actions) {
			push(action.action().undiscovered());
		}
		for required in &self.required_enchantments {
			required.seekers().iter().for_each(|s| push(s.undiscovered()));
		}

		refs
	}

	/// Rebuilds this enchantment with every placeholder `lookup` can resolve
	/// replaced by the registered object, and every object `lookup` releases
	/// replaced by its successor or a placeholder. Returns `None` if nothing
	/// changed.
	pub fn rebind(&self, lookup: &dyn RegistrableLookup) -> Option<Enchantment> {
		let mut changed = false;
		let flag = &mut changed;

		let next = Enchantment {
			trigger: rebind(&self.trigger, lookup, flag),
			indicator: rebind(&self.indicator, lookup, flag),
			applicables: self
				.applicables
				.iter()
				.map(|a| rebind(a, lookup, flag))
				.collect(),
			seekers: self.seekers.iter().map(|s| rebind(s, lookup, flag)).collect(),
			conditions: self.conditions.iter().map(|c| c.rebind(lookup, flag)).collect(),
			levels: self.levels.iter().map(|l| l.rebind(lookup, flag)).collect(),
			required_enchantments: self.required_enchantments.iter().map(|r| r.rebind(lookup, flag)).collect(),
			..self.clone()
		};

		changed.then_some(next)
	}
}

impl Registrable for Enchantment {
	fn aliases(&self) -> &[String] {
		&self.aliases
	}
}

impl std::fmt::Debug for Enchantment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Enchantment")
			.field("key", &self.key)
			.field("aliases", &self.aliases)
			.field("trigger", &alias_of(&self.trigger))
			.field("levels", &self.levels.len())
			.finish_non_exhaustive()
	}
}

impl Describe for Enchantment {
	fn describe_shortly(&self, _locale: &Locale) -> Option<String> {
		let name = self.primary_alias()?;
		Some(format!("{name} ({})", self.key))
	}

	fn describe(&self, locale: &Locale) -> Vec<String> {
		let Some(head) = self.describe_shortly(locale) else {
			return Vec::new();
		};
		let token = move |m: Message| locale.get(m);
		let list = |items: Vec<&str>| items.join(", ");
		let yes_no = move |b: bool| if b { token(Message::Yes) } else { token(Message::No) };

		let mut lines = vec![format!("{}: {head}", token(Message::TokenEnchantment))];
		lines.push(format!("{}: {}", token(Message::TokenEnchantmentAuthor), self.author));
		if !self.description.is_empty() {
			lines.push(format!("{}: {}", token(Message::TokenEnchantmentDescription), self.description.join(" ")));
		}
		lines.push(format!(
			"{}: {}; {}: {}",
			token(Message::TokenEnchantmentChance),
			decimal(self.activation_chance),
			token(Message::TokenEnchantmentCooldown),
			self.cooldown.ticks()
		));
		lines.push(format!("{}: {}", token(Message::TokenEnchantmentTrigger), alias_of(&self.trigger)));
		lines.push(format!("{}: {}", token(Message::TokenEnchantmentIndicator), alias_of(&self.indicator)));
		lines.push(format!(
			"{}: {}",
			token(Message::TokenEnchantmentApplicables),
			list(self.applicables.iter().map(alias_of).collect())
		));
		if !self.forbidden_materials.is_empty() {
			lines.push(format!(
				"{}: {}",
				token(Message::TokenEnchantmentForbidden),
				list(self.forbidden_materials.iter().map(Material::name).collect())
			));
		}
		if !self.conditions.is_empty() {
			let conditions: Vec<String> = self.conditions.iter().filter_map(|c| c.describe_shortly(locale)).collect();
			lines.push(format!("{}: {}", token(Message::TokenEnchantmentConditions), conditions.join(", ")));
		}
		if !self.conflicts.is_empty() {
			lines.push(format!(
				"{}: {}",
				token(Message::TokenEnchantmentConflicts),
				list(self.conflicts.iter().map(String::as_str).collect())
			));
		}

		lines.push(format!("{}:", token(Message::TokenEnchantmentLevels)));
		lines.extend(self.levels.iter().filter_map(|l| l.describe_shortly(locale)).map(|l| format!("  {l}")));

		if !self.restrictions.is_empty() {
			let restrictions: Vec<String> = self.restrictions.iter().filter_map(|r| r.describe_shortly(locale)).collect();
			lines.push(format!("{}: {}", token(Message::TokenEnchantmentRestrictions), restrictions.join(", ")));
		}
		lines.push(format!(
			"{}: {}",
			token(Message::TokenEnchantmentSeekers),
			list(self.seekers.iter().map(alias_of).collect())
		));
		lines.push(format!("{}: {}", token(Message::TokenEnchantmentUnique), yes_no(self.unique)));

		let required: Vec<String> = self
			.required_enchantments
			.iter()
			.filter_map(|r| r.describe_shortly(locale))
			.chain(self.required_plugins.iter().filter_map(|p| p.describe_shortly(locale)))
			.collect();
		if !required.is_empty() {
			lines.push(format!("{}: {}", token(Message::TokenEnchantmentRequired), required.join("; ")));
		}
		if !self.world_blacklist.is_empty() {
			lines.push(format!("{}: {}", token(Message::TokenEnchantmentBlacklist), self.world_blacklist.join(", ")));
		}
		if !self.world_whitelist.is_empty() {
			lines.push(format!("{}: {}", token(Message::TokenEnchantmentWhitelist), self.world_whitelist.join(", ")));
		}

		lines
	}
}

/// Builder for [`Enchantment`].
///
/// Defaults: activation chance 100, no cooldown, not unique, every list empty.
pub struct EnchantmentBuilder {
	inner: Enchantment,
	trigger: Option<Arc<dyn RegistrableTrigger>>,
	indicator: Option<Arc<dyn RegistrableActivationIndicator>>,
}

impl EnchantmentBuilder {
	fn new(key: NamespacedKey) -> Self {
		let placeholder = Arc::new(crate::Undiscovered::new(crate::RegistrableKind::Trigger, ""));
		Self {
			inner: Enchantment {
				key,
				aliases: Vec::new(),
				author: String::new(),
				description: Vec::new(),
				activation_chance: 100.0,
				cooldown: Time::ZERO,
				trigger: placeholder.clone(),
				indicator: placeholder,
				applicables: Vec::new(),
				forbidden_materials: Vec::new(),
				conditions: Vec::new(),
				conflicts: Vec::new(),
				levels: Vec::new(),
				restrictions: Vec::new(),
				seekers: Vec::new(),
				unique: false,
				required_enchantments: Vec::new(),
				world_blacklist: Vec::new(),
				world_whitelist: Vec::new(),
				required_plugins: Vec::new(),
			},
			trigger: None,
			indicator: None,
		}
	}

	pub fn aliases<I, S>(mut self, aliases: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.inner.aliases = aliases.into_iter().map(Into::into).collect();
		self
	}

	pub fn author(mut self, author: impl Into<String>) -> Self {
		self.inner.author = author.into();
		self
	}

	pub fn description(mut self, description: Vec<String>) -> Self {
		self.inner.description = description;
		self
	}

	pub fn activation_chance(mut self, chance: f64) -> Self {
		self.inner.activation_chance = chance;
		self
	}

	pub fn cooldown(mut self, cooldown: Time) -> Self {
		self.inner.cooldown = cooldown;
		self
	}

	pub fn trigger(mut self, trigger: Arc<dyn RegistrableTrigger>) -> Self {
		self.trigger = Some(trigger);
		self
	}

	pub fn indicator(mut self, indicator: Arc<dyn RegistrableActivationIndicator>) -> Self {
		self.indicator = Some(indicator);
		self
	}

	pub fn applicable(mut self, applicable: Arc<dyn RegistrableApplicable>) -> Self {
		self.inner.applicables.push(applicable);
		self
	}

	pub fn forbidden_material(mut self, material: Material) -> Self {
		self.inner.forbidden_materials.push(material);
		self
	}

	pub fn condition(mut self, condition: EnchantmentCondition) -> Self {
		self.inner.conditions.push(condition);
		self
	}

	pub fn conflict(mut self, name: impl Into<String>) -> Self {
		self.inner.conflicts.push(name.into());
		self
	}

	pub fn level(mut self, level: EnchantmentLevel) -> Self {
		self.inner.levels.push(level);
		self
	}

	pub fn restriction(mut self, restriction: EnchantmentObtainmentRestriction) -> Self {
		self.inner.restrictions.push(restriction);
		self
	}

	pub fn seeker(mut self, seeker: Arc<dyn RegistrableEnchantmentSeeker>) -> Self {
		self.inner.seekers.push(seeker);
		self
	}

	pub fn unique(mut self, unique: bool) -> Self {
		self.inner.unique = unique;
		self
	}

	pub fn required_enchantment(mut self, required: RequiredEnchantment) -> Self {
		self.inner.required_enchantments.push(required);
		self
	}

	pub fn world_blacklist(mut self, worlds: Vec<String>) -> Self {
		self.inner.world_blacklist = worlds;
		self
	}

	pub fn world_whitelist(mut self, worlds: Vec<String>) -> Self {
		self.inner.world_whitelist = worlds;
		self
	}

	pub fn required_plugin(mut self, plugin: RequiredPlugin) -> Self {
		self.inner.required_plugins.push(plugin);
		self
	}

	pub fn build(self) -> Result<Enchantment> {
		let mut enchantment = self.inner;
		enchantment.trigger = self.trigger.ok_or(ValidationError::MissingField("trigger"))?;
		enchantment.indicator = self.indicator.ok_or(ValidationError::MissingField("activation indicator"))?;

		if enchantment.aliases.is_empty() {
			return Err(ValidationError::NoAliases);
		}
		if enchantment.levels.is_empty() {
			return Err(ValidationError::NoLevels);
		}
		let mut seen = Vec::with_capacity(enchantment.levels.len());
		for level in &enchantment.levels {
			if seen.contains(&level.level()) {
				return Err(ValidationError::DuplicateLevel(level.level()));
			}
			seen.push(level.level());
		}
		check_chance("activation chance", enchantment.activation_chance)?;
		enchantment.cooldown = enchantment.cooldown.check_non_negative("cooldown")?;

		Ok(enchantment)
	}
}
