//! Applying and removing loaded enchantments on items.
//!
//! # Role
//!
//! [`Enchanter`] is a borrowed view over the [`Registry`] that other plugins
//! use to put enchantments on items and take them off. Items are plain
//! [`ItemStack`] values; writing them back into an inventory is the caller's
//! concern.
//!
//! # Invariants
//!
//! - A refused enchant hands the item back unchanged.
//! - Enchantments the registry does not know (vanilla ones) are never removed.

use underscore_model::{Enchantment, ItemStack, NamespacedKey, Registrable};

use crate::index::Registry;

/// A check [`Enchanter::enchant`] performs unless the caller lifts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnchantingRestriction {
	/// Some applicable must accept the item's material.
	Applicability,
	/// The level may not exceed the enchantment's highest level.
	Level,
	/// A unique enchantment must be alone on the item.
	Unique,
	/// No enchantment on the item may conflict with the new one.
	Conflicts,
	/// The item may not carry more enchantments than the configured limit.
	Limit,
}

/// Outcome of [`Enchanter::enchant`], in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnchantResponseType {
	Success,
	NotApplicable,
	LevelTooHigh,
	/// The enchantment is unique and the item already carries others.
	CantApplyUnique,
	/// The item already carries a unique enchantment.
	HasUnique,
	Conflicts,
	LimitExceeded,
}

impl EnchantResponseType {
	pub fn is_success(self) -> bool {
		self == Self::Success
	}
}

/// What an enchant request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnchantResponse {
	pub kind: EnchantResponseType,
	pub key: NamespacedKey,
	pub level: i32,
	/// The enchanted item, or the untouched input when refused.
	pub item: ItemStack,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnchanterError {
	#[error("'{0}' is not a loaded enchantment")]
	UnknownEnchantment(NamespacedKey),

	#[error("the item does not carry '{0}'")]
	NotEnchanted(NamespacedKey),

	#[error("level must be greater than 0, got {0}")]
	NonPositiveLevel(i32),
}

/// Enchants and disenchants items with loaded enchantments.
pub struct Enchanter<'a> {
	registry: &'a Registry,
	/// Most enchantments an item may carry; 0 for no limit.
	limit: u32,
}

impl<'a> Enchanter<'a> {
	pub fn new(registry: &'a Registry, limit: u32) -> Self {
		Self { registry, limit }
	}

	/// Key of the loaded enchantment called `name`: an alias, a
	/// `namespace:key` or the local part of a key.
	pub fn enchantment_key(&self, name: &str) -> Option<NamespacedKey> {
		self.registry
			.find_enchantment(name)
			.or_else(|| {
				NamespacedKey::parse(name)
					.ok()
					.and_then(|key| self.registry.find_enchantment_by_key(&key))
			})
			.or_else(|| self.registry.find_enchantment_by_key_string(name))
			.map(|e| e.key().clone())
	}

	/// Puts `key` on `item` at `level`, unless a check outside `lifted`
	/// refuses. An existing level of the same enchantment is overwritten.
	pub fn enchant(
		&self,
		mut item: ItemStack,
		key: &NamespacedKey,
		level: i32,
		lifted: &[EnchantingRestriction],
	) -> Result<EnchantResponse, EnchanterError> {
		let enchantment = self
			.registry
			.find_enchantment_by_key(key)
			.ok_or_else(|| EnchanterError::UnknownEnchantment(key.clone()))?;
		if level < 1 {
			return Err(EnchanterError::NonPositiveLevel(level));
		}

		let kind = self.check(&enchantment, &item, level, lifted);
		if kind.is_success() {
			item.enchantments.insert(key.clone(), level);
		}
		tracing::debug!(key = %key, level, material = %item.material, response = ?kind, "enchant requested");

		Ok(EnchantResponse {
			kind,
			key: key.clone(),
			level,
			item,
		})
	}

	/// Removes the loaded enchantment `key` from `item`.
	pub fn disenchant(&self, mut item: ItemStack, key: &NamespacedKey) -> Result<ItemStack, EnchanterError> {
		if self.registry.find_enchantment_by_key(key).is_none() {
			return Err(EnchanterError::UnknownEnchantment(key.clone()));
		}
		if item.enchantments.remove(key).is_none() {
			return Err(EnchanterError::NotEnchanted(key.clone()));
		}
		Ok(item)
	}

	/// Removes every loaded enchantment from `item`.
	pub fn fully_disenchant(&self, mut item: ItemStack) -> ItemStack {
		item.enchantments
			.retain(|key, _| self.registry.find_enchantment_by_key(key).is_none());
		item
	}

	fn check(&self, enchantment: &Enchantment, item: &ItemStack, level: i32, lifted: &[EnchantingRestriction]) -> EnchantResponseType {
		let enforced = |restriction| !lifted.contains(&restriction);
		let others: Vec<_> = item
			.enchantments
			.keys()
			.filter(|k| *k != enchantment.key())
			.map(|k| (k, self.registry.find_enchantment_by_key(k)))
			.collect();

		if enforced(EnchantingRestriction::Applicability) && !enchantment.can_be_applied_to(&item.material) {
			return EnchantResponseType::NotApplicable;
		}
		if enforced(EnchantingRestriction::Level) && level > enchantment.max_level() {
			return EnchantResponseType::LevelTooHigh;
		}
		if enforced(EnchantingRestriction::Unique) {
			if enchantment.is_unique() && !others.is_empty() {
				return EnchantResponseType::CantApplyUnique;
			}
			if others.iter().any(|(_, other)| other.as_ref().is_some_and(|o| o.is_unique())) {
				return EnchantResponseType::HasUnique;
			}
		}
		if enforced(EnchantingRestriction::Conflicts)
			&& others.iter().any(|(key, other)| conflicting(enchantment, key, other.as_deref()))
		{
			return EnchantResponseType::Conflicts;
		}
		let adds = !item.enchantments.contains_key(enchantment.key());
		if enforced(EnchantingRestriction::Limit) && self.limit > 0 && adds && item.enchantments.len() >= self.limit as usize {
			return EnchantResponseType::LimitExceeded;
		}
		EnchantResponseType::Success
	}
}

/// Names a conflict list may use for an enchantment: its full key, the local
/// part and, when loaded, its aliases.
fn names(key: &NamespacedKey, loaded: Option<&Enchantment>) -> Vec<String> {
	let mut names = vec![key.to_string(), key.key().to_string()];
	if let Some(enchantment) = loaded {
		names.extend(enchantment.aliases().iter().cloned());
	}
	names
}

/// Either side listing the other is a conflict.
fn conflicting(enchantment: &Enchantment, other_key: &NamespacedKey, other: Option<&Enchantment>) -> bool {
	names(other_key, other).iter().any(|n| enchantment.conflicts_with(n))
		|| other.is_some_and(|o| names(enchantment.key(), Some(enchantment)).iter().any(|n| o.conflicts_with(n)))
}
