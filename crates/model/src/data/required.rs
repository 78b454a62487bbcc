use std::sync::Arc;

use underscore_locale::{Locale, Message};

use crate::describe::Describe;
use crate::error::{Result, check_level};
use crate::key::NamespacedKey;
use crate::registrable::{RegistrableEnchantmentSeeker, RegistrableLookup, rebind};

use super::alias_of;

/// Another enchantment that must be present for an enchantment to activate.
///
/// At least one of the seekers has to find the enchantment. With no seekers
/// the enchantment is looked for on the activating item. An empty level list
/// accepts any level.
#[derive(Clone)]
pub struct RequiredEnchantment {
	key: NamespacedKey,
	seekers: Vec<Arc<dyn RegistrableEnchantmentSeeker>>,
	levels: Vec<i32>,
}

impl RequiredEnchantment {
	pub fn new(key: NamespacedKey, seekers: Vec<Arc<dyn RegistrableEnchantmentSeeker>>, levels: Vec<i32>) -> Result<Self> {
		for &level in &levels {
			check_level(i64::from(level))?;
		}
		Ok(Self { key, seekers, levels })
	}

	pub fn key(&self) -> &NamespacedKey {
		&self.key
	}

	pub fn seekers(&self) -> &[Arc<dyn RegistrableEnchantmentSeeker>] {
		&self.seekers
	}

	pub fn levels(&self) -> &[i32] {
		&self.levels
	}

	pub fn accepts_level(&self, level: i32) -> bool {
		self.levels.is_empty() || self.levels.contains(&level)
	}

	pub(crate) fn rebind(&self, lookup: &dyn RegistrableLookup, changed: &mut bool) -> Self {
		Self {
			seekers: self.seekers.iter().map(|s| rebind(s, lookup, changed)).collect(),
			..self.clone()
		}
	}
}

impl std::fmt::Debug for RequiredEnchantment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let seekers: Vec<&str> = self.seekers.iter().map(alias_of).collect();
		f.debug_struct("RequiredEnchantment")
			.field("key", &self.key)
			.field("seekers", &seekers)
			.field("levels", &self.levels)
			.finish()
	}
}

impl Describe for RequiredEnchantment {
	fn describe_shortly(&self, locale: &Locale) -> Option<String> {
		let seekers: Vec<&str> = self.seekers.iter().map(alias_of).collect();
		let levels: Vec<String> = self.levels.iter().map(i32::to_string).collect();
		Some(format!(
			"{} ({}: {}) ({}: {})",
			self.key.key(),
			locale.get(Message::LogTokenRegistrySeekerPlural),
			seekers.join(", "),
			locale.get(Message::TokenEnchantmentLevels),
			levels.join(", "),
		))
	}
}

/// A plugin an enchantment needs in order to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredPlugin {
	/// Exact name of the plugin.
	pub plugin_name: String,
	/// Free-form text shown to users, e.g. `PlaceholderAPI 2.10.9+`.
	pub display_name: String,
	pub link: String,
}

impl RequiredPlugin {
	pub fn new(plugin_name: impl Into<String>, display_name: impl Into<String>, link: impl Into<String>) -> Self {
		Self {
			plugin_name: plugin_name.into(),
			display_name: display_name.into(),
			link: link.into(),
		}
	}
}

impl Describe for RequiredPlugin {
	fn describe_shortly(&self, locale: &Locale) -> Option<String> {
		Some(format!(
			"{} ({}), {}: {}",
			self.plugin_name,
			self.display_name,
			locale.get(Message::TokenEnchantmentRequiredPluginLink),
			self.link,
		))
	}
}
