use std::sync::Arc;

use underscore_locale::{Locale, Message};

use crate::describe::Describe;
use crate::error::{Result, ValidationError};
use crate::host::Material;
use crate::registrable::Registrable;

use super::Enchantment;

/// Descriptive data of an enchantment pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnchantmentPackMetadata {
	name: String,
	version: String,
	authors: Vec<String>,
	description: Vec<String>,
	website: Option<String>,
	world_blacklist: Vec<String>,
	world_whitelist: Vec<String>,
	item: Material,
}

impl EnchantmentPackMetadata {
	pub fn builder() -> EnchantmentPackMetadataBuilder {
		EnchantmentPackMetadataBuilder::default()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn authors(&self) -> &[String] {
		&self.authors
	}

	pub fn description(&self) -> &[String] {
		&self.description
	}

	pub fn website(&self) -> Option<&str> {
		self.website.as_deref()
	}

	pub fn world_blacklist(&self) -> &[String] {
		&self.world_blacklist
	}

	pub fn world_whitelist(&self) -> &[String] {
		&self.world_whitelist
	}

	/// Material shown for the pack in menus.
	pub fn item(&self) -> &Material {
		&self.item
	}
}

/// Builder for [`EnchantmentPackMetadata`]. Every field except the website is
/// required.
#[derive(Debug, Default)]
pub struct EnchantmentPackMetadataBuilder {
	name: Option<String>,
	version: Option<String>,
	authors: Option<Vec<String>>,
	description: Option<Vec<String>>,
	website: Option<String>,
	world_blacklist: Option<Vec<String>>,
	world_whitelist: Option<Vec<String>>,
	item: Option<Material>,
}

impl EnchantmentPackMetadataBuilder {
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn version(mut self, version: impl Into<String>) -> Self {
		self.version = Some(version.into());
		self
	}

	pub fn authors(mut self, authors: Vec<String>) -> Self {
		self.authors = Some(authors);
		self
	}

	pub fn description(mut self, description: Vec<String>) -> Self {
		self.description = Some(description);
		self
	}

	pub fn website(mut self, website: impl Into<String>) -> Self {
		self.website = Some(website.into());
		self
	}

	pub fn world_blacklist(mut self, worlds: Vec<String>) -> Self {
		self.world_blacklist = Some(worlds);
		self
	}

	pub fn world_whitelist(mut self, worlds: Vec<String>) -> Self {
		self.world_whitelist = Some(worlds);
		self
	}

	pub fn item(mut self, item: Material) -> Self {
		self.item = Some(item);
		self
	}

	pub fn build(self) -> Result<EnchantmentPackMetadata> {
		Ok(EnchantmentPackMetadata {
			name: self.name.ok_or(ValidationError::MissingField("name"))?,
			version: self.version.ok_or(ValidationError::MissingField("version"))?,
			authors: self.authors.ok_or(ValidationError::MissingField("authors"))?,
			description: self.description.ok_or(ValidationError::MissingField("description"))?,
			website: self.website,
			world_blacklist: self.world_blacklist.ok_or(ValidationError::MissingField("world blacklist"))?,
			world_whitelist: self.world_whitelist.ok_or(ValidationError::MissingField("world whitelist"))?,
			item: self.item.ok_or(ValidationError::MissingField("item"))?,
		})
	}
}

impl Describe for EnchantmentPackMetadata {
	/// `name vVERSION (ITEM) by authors[ (website)][ (blacklist)][ (whitelist)][ (description)]`
	fn describe_shortly(&self, locale: &Locale) -> Option<String> {
		let mut out = format!(
			"{} v{} ({}) {} {}",
			self.name,
			self.version,
			self.item,
			locale.get(Message::TokenEnchantmentBy),
			self.authors.join(", ")
		);
		if let Some(website) = &self.website {
			out.push_str(&format!(" ({website})"));
		}
		if !self.world_blacklist.is_empty() {
			out.push_str(&format!(
				" ({}: {})",
				locale.get(Message::TokenEnchantmentBlacklist),
				self.world_blacklist.join(", ")
			));
		}
		if !self.world_whitelist.is_empty() {
			out.push_str(&format!(
				" ({}: {})",
				locale.get(Message::TokenEnchantmentWhitelist),
				self.world_whitelist.join(", ")
			));
		}
		if !self.description.is_empty() {
			out.push_str(&format!(" ({})", self.description.join(", ")));
		}
		Some(out)
	}
}

/// A named group of enchantments distributed together.
#[derive(Debug, Clone)]
pub struct EnchantmentPack {
	metadata: EnchantmentPackMetadata,
	enchantments: Vec<Arc<Enchantment>>,
}

impl EnchantmentPack {
	pub fn new(metadata: EnchantmentPackMetadata, enchantments: Vec<Arc<Enchantment>>) -> Self {
		Self { metadata, enchantments }
	}

	pub fn metadata(&self) -> &EnchantmentPackMetadata {
		&self.metadata
	}

	pub fn name(&self) -> &str {
		self.metadata.name()
	}

	pub fn enchantments(&self) -> &[Arc<Enchantment>] {
		&self.enchantments
	}
}

impl Describe for EnchantmentPack {
	fn describe_shortly(&self, locale: &Locale) -> Option<String> {
		let metadata = self.metadata.describe_shortly(locale).unwrap_or_default();
		let names: Vec<&str> = self.enchantments.iter().filter_map(|e| e.primary_alias()).collect();
		Some(format!(
			"{metadata}; {}: {}",
			locale.get(Message::TokenEnchantments),
			names.join(", ")
		))
	}
}
