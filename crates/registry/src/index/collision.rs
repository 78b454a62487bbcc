//! Collision types.
//!
//! # Role
//!
//! This module defines the vocabulary for alias conflicts. A conflict never
//! aborts a registration; it is recorded, logged and handed back to the caller.

use underscore_model::PluginId;

/// One side of a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
	pub plugin: PluginId,
	/// Stable ingest ordinal: the provider ordinal for registrables, the load
	/// position for enchantments and packs.
	pub ordinal: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
	/// Existing binding kept; incoming alias skipped.
	KeptExisting,
	/// Existing binding replaced by incoming. Only loading an enchantment
	/// under a key that is already loaded does this.
	ReplacedExisting,
}

/// An alias was already bound when another party tried to claim it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{registry} '{alias}' from {} is already registered by {}", .incoming.plugin, .existing.plugin)]
pub struct Collision {
	/// Table the conflict happened in (`action`, `trigger`, `enchantment`, ...).
	pub registry: &'static str,
	/// The alias as the incoming party spelled it.
	pub alias: String,
	pub existing: Party,
	pub incoming: Party,
	pub resolution: Resolution,
}

impl Collision {
	/// Returns true if `plugin` is on either side.
	pub fn involves(&self, plugin: &PluginId) -> bool {
		&self.existing.plugin == plugin || &self.incoming.plugin == plugin
	}

	pub(crate) fn log(&self) {
		match self.resolution {
			Resolution::KeptExisting => tracing::warn!(
				registry = self.registry,
				alias = %self.alias,
				existing = %self.existing.plugin,
				incoming = %self.incoming.plugin,
				"alias already registered"
			),
			Resolution::ReplacedExisting => tracing::info!(
				registry = self.registry,
				alias = %self.alias,
				existing = %self.existing.plugin,
				incoming = %self.incoming.plugin,
				"registered entry replaced"
			),
		}
	}
}
