//! Published registry state.
//!
//! # Role
//!
//! Pure view types read by lookups. A [`Snapshot`] is never mutated after
//! publication; writers clone it, edit the clone and swap it in.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use underscore_model::{
	PluginId, RegistrableAction, RegistrableActivationIndicator, RegistrableApplicable, RegistrableCondition,
	RegistrableEnchantmentSeeker, RegistrableKind, RegistrableLookup, RegistrablePlaceholder, RegistrableTrigger,
};

use super::collision::Collision;
use super::store::EnchantmentStore;
use super::table::KindTable;

/// The seven kind tables and the collisions recorded while filling them.
#[derive(Clone)]
pub(crate) struct Tables {
	pub(crate) actions: KindTable<dyn RegistrableAction>,
	pub(crate) conditions: KindTable<dyn RegistrableCondition>,
	pub(crate) triggers: KindTable<dyn RegistrableTrigger>,
	pub(crate) placeholders: KindTable<dyn RegistrablePlaceholder>,
	pub(crate) seekers: KindTable<dyn RegistrableEnchantmentSeeker>,
	pub(crate) applicables: KindTable<dyn RegistrableApplicable>,
	pub(crate) indicators: KindTable<dyn RegistrableActivationIndicator>,
	pub(crate) collisions: Vec<Collision>,
}

impl Default for Tables {
	fn default() -> Self {
		Self {
			actions: KindTable::new(RegistrableKind::Action.label()),
			conditions: KindTable::new(RegistrableKind::Condition.label()),
			triggers: KindTable::new(RegistrableKind::Trigger.label()),
			placeholders: KindTable::new(RegistrableKind::Placeholder.label()),
			seekers: KindTable::new(RegistrableKind::Seeker.label()),
			applicables: KindTable::new(RegistrableKind::Applicable.label()),
			indicators: KindTable::new(RegistrableKind::ActivationIndicator.label()),
			collisions: Vec::new(),
		}
	}
}

impl Tables {
	/// Identities of every stored object, across all kinds.
	pub(crate) fn addresses(&self) -> impl Iterator<Item = usize> + '_ {
		self.actions
			.addresses()
			.chain(self.conditions.addresses())
			.chain(self.triggers.addresses())
			.chain(self.placeholders.addresses())
			.chain(self.seekers.addresses())
			.chain(self.applicables.addresses())
			.chain(self.indicators.addresses())
	}

	pub(crate) fn clear(&mut self) {
		self.actions.clear();
		self.conditions.clear();
		self.triggers.clear();
		self.placeholders.clear();
		self.seekers.clear();
		self.applicables.clear();
		self.indicators.clear();
		self.collisions.clear();
	}

	pub(crate) fn len(&self, kind: RegistrableKind) -> usize {
		match kind {
			RegistrableKind::Action => self.actions.len(),
			RegistrableKind::Condition => self.conditions.len(),
			RegistrableKind::Trigger => self.triggers.len(),
			RegistrableKind::Placeholder => self.placeholders.len(),
			RegistrableKind::Seeker => self.seekers.len(),
			RegistrableKind::Applicable => self.applicables.len(),
			RegistrableKind::ActivationIndicator => self.indicators.len(),
		}
	}

	pub(crate) fn owner_of(&self, kind: RegistrableKind, alias: &str) -> Option<PluginId> {
		let owner = match kind {
			RegistrableKind::Action => self.actions.get(alias).map(|e| &e.owner),
			RegistrableKind::Condition => self.conditions.get(alias).map(|e| &e.owner),
			RegistrableKind::Trigger => self.triggers.get(alias).map(|e| &e.owner),
			RegistrableKind::Placeholder => self.placeholders.get(alias).map(|e| &e.owner),
			RegistrableKind::Seeker => self.seekers.get(alias).map(|e| &e.owner),
			RegistrableKind::Applicable => self.applicables.get(alias).map(|e| &e.owner),
			RegistrableKind::ActivationIndicator => self.indicators.get(alias).map(|e| &e.owner),
		};
		owner.cloned()
	}
}

impl RegistrableLookup for Tables {
	fn action(&self, alias: &str) -> Option<Arc<dyn RegistrableAction>> {
		self.actions.find(alias)
	}

	fn condition(&self, alias: &str) -> Option<Arc<dyn RegistrableCondition>> {
		self.conditions.find(alias)
	}

	fn trigger(&self, alias: &str) -> Option<Arc<dyn RegistrableTrigger>> {
		self.triggers.find(alias)
	}

	fn seeker(&self, alias: &str) -> Option<Arc<dyn RegistrableEnchantmentSeeker>> {
		self.seekers.find(alias)
	}

	fn applicable(&self, alias: &str) -> Option<Arc<dyn RegistrableApplicable>> {
		self.applicables.find(alias)
	}

	fn indicator(&self, alias: &str) -> Option<Arc<dyn RegistrableActivationIndicator>> {
		self.indicators.find(alias)
	}
}

/// Lookup over rebuilt tables that releases every object the previous tables
/// held and the rebuilt ones no longer do.
pub(crate) struct Rebuilt<'a> {
	tables: &'a Tables,
	released: FxHashSet<usize>,
}

impl<'a> Rebuilt<'a> {
	pub(crate) fn new(tables: &'a Tables, previous: &Tables) -> Self {
		let current: FxHashSet<usize> = tables.addresses().collect();
		let released = previous.addresses().filter(|a| !current.contains(a)).collect();
		Self { tables, released }
	}
}

impl RegistrableLookup for Rebuilt<'_> {
	fn action(&self, alias: &str) -> Option<Arc<dyn RegistrableAction>> {
		self.tables.action(alias)
	}

	fn condition(&self, alias: &str) -> Option<Arc<dyn RegistrableCondition>> {
		self.tables.condition(alias)
	}

	fn trigger(&self, alias: &str) -> Option<Arc<dyn RegistrableTrigger>> {
		self.tables.trigger(alias)
	}

	fn seeker(&self, alias: &str) -> Option<Arc<dyn RegistrableEnchantmentSeeker>> {
		self.tables.seeker(alias)
	}

	fn applicable(&self, alias: &str) -> Option<Arc<dyn RegistrableApplicable>> {
		self.tables.applicable(alias)
	}

	fn indicator(&self, alias: &str) -> Option<Arc<dyn RegistrableActivationIndicator>> {
		self.tables.indicator(alias)
	}

	fn releases(&self, address: usize) -> bool {
		self.released.contains(&address)
	}
}

/// Single source of truth for registry lookups.
#[derive(Clone, Default)]
pub struct Snapshot {
	pub(crate) tables: Tables,
	pub(crate) store: EnchantmentStore,
}

impl Snapshot {
	/// Every collision recorded in this snapshot, registrables first.
	pub fn collisions(&self) -> Vec<Collision> {
		self.tables
			.collisions
			.iter()
			.chain(self.store.collisions())
			.cloned()
			.collect()
	}

	/// Number of registered objects of `kind`.
	pub fn count(&self, kind: RegistrableKind) -> usize {
		self.tables.len(kind)
	}

	pub fn enchantment_count(&self) -> usize {
		self.store.len()
	}
}
