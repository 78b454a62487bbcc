//! Per-kind alias tables.
//!
//! # Invariants
//!
//! - Alias keys are case-folded; each folded alias maps to exactly one entry.
//! - Every entry has at least one alias bound to it.
//! - An alias bound by one provider is never rebound by another; the attempt
//!   is recorded as a [`Collision`] with [`Resolution::KeptExisting`].

use std::sync::Arc;

use rustc_hash::FxHashMap;
use underscore_model::{PluginId, Registrable, address_of};

use super::collision::{Collision, Party, Resolution};

/// Case-folds an alias for lookup.
pub(crate) fn fold(alias: &str) -> String {
	alias.to_lowercase()
}

/// A registered object and the party that registered it.
pub(crate) struct Entry<T: ?Sized> {
	pub(crate) item: Arc<T>,
	pub(crate) owner: PluginId,
	pub(crate) ordinal: u32,
}

impl<T: ?Sized> Clone for Entry<T> {
	fn clone(&self) -> Self {
		Self {
			item: Arc::clone(&self.item),
			owner: self.owner.clone(),
			ordinal: self.ordinal,
		}
	}
}

/// Alias-indexed table of one registrable kind.
pub(crate) struct KindTable<T: ?Sized> {
	label: &'static str,
	entries: Vec<Entry<T>>,
	by_alias: FxHashMap<String, usize>,
}

impl<T: ?Sized> Clone for KindTable<T> {
	fn clone(&self) -> Self {
		Self {
			label: self.label,
			entries: self.entries.clone(),
			by_alias: self.by_alias.clone(),
		}
	}
}

impl<T: Registrable + ?Sized> KindTable<T> {
	pub(crate) fn new(label: &'static str) -> Self {
		Self {
			label,
			entries: Vec::new(),
			by_alias: FxHashMap::default(),
		}
	}

	pub(crate) fn get(&self, alias: &str) -> Option<&Entry<T>> {
		let idx = *self.by_alias.get(&fold(alias))?;
		self.entries.get(idx)
	}

	pub(crate) fn find(&self, alias: &str) -> Option<Arc<T>> {
		self.get(alias).map(|e| Arc::clone(&e.item))
	}

	pub(crate) fn owned_by(&self, plugin: &PluginId) -> Vec<Arc<T>> {
		self.entries
			.iter()
			.filter(|e| &e.owner == plugin)
			.map(|e| Arc::clone(&e.item))
			.collect()
	}

	pub(crate) fn all(&self) -> Vec<Arc<T>> {
		self.entries.iter().map(|e| Arc::clone(&e.item)).collect()
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.len()
	}

	/// Identities of every stored object.
	pub(crate) fn addresses(&self) -> impl Iterator<Item = usize> + '_ {
		self.entries.iter().map(|e| address_of(&e.item))
	}

	/// Binds every free alias of `item` and stores it if at least one bound.
	///
	/// Aliases held by another provider are skipped and reported. Returns
	/// true if the item was stored.
	pub(crate) fn insert(&mut self, item: Arc<T>, owner: &PluginId, ordinal: u32, collisions: &mut Vec<Collision>) -> bool {
		let idx = self.entries.len();
		let mut bound = Vec::new();

		for alias in item.aliases() {
			let key = fold(alias);
			match self.by_alias.get(&key) {
				None if !bound.contains(&key) => bound.push(key),
				None => {}
				Some(&existing) => {
					let existing = &self.entries[existing];
					if existing.ordinal == ordinal {
						tracing::debug!(registry = self.label, alias = %alias, "alias repeated within one provider");
						continue;
					}
					let collision = Collision {
						registry: self.label,
						alias: alias.clone(),
						existing: Party {
							plugin: existing.owner.clone(),
							ordinal: existing.ordinal,
						},
						incoming: Party {
							plugin: owner.clone(),
							ordinal,
						},
						resolution: Resolution::KeptExisting,
					};
					collision.log();
					collisions.push(collision);
				}
			}
		}

		if bound.is_empty() {
			return false;
		}
		for key in bound {
			self.by_alias.insert(key, idx);
		}
		self.entries.push(Entry {
			item,
			owner: owner.clone(),
			ordinal,
		});
		true
	}

	pub(crate) fn clear(&mut self) {
		self.entries.clear();
		self.by_alias.clear();
	}
}
