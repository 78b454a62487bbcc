//! Loaded enchantments and packs.
//!
//! # Role
//!
//! Holds what the enchantment loader produced. Unlike the kind tables, this
//! store survives [`super::Registry::refresh`]; only explicit load and unload
//! calls change it.
//!
//! # Invariants
//!
//! - Keys are unique: loading an enchantment with a known key replaces it.
//! - Alias indexes are rebuilt from load order after every change, so the
//!   earliest loaded enchantment keeps a contested alias.
//! - A stored pack lists exactly the stored enchantments tagged with its
//!   name, as the same `Arc`s the lookups return.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use underscore_model::{Enchantment, EnchantmentPack, NamespacedKey, PluginId, Registrable, RegistrableLookup};

use super::collision::{Collision, Party, Resolution};
use super::table::fold;

#[derive(Clone)]
pub(crate) struct StoredEnchantment {
	pub(crate) enchantment: Arc<Enchantment>,
	pub(crate) owner: PluginId,
	/// Folded name of the pack this enchantment came with.
	pub(crate) pack: Option<String>,
}

#[derive(Clone)]
pub(crate) struct StoredPack {
	pub(crate) pack: Arc<EnchantmentPack>,
	pub(crate) owner: PluginId,
}

#[derive(Clone, Default)]
pub(crate) struct EnchantmentStore {
	enchantments: Vec<StoredEnchantment>,
	packs: Vec<StoredPack>,
	by_alias: FxHashMap<String, usize>,
	by_key: FxHashMap<NamespacedKey, usize>,
	collisions: Vec<Collision>,
}

impl EnchantmentStore {
	pub(crate) fn find(&self, alias: &str) -> Option<Arc<Enchantment>> {
		let idx = *self.by_alias.get(&fold(alias))?;
		Some(Arc::clone(&self.enchantments[idx].enchantment))
	}

	pub(crate) fn find_by_key(&self, key: &NamespacedKey) -> Option<Arc<Enchantment>> {
		let idx = *self.by_key.get(key)?;
		Some(Arc::clone(&self.enchantments[idx].enchantment))
	}

	/// Matches the local part of the key (`frost` in `underscore:frost`),
	/// ignoring case. The earliest loaded match wins.
	pub(crate) fn find_by_key_string(&self, local: &str) -> Option<Arc<Enchantment>> {
		let local = fold(local);
		self.enchantments
			.iter()
			.find(|s| s.enchantment.key().key() == local)
			.map(|s| Arc::clone(&s.enchantment))
	}

	pub(crate) fn owned_by(&self, plugin: &PluginId) -> Vec<Arc<Enchantment>> {
		self.enchantments
			.iter()
			.filter(|s| &s.owner == plugin)
			.map(|s| Arc::clone(&s.enchantment))
			.collect()
	}

	pub(crate) fn all(&self) -> Vec<Arc<Enchantment>> {
		self.enchantments.iter().map(|s| Arc::clone(&s.enchantment)).collect()
	}

	pub(crate) fn find_pack(&self, name: &str) -> Option<Arc<EnchantmentPack>> {
		let name = fold(name);
		self.packs
			.iter()
			.find(|p| fold(p.pack.name()) == name)
			.map(|p| Arc::clone(&p.pack))
	}

	pub(crate) fn packs(&self) -> Vec<Arc<EnchantmentPack>> {
		self.packs.iter().map(|p| Arc::clone(&p.pack)).collect()
	}

	pub(crate) fn collisions(&self) -> &[Collision] {
		&self.collisions
	}

	pub(crate) fn len(&self) -> usize {
		self.enchantments.len()
	}

	/// Stores `enchantment`, replacing one with the same key. Returns the
	/// replacement, if any, and the collisions the new alias index produced
	/// for it.
	pub(crate) fn insert(&mut self, enchantment: Arc<Enchantment>, owner: PluginId, pack: Option<String>) -> Vec<Collision> {
		let stored = StoredEnchantment { enchantment, owner, pack };
		let mut fresh = Vec::new();
		let idx = match self.by_key.get(stored.enchantment.key()) {
			Some(&idx) => {
				fresh.push(Collision {
					registry: "enchantment",
					alias: stored.enchantment.key().to_string(),
					existing: Party {
						plugin: self.enchantments[idx].owner.clone(),
						ordinal: idx as u32,
					},
					incoming: Party {
						plugin: stored.owner.clone(),
						ordinal: idx as u32,
					},
					resolution: Resolution::ReplacedExisting,
				});
				self.enchantments[idx] = stored;
				idx
			}
			None => {
				self.enchantments.push(stored);
				self.enchantments.len() - 1
			}
		};
		self.reindex();

		fresh.extend(self.collisions.iter().filter(|c| c.incoming.ordinal == idx as u32).cloned());
		fresh.iter().for_each(Collision::log);
		fresh
	}

	/// Removes the enchantment with this alias or `namespace:key`.
	pub(crate) fn remove(&mut self, name: &str) -> Option<Arc<Enchantment>> {
		let idx = match self.by_alias.get(&fold(name)) {
			Some(&idx) => idx,
			None => {
				let key = NamespacedKey::parse(name).ok()?;
				*self.by_key.get(&key)?
			}
		};
		let removed = self.enchantments.remove(idx);
		self.reindex();
		Some(removed.enchantment)
	}

	/// Stores `pack`, replacing one with the same name. Its enchantments are
	/// taken from the store, so they must be inserted first.
	pub(crate) fn insert_pack(&mut self, pack: EnchantmentPack, owner: PluginId) {
		let name = fold(pack.name());
		self.packs.retain(|p| fold(p.pack.name()) != name);
		self.packs.push(StoredPack {
			pack: Arc::new(pack),
			owner,
		});
		self.repack();
	}

	/// Removes the pack and every enchantment loaded with it.
	pub(crate) fn remove_pack(&mut self, name: &str) -> Option<Arc<EnchantmentPack>> {
		let name = fold(name);
		let idx = self.packs.iter().position(|p| fold(p.pack.name()) == name)?;
		let removed = self.packs.remove(idx);
		self.enchantments.retain(|s| s.pack.as_deref() != Some(name.as_str()));
		self.reindex();
		Some(removed.pack)
	}

	/// Rebinds every enchantment against `lookup`: placeholders that resolve
	/// are filled in and released objects are dropped. Returns the keys of the
	/// enchantments that changed.
	pub(crate) fn rebind(&mut self, lookup: &dyn RegistrableLookup) -> Vec<NamespacedKey> {
		let mut rebound = Vec::new();
		for stored in &mut self.enchantments {
			if let Some(next) = stored.enchantment.rebind(lookup) {
				rebound.push(next.key().clone());
				stored.enchantment = Arc::new(next);
			}
		}
		if !rebound.is_empty() {
			self.repack();
		}
		rebound
	}

	/// Rebuilds every pack whose members no longer match the store.
	fn repack(&mut self) {
		for stored in &mut self.packs {
			let name = fold(stored.pack.name());
			let members: Vec<Arc<Enchantment>> = self
				.enchantments
				.iter()
				.filter(|s| s.pack.as_deref() == Some(name.as_str()))
				.map(|s| Arc::clone(&s.enchantment))
				.collect();

			let current = stored.pack.enchantments();
			if current.len() == members.len() && current.iter().zip(&members).all(|(a, b)| Arc::ptr_eq(a, b)) {
				continue;
			}
			stored.pack = Arc::new(EnchantmentPack::new(stored.pack.metadata().clone(), members));
		}
	}

	fn reindex(&mut self) {
		self.by_alias.clear();
		self.by_key.clear();
		self.collisions.clear();

		for (idx, stored) in self.enchantments.iter().enumerate() {
			self.by_key.insert(stored.enchantment.key().clone(), idx);
			for alias in stored.enchantment.aliases() {
				let key = fold(alias);
				match self.by_alias.get(&key) {
					None => {
						self.by_alias.insert(key, idx);
					}
					Some(&existing) if existing == idx => {}
					Some(&existing) => {
						self.collisions.push(Collision {
							registry: "enchantment",
							alias: alias.clone(),
							existing: Party {
								plugin: self.enchantments[existing].owner.clone(),
								ordinal: existing as u32,
							},
							incoming: Party {
								plugin: stored.owner.clone(),
								ordinal: idx as u32,
							},
							resolution: Resolution::KeptExisting,
						});
					}
				}
			}
		}
		self.repack();
	}
}
