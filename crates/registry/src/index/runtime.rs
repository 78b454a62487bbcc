//! Runtime registry with atomic publication.
//!
//! # Role
//!
//! The thread-safe entrypoint for registering, refreshing and looking up
//! extension objects and loaded enchantments.
//!
//! # Invariants
//!
//! - Readers never block and never observe a partially rebuilt table: every
//!   write builds a fresh [`Snapshot`] and publishes it with one store.
//! - Writes are serialized by the writer lock, so no update is lost.
//! - A provider whose plugin is disabled contributes nothing.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use underscore_model::{
	AnyRegistrable, Enchantment, EnchantmentPack, EnchantmentUnloadResponse, NamespacedKey, PluginId, Registrable,
	RegistrableAction, RegistrableActivationIndicator, RegistrableApplicable, RegistrableCondition,
	RegistrableEnchantmentSeeker, RegistrableKind, RegistrableLookup, RegistrablePlaceholder, RegistrableTrigger,
	Undiscovered,
};

use super::collision::Collision;
use super::error::RegistryError;
use super::snapshot::{Rebuilt, Snapshot, Tables};
use crate::host::PluginHost;
use crate::provider::RegistrablesProvider;

/// A registrable the registry refused to store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skipped {
	pub kind: RegistrableKind,
	/// Index in the provider's list.
	pub position: usize,
}

/// What a single [`Registry::provide`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvideOutcome {
	pub plugin: PluginId,
	/// Registrables stored with at least one alias.
	pub registered: usize,
	/// Aliases that were already taken by another provider.
	pub collisions: Vec<Collision>,
	/// Registrables with no aliases at all.
	pub skipped: Vec<Skipped>,
	/// Enchantments whose placeholders resolved as a result.
	pub rebound: Vec<NamespacedKey>,
}

/// What a [`Registry::refresh`] call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSummary {
	/// Providers re-applied.
	pub providers: usize,
	/// Plugins whose providers were dropped because they are disabled.
	pub dropped: Vec<PluginId>,
	pub collisions: usize,
	pub rebound: Vec<NamespacedKey>,
}

/// What a load call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
	/// Aliases already used by earlier enchantments.
	pub collisions: Vec<Collision>,
	/// Placeholders still unresolved after loading.
	pub pending: usize,
}

struct Retained {
	ordinal: u32,
	provider: Arc<dyn RegistrablesProvider>,
}

#[derive(Default)]
struct WriterState {
	providers: Vec<Retained>,
	next_ordinal: u32,
}

impl WriterState {
	/// Returns the ordinal of `provider`, retaining it if it is new, and
	/// whether it was retained already.
	fn retain(&mut self, provider: &Arc<dyn RegistrablesProvider>) -> (u32, bool) {
		if let Some(existing) = self.providers.iter().find(|r| Arc::ptr_eq(&r.provider, provider)) {
			return (existing.ordinal, true);
		}
		let ordinal = self.next_ordinal;
		self.next_ordinal += 1;
		self.providers.push(Retained {
			ordinal,
			provider: Arc::clone(provider),
		});
		(ordinal, false)
	}
}

/// Alias-indexed store of registrables, enchantments and packs.
pub struct Registry {
	host: Arc<dyn PluginHost>,
	snap: ArcSwap<Snapshot>,
	writer: Mutex<WriterState>,
}

impl Registry {
	pub fn new(host: Arc<dyn PluginHost>) -> Self {
		Self {
			host,
			snap: ArcSwap::from_pointee(Snapshot::default()),
			writer: Mutex::new(WriterState::default()),
		}
	}

	/// Returns the current snapshot.
	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.snap.load_full()
	}

	/// Registers everything `provider` offers.
	///
	/// Rejected outright if the provider's plugin is not enabled. Aliases
	/// already bound by a different provider are skipped and reported in the
	/// outcome; a registrable left with no bound alias is not stored.
	///
	/// Submitting a provider again rebuilds every table the way
	/// [`Registry::refresh`] does, keeping the provider's original place in
	/// the order. Aliases it no longer offers go to the next provider in line.
	pub fn provide(&self, provider: Arc<dyn RegistrablesProvider>) -> Result<ProvideOutcome, RegistryError> {
		let plugin = provider.associated_plugin();
		if !self.host.is_enabled(&plugin) {
			tracing::warn!(plugin = %plugin, "rejecting provider of disabled plugin");
			return Err(RegistryError::ProviderRejected { plugin });
		}

		let mut writer = self.writer.lock();
		let (ordinal, resubmitted) = writer.retain(&provider);

		let previous = self.snap.load_full();
		let mut next = Snapshot::clone(&previous);
		let mut outcome = if resubmitted {
			tracing::debug!(plugin = %plugin, ordinal, "provider resubmitted, rebuilding tables");
			next.tables.clear();
			let at = writer.providers.partition_point(|r| r.ordinal < ordinal);
			reapply(&mut next.tables, &writer.providers[..at]);
			let outcome = apply(&mut next.tables, &plugin, ordinal, provider.as_ref());
			reapply(&mut next.tables, &writer.providers[at + 1..]);
			outcome
		} else {
			apply(&mut next.tables, &plugin, ordinal, provider.as_ref())
		};
		outcome.rebound = next.store.rebind(&Rebuilt::new(&next.tables, &previous.tables));

		tracing::info!(
			plugin = %plugin,
			registered = outcome.registered,
			collisions = outcome.collisions.len(),
			skipped = outcome.skipped.len(),
			rebound = outcome.rebound.len(),
			"provider registered"
		);
		self.publish(next);
		Ok(outcome)
	}

	/// Rebuilds every kind table from the retained providers.
	///
	/// Providers of disabled plugins are dropped and must be submitted again
	/// once their plugin is re-enabled. Loaded enchantments and packs are kept,
	/// but references they hold to dropped objects fall back to the next owner
	/// of the alias or to an [`Undiscovered`] placeholder.
	pub fn refresh(&self) -> RefreshSummary {
		let mut writer = self.writer.lock();
		let mut summary = RefreshSummary::default();

		writer.providers.retain(|r| {
			let plugin = r.provider.associated_plugin();
			let enabled = self.host.is_enabled(&plugin);
			if !enabled {
				tracing::debug!(plugin = %plugin, "dropping provider of disabled plugin");
				summary.dropped.push(plugin);
			}
			enabled
		});

		let previous = self.snap.load_full();
		let mut next = Snapshot::clone(&previous);
		next.tables.clear();
		summary.collisions = reapply(&mut next.tables, &writer.providers);
		summary.providers = writer.providers.len();
		summary.rebound = next.store.rebind(&Rebuilt::new(&next.tables, &previous.tables));

		tracing::info!(
			providers = summary.providers,
			dropped = summary.dropped.len(),
			collisions = summary.collisions,
			"registry refreshed"
		);
		self.publish(next);
		summary
	}

	/// Stores an enchantment on behalf of `owner`.
	///
	/// Placeholders that already resolve are bound before storing. An
	/// enchantment with the same key replaces the loaded one.
	pub fn load_enchantment(&self, owner: PluginId, enchantment: Enchantment) -> LoadOutcome {
		let _writer = self.writer.lock();
		let mut next = Snapshot::clone(&self.snap.load());
		let outcome = load_into(&mut next, owner, enchantment, None);
		self.publish(next);
		outcome
	}

	/// Removes the enchantment with this alias or `namespace:key`.
	pub fn unload_enchantment(&self, name: &str) -> EnchantmentUnloadResponse {
		let _writer = self.writer.lock();
		let mut next = Snapshot::clone(&self.snap.load());
		match next.store.remove(name) {
			Some(removed) => {
				tracing::info!(key = %removed.key(), "enchantment unloaded");
				self.publish(next);
				EnchantmentUnloadResponse::Unloaded
			}
			None => EnchantmentUnloadResponse::NotFound,
		}
	}

	/// Stores a pack and every enchantment in it.
	///
	/// The stored pack lists the enchantments as loaded, so its members are the
	/// same objects [`Registry::find_enchantment`] returns.
	pub fn load_pack(&self, owner: PluginId, pack: EnchantmentPack) -> LoadOutcome {
		let _writer = self.writer.lock();
		let mut next = Snapshot::clone(&self.snap.load());
		let pack_name = super::table::fold(pack.name());
		let mut outcome = LoadOutcome::default();

		for enchantment in pack.enchantments() {
			let loaded = load_into(&mut next, owner.clone(), Enchantment::clone(enchantment), Some(pack_name.clone()));
			outcome.collisions.extend(loaded.collisions);
			outcome.pending += loaded.pending;
		}
		tracing::info!(pack = pack.name(), enchantments = pack.enchantments().len(), "pack loaded");
		next.store.insert_pack(pack, owner);

		self.publish(next);
		outcome
	}

	/// Removes a pack and the enchantments that came with it.
	pub fn unload_pack(&self, name: &str) -> EnchantmentUnloadResponse {
		let _writer = self.writer.lock();
		let mut next = Snapshot::clone(&self.snap.load());
		match next.store.remove_pack(name) {
			Some(removed) => {
				tracing::info!(pack = removed.name(), "pack unloaded");
				self.publish(next);
				EnchantmentUnloadResponse::Unloaded
			}
			None => EnchantmentUnloadResponse::NotFound,
		}
	}

	pub fn find_enchantment(&self, alias: &str) -> Option<Arc<Enchantment>> {
		self.snap.load().store.find(alias)
	}

	pub fn find_enchantment_by_key(&self, key: &NamespacedKey) -> Option<Arc<Enchantment>> {
		self.snap.load().store.find_by_key(key)
	}

	/// Finds an enchantment by the local part of its key (`frost` in
	/// `underscore:frost`).
	pub fn find_enchantment_by_key_string(&self, local: &str) -> Option<Arc<Enchantment>> {
		self.snap.load().store.find_by_key_string(local)
	}

	pub fn find_enchantments(&self, plugin: &PluginId) -> Vec<Arc<Enchantment>> {
		self.snap.load().store.owned_by(plugin)
	}

	pub fn registered_enchantments(&self) -> Vec<Arc<Enchantment>> {
		self.snap.load().store.all()
	}

	pub fn find_enchantment_pack(&self, name: &str) -> Option<Arc<EnchantmentPack>> {
		self.snap.load().store.find_pack(name)
	}

	pub fn registered_packs(&self) -> Vec<Arc<EnchantmentPack>> {
		self.snap.load().store.packs()
	}

	/// Plugin that registered `alias` under `kind`.
	pub fn owner_of(&self, kind: RegistrableKind, alias: &str) -> Option<PluginId> {
		self.snap.load().tables.owner_of(kind, alias)
	}

	/// Every collision recorded in the current snapshot.
	pub fn collisions(&self) -> Vec<Collision> {
		self.snap.load().collisions()
	}

	fn publish(&self, next: Snapshot) {
		tracing::debug!(enchantments = next.store.len(), "publishing registry snapshot");
		self.snap.store(Arc::new(next));
	}
}

fn apply(tables: &mut Tables, plugin: &PluginId, ordinal: u32, provider: &dyn RegistrablesProvider) -> ProvideOutcome {
	let mut outcome = ProvideOutcome {
		plugin: plugin.clone(),
		registered: 0,
		collisions: Vec::new(),
		skipped: Vec::new(),
		rebound: Vec::new(),
	};

	for (position, item) in provider.provided_registrables().into_iter().enumerate() {
		let kind = item.kind();
		if item.aliases().is_empty() {
			tracing::warn!(plugin = %plugin, kind = %kind, position, "skipping registrable with no aliases");
			outcome.skipped.push(Skipped { kind, position });
			continue;
		}

		let collisions = &mut outcome.collisions;
		let stored = match item {
			AnyRegistrable::Action(r) => tables.actions.insert(r, plugin, ordinal, collisions),
			AnyRegistrable::Condition(r) => tables.conditions.insert(r, plugin, ordinal, collisions),
			AnyRegistrable::Trigger(r) => tables.triggers.insert(r, plugin, ordinal, collisions),
			AnyRegistrable::Placeholder(r) => tables.placeholders.insert(r, plugin, ordinal, collisions),
			AnyRegistrable::Seeker(r) => tables.seekers.insert(r, plugin, ordinal, collisions),
			AnyRegistrable::Applicable(r) => tables.applicables.insert(r, plugin, ordinal, collisions),
			AnyRegistrable::ActivationIndicator(r) => tables.indicators.insert(r, plugin, ordinal, collisions),
		};
		if stored {
			outcome.registered += 1;
		}
	}

	tables.collisions.extend(outcome.collisions.iter().cloned());
	outcome
}

/// Applies `providers` in order. Returns the number of collisions.
fn reapply(tables: &mut Tables, providers: &[Retained]) -> usize {
	providers
		.iter()
		.map(|r| apply(tables, &r.provider.associated_plugin(), r.ordinal, r.provider.as_ref()).collisions.len())
		.sum()
}

fn load_into(next: &mut Snapshot, owner: PluginId, enchantment: Enchantment, pack: Option<String>) -> LoadOutcome {
	let enchantment = enchantment.rebind(&next.tables).unwrap_or(enchantment);
	let pending = enchantment.undiscovered_refs().len();
	if pending > 0 {
		tracing::debug!(key = %enchantment.key(), pending, "enchantment has unresolved references");
	}
	tracing::debug!(key = %enchantment.key(), alias = enchantment.primary_alias(), "loading enchantment");

	let collisions = next.store.insert(Arc::new(enchantment), owner, pack);
	LoadOutcome { collisions, pending }
}

macro_rules! kind_lookups {
	($( $table:ident: $trait:ident => $find:ident, $find_owned:ident, $registered:ident; )*) => {
		impl Registry {
			$(
				#[doc = concat!("Finds a registered `", stringify!($trait), "` by alias, ignoring case.")]
				pub fn $find(&self, alias: &str) -> Option<Arc<dyn $trait>> {
					self.snap.load().tables.$table.find(alias)
				}

				#[doc = concat!("Every `", stringify!($trait), "` registered by `plugin`.")]
				pub fn $find_owned(&self, plugin: &PluginId) -> Vec<Arc<dyn $trait>> {
					self.snap.load().tables.$table.owned_by(plugin)
				}

				pub fn $registered(&self) -> Vec<Arc<dyn $trait>> {
					self.snap.load().tables.$table.all()
				}
			)*
		}
	};
}

kind_lookups! {
	actions: RegistrableAction => find_action, find_actions, registered_actions;
	conditions: RegistrableCondition => find_condition, find_conditions, registered_conditions;
	triggers: RegistrableTrigger => find_trigger, find_triggers, registered_triggers;
	placeholders: RegistrablePlaceholder => find_placeholder, find_placeholders, registered_placeholders;
	seekers: RegistrableEnchantmentSeeker => find_seeker, find_seekers, registered_seekers;
	applicables: RegistrableApplicable => find_applicable, find_applicables, registered_applicables;
	indicators: RegistrableActivationIndicator => find_indicator, find_indicators, registered_indicators;
}

macro_rules! kind_resolvers {
	($( $find:ident: $trait:ident => $resolve:ident, $placeholder:ident; )*) => {
		impl Registry {
			$(
				#[doc = concat!("Like [`Registry::", stringify!($find), "`], but falls back to an [`Undiscovered`] placeholder.")]
				pub fn $resolve(&self, alias: &str) -> Arc<dyn $trait> {
					self.$find(alias).unwrap_or_else(|| Undiscovered::$placeholder(alias))
				}
			)*
		}

		impl RegistrableLookup for Registry {
			$(
				fn $placeholder(&self, alias: &str) -> Option<Arc<dyn $trait>> {
					self.$find(alias)
				}
			)*
		}
	};
}

kind_resolvers! {
	find_action: RegistrableAction => resolve_action, action;
	find_condition: RegistrableCondition => resolve_condition, condition;
	find_trigger: RegistrableTrigger => resolve_trigger, trigger;
	find_seeker: RegistrableEnchantmentSeeker => resolve_seeker, seeker;
	find_applicable: RegistrableApplicable => resolve_applicable, applicable;
	find_indicator: RegistrableActivationIndicator => resolve_indicator, indicator;
}
