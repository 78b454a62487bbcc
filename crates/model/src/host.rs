//! Host-facing types.
//!
//! # Role
//!
//! These are the narrow shapes through which extension objects see the game
//! server. The server runtime itself lives outside this workspace; it
//! implements [`Event`] for its own event types and hands players and items
//! across as the plain values defined here.

use std::any::Any;
use std::collections::BTreeMap;

use serde_json::Value;
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::key::NamespacedKey;

/// A game event passed to triggers, conditions, actions and placeholders.
pub trait Event: Any + Send + Sync {
	/// The event type name (e.g. `PlayerHurtEntityEvent`).
	fn event_name(&self) -> &str;

	fn as_any(&self) -> &dyn Any;
}

impl dyn Event {
	/// Downcasts to a concrete host event.
	pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
		self.as_any().downcast_ref::<T>()
	}
}

/// A player, identified by UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub Uuid);

impl std::fmt::Display for PlayerId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

/// An item material, named the way the server names it (`DIAMOND_SWORD`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Material(String);

impl Material {
	pub fn new(name: impl AsRef<str>) -> Self {
		Self(name.as_ref().to_uppercase())
	}

	pub fn name(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for Material {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// A snapshot of an item as returned by enchantment seekers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
	pub material: Material,
	pub amount: u32,
	pub enchantments: BTreeMap<NamespacedKey, i32>,
}

impl ItemStack {
	pub fn new(material: Material) -> Self {
		Self {
			material,
			amount: 1,
			enchantments: BTreeMap::new(),
		}
	}

	pub fn with_enchantment(mut self, key: NamespacedKey, level: i32) -> Self {
		self.enchantments.insert(key, level);
		self
	}

	/// Returns the level of `key` on this item, if present.
	pub fn enchantment_level(&self, key: &NamespacedKey) -> Option<i32> {
		self.enchantments.get(key).copied()
	}
}

macro_rules! screaming_enum {
	(
		$(#[$attr:meta])*
		pub enum $name:ident { $( $variant:ident => $label:literal, )* }
	) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum $name { $( $variant, )* }

		impl $name {
			pub const ALL: &'static [$name] = &[ $( $name::$variant, )* ];

			/// The upper snake case name used in definition files.
			pub const fn name(self) -> &'static str {
				match self {
					$( $name::$variant => $label, )*
				}
			}

			/// Parses a name case-insensitively.
			pub fn from_name(name: &str) -> Option<Self> {
				Self::ALL.iter().copied().find(|v| v.name().eq_ignore_ascii_case(name))
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(self.name())
			}
		}
	};
}

screaming_enum! {
	/// Who or what an action or condition applies to.
	pub enum TargetType {
		FirstPlayer => "FIRST_PLAYER",
		SecondPlayer => "SECOND_PLAYER",
		ThirdPlayer => "THIRD_PLAYER",
		Entity => "ENTITY",
		Block => "BLOCK",
		FirstItem => "FIRST_ITEM",
		SecondItem => "SECOND_ITEM",
	}
}

screaming_enum! {
	/// Kinds of data a trigger can extract from its event.
	pub enum DataRetrievalType {
		FirstPlayer => "FIRST_PLAYER",
		SecondPlayer => "SECOND_PLAYER",
		ThirdPlayer => "THIRD_PLAYER",
		Entity => "ENTITY",
		Block => "BLOCK",
		Damage => "DAMAGE",
		DamageCause => "DAMAGE_CAUSE",
		FirstItem => "FIRST_ITEM",
		SecondItem => "SECOND_ITEM",
	}
}

screaming_enum! {
	/// In-game acquisition methods an obtainment restriction can name.
	pub enum EnchantmentObtainmentMeans {
		EnchantingTable => "ENCHANTING_TABLE",
		Trades => "TRADES",
		Fishing => "FISHING",
		Loot => "LOOT",
	}
}

/// Outcome of unloading an enchantment or pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnchantmentUnloadResponse {
	Unloaded,
	NotFound,
}

/// Event data accessors a trigger exposes, keyed by retrieval kind.
///
/// Accessors are named, not bound: the host resolves the name against its own
/// event type. Every holder carries a [`DataRetrievalType::FirstPlayer`]
/// accessor, except the [`TriggerDataHolder::empty`] placeholder used for
/// undiscovered triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerDataHolder {
	event_type: String,
	retrievals: BTreeMap<DataRetrievalType, String>,
}

impl TriggerDataHolder {
	pub fn new<I, S>(event_type: impl Into<String>, retrievals: I) -> Result<Self>
	where
		I: IntoIterator<Item = (DataRetrievalType, S)>,
		S: Into<String>,
	{
		let event_type = event_type.into();
		let retrievals: BTreeMap<_, _> = retrievals.into_iter().map(|(kind, name)| (kind, name.into())).collect();

		if !retrievals.contains_key(&DataRetrievalType::FirstPlayer) {
			return Err(ValidationError::MissingFirstPlayer { event_type });
		}

		Ok(Self { event_type, retrievals })
	}

	/// Holder with no accessors, for triggers that could not be resolved.
	pub fn empty() -> Self {
		Self {
			event_type: String::new(),
			retrievals: BTreeMap::new(),
		}
	}

	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	pub fn retrieval(&self, kind: DataRetrievalType) -> Option<&str> {
		self.retrievals.get(&kind).map(String::as_str)
	}

	pub fn retrievals(&self) -> impl Iterator<Item = (DataRetrievalType, &str)> {
		self.retrievals.iter().map(|(k, v)| (*k, v.as_str()))
	}

	pub fn is_empty(&self) -> bool {
		self.retrievals.is_empty()
	}
}

/// Changes an action asks the host to apply to the triggering event.
///
/// Modifications only take effect for actions that run without delay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventModifications {
	pub field_modifications: BTreeMap<String, Value>,
	pub methods_to_call: BTreeMap<String, Vec<Value>>,
}

impl EventModifications {
	pub fn builder() -> EventModificationsBuilder {
		EventModificationsBuilder::default()
	}

	pub fn is_empty(&self) -> bool {
		self.field_modifications.is_empty() && self.methods_to_call.is_empty()
	}
}

#[derive(Debug, Default)]
pub struct EventModificationsBuilder {
	inner: EventModifications,
}

impl EventModificationsBuilder {
	pub fn field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.inner.field_modifications.insert(field.into(), value.into());
		self
	}

	pub fn call(mut self, method: impl Into<String>, args: Vec<Value>) -> Self {
		self.inner.methods_to_call.insert(method.into(), args);
		self
	}

	pub fn build(self) -> EventModifications {
		self.inner
	}
}
