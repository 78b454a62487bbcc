//! Extension capability traits.
//!
//! # Role
//!
//! Every extension object a plugin contributes implements [`Registrable`] plus
//! exactly one of the seven kind traits below. The registry stores them behind
//! the closed [`AnyRegistrable`] enum so its tables stay uniform while each
//! kind keeps its own behavioral contract.
//!
//! # Invariants
//!
//! - [`Registrable::aliases`] is non-empty and ordered; the first alias is the
//!   display name. The registry skips registrables that break this.

use std::collections::BTreeMap;
use std::sync::Arc;

use underscore_locale::Message;

use crate::host::{Event, EventModifications, ItemStack, Material, PlayerId, TargetType, TriggerDataHolder};

/// Common capability of every extension object.
pub trait Registrable: Send + Sync + 'static {
	/// Lookup names, in declaration order.
	fn aliases(&self) -> &[String];

	/// Returns the unresolved reference this object stands in for, if it is a
	/// placeholder created while loading an enchantment.
	fn undiscovered(&self) -> Option<&UndiscoveredRef> {
		None
	}

	/// The first alias, used for display.
	fn primary_alias(&self) -> Option<&str> {
		self.aliases().first().map(String::as_str)
	}
}

/// Runs when an enchantment's trigger fires.
pub trait RegistrableAction: Registrable {
	/// Returns modifications for the event, or `None` to leave it untouched.
	fn execute(
		&self,
		event: &dyn Event,
		trigger: &dyn RegistrableTrigger,
		arguments: &[String],
		target: TargetType,
	) -> Option<EventModifications>;
}

/// Gates whether an enchantment, level or action runs.
pub trait RegistrableCondition: Registrable {
	fn evaluate(&self, trigger: &dyn RegistrableTrigger, event: &dyn Event, target: TargetType, arguments: &[String]) -> bool;
}

/// An event an enchantment reacts to.
pub trait RegistrableTrigger: Registrable {
	fn data_holder(&self) -> &TriggerDataHolder;
}

/// A text placeholder usable in action arguments.
pub trait RegistrablePlaceholder: Registrable {
	/// Returns the replacement text, or `None` if it cannot be produced.
	fn replaced_text(
		&self,
		event: &dyn Event,
		trigger: &dyn RegistrableTrigger,
		target: TargetType,
		args: &BTreeMap<String, String>,
	) -> Option<String>;
}

/// Selects which items of a player are checked for an enchantment.
pub trait RegistrableEnchantmentSeeker: Registrable {
	fn seek_items(&self, player: &PlayerId) -> Vec<Option<ItemStack>>;
}

/// Decides which materials an enchantment may be applied to.
pub trait RegistrableApplicable: Registrable {
	fn can_be_applied_to(&self, material: &Material) -> bool;

	/// True for applicables created on the fly for a single material rather
	/// than registered by a plugin.
	fn is_custom(&self) -> bool {
		false
	}
}

/// Tells a player that an enchantment activated.
pub trait RegistrableActivationIndicator: Registrable {
	fn indicate_activation(&self, text: &str, player: &PlayerId);
}

/// The seven registrable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistrableKind {
	Action,
	Condition,
	Trigger,
	Placeholder,
	Seeker,
	Applicable,
	ActivationIndicator,
}

impl RegistrableKind {
	pub const ALL: [RegistrableKind; 7] = [
		Self::Action,
		Self::Condition,
		Self::Trigger,
		Self::Placeholder,
		Self::Seeker,
		Self::Applicable,
		Self::ActivationIndicator,
	];

	pub const fn label(self) -> &'static str {
		match self {
			Self::Action => "action",
			Self::Condition => "condition",
			Self::Trigger => "trigger",
			Self::Placeholder => "placeholder",
			Self::Seeker => "seeker",
			Self::Applicable => "applicable",
			Self::ActivationIndicator => "indicator",
		}
	}

	/// Locale tokens naming this kind, as `(singular, plural)`.
	pub const fn tokens(self) -> (Message, Message) {
		match self {
			Self::Action => (Message::LogTokenRegistryActionSingular, Message::LogTokenRegistryActionPlural),
			Self::Condition => (Message::LogTokenRegistryConditionSingular, Message::LogTokenRegistryConditionPlural),
			Self::Trigger => (Message::LogTokenRegistryTriggerSingular, Message::LogTokenRegistryTriggerPlural),
			Self::Placeholder => (Message::LogTokenRegistryPlaceholderSingular, Message::LogTokenRegistryPlaceholderPlural),
			Self::Seeker => (Message::LogTokenRegistrySeekerSingular, Message::LogTokenRegistrySeekerPlural),
			Self::Applicable => (Message::LogTokenRegistryApplicableSingular, Message::LogTokenRegistryApplicablePlural),
			Self::ActivationIndicator => (Message::LogTokenRegistryIndicatorSingular, Message::LogTokenRegistryIndicatorPlural),
		}
	}
}

impl std::fmt::Display for RegistrableKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.label())
	}
}

/// A registrable of any kind, as submitted by a provider.
#[derive(Clone)]
pub enum AnyRegistrable {
	Action(Arc<dyn RegistrableAction>),
	Condition(Arc<dyn RegistrableCondition>),
	Trigger(Arc<dyn RegistrableTrigger>),
	Placeholder(Arc<dyn RegistrablePlaceholder>),
	Seeker(Arc<dyn RegistrableEnchantmentSeeker>),
	Applicable(Arc<dyn RegistrableApplicable>),
	ActivationIndicator(Arc<dyn RegistrableActivationIndicator>),
}

impl AnyRegistrable {
	pub fn action(item: impl RegistrableAction) -> Self {
		Self::Action(Arc::new(item))
	}

	pub fn condition(item: impl RegistrableCondition) -> Self {
		Self::Condition(Arc::new(item))
	}

	pub fn trigger(item: impl RegistrableTrigger) -> Self {
		Self::Trigger(Arc::new(item))
	}

	pub fn placeholder(item: impl RegistrablePlaceholder) -> Self {
		Self::Placeholder(Arc::new(item))
	}

	pub fn seeker(item: impl RegistrableEnchantmentSeeker) -> Self {
		Self::Seeker(Arc::new(item))
	}

	pub fn applicable(item: impl RegistrableApplicable) -> Self {
		Self::Applicable(Arc::new(item))
	}

	pub fn indicator(item: impl RegistrableActivationIndicator) -> Self {
		Self::ActivationIndicator(Arc::new(item))
	}

	pub fn kind(&self) -> RegistrableKind {
		match self {
			Self::Action(_) => RegistrableKind::Action,
			Self::Condition(_) => RegistrableKind::Condition,
			Self::Trigger(_) => RegistrableKind::Trigger,
			Self::Placeholder(_) => RegistrableKind::Placeholder,
			Self::Seeker(_) => RegistrableKind::Seeker,
			Self::Applicable(_) => RegistrableKind::Applicable,
			Self::ActivationIndicator(_) => RegistrableKind::ActivationIndicator,
		}
	}

	pub fn aliases(&self) -> &[String] {
		match self {
			Self::Action(r) => r.aliases(),
			Self::Condition(r) => r.aliases(),
			Self::Trigger(r) => r.aliases(),
			Self::Placeholder(r) => r.aliases(),
			Self::Seeker(r) => r.aliases(),
			Self::Applicable(r) => r.aliases(),
			Self::ActivationIndicator(r) => r.aliases(),
		}
	}
}

impl std::fmt::Debug for AnyRegistrable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AnyRegistrable")
			.field("kind", &self.kind())
			.field("aliases", &self.aliases())
			.finish()
	}
}

/// A reference that could not be resolved when an enchantment was loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UndiscoveredRef {
	pub kind: RegistrableKind,
	pub alias: String,
}

/// Placeholder for a registrable that was referenced before it was provided.
///
/// Implements every kind trait inertly: it never fires, never matches and
/// never produces modifications. The registry swaps it for the real object
/// once a provider registers the alias.
#[derive(Debug)]
pub struct Undiscovered {
	reference: UndiscoveredRef,
	aliases: [String; 1],
	holder: TriggerDataHolder,
}

impl Undiscovered {
	pub fn new(kind: RegistrableKind, alias: impl Into<String>) -> Self {
		let alias = alias.into();
		Self {
			reference: UndiscoveredRef { kind, alias: alias.clone() },
			aliases: [alias],
			holder: TriggerDataHolder::empty(),
		}
	}

	pub fn action(alias: impl Into<String>) -> Arc<dyn RegistrableAction> {
		Arc::new(Self::new(RegistrableKind::Action, alias))
	}

	pub fn condition(alias: impl Into<String>) -> Arc<dyn RegistrableCondition> {
		Arc::new(Self::new(RegistrableKind::Condition, alias))
	}

	pub fn trigger(alias: impl Into<String>) -> Arc<dyn RegistrableTrigger> {
		Arc::new(Self::new(RegistrableKind::Trigger, alias))
	}

	pub fn seeker(alias: impl Into<String>) -> Arc<dyn RegistrableEnchantmentSeeker> {
		Arc::new(Self::new(RegistrableKind::Seeker, alias))
	}

	pub fn applicable(alias: impl Into<String>) -> Arc<dyn RegistrableApplicable> {
		Arc::new(Self::new(RegistrableKind::Applicable, alias))
	}

	pub fn indicator(alias: impl Into<String>) -> Arc<dyn RegistrableActivationIndicator> {
		Arc::new(Self::new(RegistrableKind::ActivationIndicator, alias))
	}
}

impl Registrable for Undiscovered {
	fn aliases(&self) -> &[String] {
		&self.aliases
	}

	fn undiscovered(&self) -> Option<&UndiscoveredRef> {
		Some(&self.reference)
	}
}

impl RegistrableAction for Undiscovered {
	fn execute(&self, _: &dyn Event, _: &dyn RegistrableTrigger, _: &[String], _: TargetType) -> Option<EventModifications> {
		None
	}
}

impl RegistrableCondition for Undiscovered {
	fn evaluate(&self, _: &dyn RegistrableTrigger, _: &dyn Event, _: TargetType, _: &[String]) -> bool {
		false
	}
}

impl RegistrableTrigger for Undiscovered {
	fn data_holder(&self) -> &TriggerDataHolder {
		&self.holder
	}
}

impl RegistrablePlaceholder for Undiscovered {
	fn replaced_text(&self, _: &dyn Event, _: &dyn RegistrableTrigger, _: TargetType, _: &BTreeMap<String, String>) -> Option<String> {
		None
	}
}

impl RegistrableEnchantmentSeeker for Undiscovered {
	fn seek_items(&self, _: &PlayerId) -> Vec<Option<ItemStack>> {
		Vec::new()
	}
}

impl RegistrableApplicable for Undiscovered {
	fn can_be_applied_to(&self, _: &Material) -> bool {
		false
	}
}

impl RegistrableActivationIndicator for Undiscovered {
	fn indicate_activation(&self, _: &str, _: &PlayerId) {}
}

/// Read access to registered objects by alias, used to re-resolve
/// [`Undiscovered`] placeholders.
pub trait RegistrableLookup {
	fn action(&self, alias: &str) -> Option<Arc<dyn RegistrableAction>>;
	fn condition(&self, alias: &str) -> Option<Arc<dyn RegistrableCondition>>;
	fn trigger(&self, alias: &str) -> Option<Arc<dyn RegistrableTrigger>>;
	fn seeker(&self, alias: &str) -> Option<Arc<dyn RegistrableEnchantmentSeeker>>;
	fn applicable(&self, alias: &str) -> Option<Arc<dyn RegistrableApplicable>>;
	fn indicator(&self, alias: &str) -> Option<Arc<dyn RegistrableActivationIndicator>>;

	/// Returns true if the object at `address` was registered before and no
	/// longer is. Held references to it are turned back into placeholders.
	///
	/// `address` is the data pointer of the shared object, as returned by
	/// [`address_of`].
	fn releases(&self, _address: usize) -> bool {
		false
	}
}

/// Identity of a shared registrable, stable for as long as it is alive.
pub fn address_of<T: ?Sized>(item: &Arc<T>) -> usize {
	Arc::as_ptr(item).cast::<()>().addr()
}

/// A kind an enchantment holds references to.
pub(crate) trait Bindable: Registrable {
	fn find(lookup: &dyn RegistrableLookup, alias: &str) -> Option<Arc<Self>>;
	fn stand_in(alias: &str) -> Arc<Self>;
}

macro_rules! bindable {
	($( $trait:ident => $find:ident; )*) => {
		$(
			impl Bindable for dyn $trait {
				fn find(lookup: &dyn RegistrableLookup, alias: &str) -> Option<Arc<Self>> {
					lookup.$find(alias)
				}

				fn stand_in(alias: &str) -> Arc<Self> {
					Undiscovered::$find(alias)
				}
			}
		)*
	};
}

bindable! {
	RegistrableAction => action;
	RegistrableCondition => condition;
	RegistrableTrigger => trigger;
	RegistrableEnchantmentSeeker => seeker;
	RegistrableApplicable => applicable;
	RegistrableActivationIndicator => indicator;
}

/// Re-resolves one held reference against `lookup`.
///
/// A placeholder is swapped for the registered object once its alias
/// resolves. A released object is swapped for whatever now holds its primary
/// alias, or for a placeholder of that alias.
pub(crate) fn rebind<T>(item: &Arc<T>, lookup: &dyn RegistrableLookup, changed: &mut bool) -> Arc<T>
where
	T: Bindable + ?Sized,
{
	if let Some(found) = item.undiscovered().and_then(|r| T::find(lookup, &r.alias)) {
		*changed = true;
		return found;
	}
	match item.primary_alias() {
		Some(alias) if lookup.releases(address_of(item)) => {
			*changed = true;
			T::find(lookup, alias).unwrap_or_else(|| T::stand_in(alias))
		}
		_ => Arc::clone(item),
	}
}
