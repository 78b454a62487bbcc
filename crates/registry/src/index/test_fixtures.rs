use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use underscore_model::{
	AnyRegistrable, DataRetrievalType, Enchantment, EnchantmentAction, EnchantmentLevel, Event, EventModifications,
	ItemStack, Material, NamespacedKey, PlayerId, PluginId, Registrable, RegistrableAction,
	RegistrableActivationIndicator, RegistrableApplicable, RegistrableCondition, RegistrableEnchantmentSeeker,
	RegistrableKind, RegistrablePlaceholder, RegistrableTrigger, TargetType, Time, TriggerDataHolder,
};

use crate::host::EnabledPlugins;
use crate::index::Registry;
use crate::provider::{Registrables, RegistrablesProvider};

/// A registrable of every kind that answers with fixed values.
pub(crate) struct Named {
	aliases: Vec<String>,
	holder: TriggerDataHolder,
}

impl Registrable for Named {
	fn aliases(&self) -> &[String] {
		&self.aliases
	}
}

impl RegistrableAction for Named {
	fn execute(&self, _: &dyn Event, _: &dyn RegistrableTrigger, args: &[String], _: TargetType) -> Option<EventModifications> {
		let ticks: i64 = args.first().and_then(|a| a.parse().ok()).unwrap_or(100);
		Some(EventModifications::builder().field("fireTicks", ticks).build())
	}
}

impl RegistrableCondition for Named {
	fn evaluate(&self, _: &dyn RegistrableTrigger, _: &dyn Event, _: TargetType, _: &[String]) -> bool {
		true
	}
}

impl RegistrableTrigger for Named {
	fn data_holder(&self) -> &TriggerDataHolder {
		&self.holder
	}
}

impl RegistrablePlaceholder for Named {
	fn replaced_text(&self, _: &dyn Event, _: &dyn RegistrableTrigger, _: TargetType, _: &BTreeMap<String, String>) -> Option<String> {
		self.aliases.first().cloned()
	}
}

impl RegistrableEnchantmentSeeker for Named {
	fn seek_items(&self, _: &PlayerId) -> Vec<Option<ItemStack>> {
		vec![None]
	}
}

impl RegistrableApplicable for Named {
	fn can_be_applied_to(&self, material: &Material) -> bool {
		material.name().ends_with("_SWORD")
	}
}

impl RegistrableActivationIndicator for Named {
	fn indicate_activation(&self, _: &str, _: &PlayerId) {}
}

pub(crate) fn named(aliases: &[&str]) -> Named {
	Named {
		aliases: aliases.iter().map(|a| a.to_string()).collect(),
		holder: TriggerDataHolder::new("PlayerHurtEntityEvent", [(DataRetrievalType::FirstPlayer, "getDamager")])
			.expect("has first player"),
	}
}

/// Wraps `named(aliases)` as a registrable of `kind`.
pub(crate) fn of_kind(kind: RegistrableKind, aliases: &[&str]) -> AnyRegistrable {
	let item = named(aliases);
	match kind {
		RegistrableKind::Action => AnyRegistrable::action(item),
		RegistrableKind::Condition => AnyRegistrable::condition(item),
		RegistrableKind::Trigger => AnyRegistrable::trigger(item),
		RegistrableKind::Placeholder => AnyRegistrable::placeholder(item),
		RegistrableKind::Seeker => AnyRegistrable::seeker(item),
		RegistrableKind::Applicable => AnyRegistrable::applicable(item),
		RegistrableKind::ActivationIndicator => AnyRegistrable::indicator(item),
	}
}

pub(crate) fn action(aliases: &[&str]) -> AnyRegistrable {
	of_kind(RegistrableKind::Action, aliases)
}

pub(crate) fn provider(plugin: &str, items: Vec<AnyRegistrable>) -> Arc<dyn RegistrablesProvider> {
	Arc::new(items.into_iter().fold(Registrables::new(plugin), Registrables::with))
}

/// A provider whose action aliases can change between submissions.
pub(crate) struct Shifting {
	plugin: PluginId,
	aliases: Mutex<Vec<&'static str>>,
}

impl Shifting {
	pub(crate) fn new(plugin: &str, aliases: &[&'static str]) -> Arc<Self> {
		Arc::new(Self {
			plugin: PluginId::new(plugin),
			aliases: Mutex::new(aliases.to_vec()),
		})
	}

	pub(crate) fn set(&self, aliases: &[&'static str]) {
		*self.aliases.lock() = aliases.to_vec();
	}
}

impl RegistrablesProvider for Shifting {
	fn associated_plugin(&self) -> PluginId {
		self.plugin.clone()
	}

	fn provided_registrables(&self) -> Vec<AnyRegistrable> {
		vec![action(&self.aliases.lock())]
	}
}

/// A registry whose host has exactly `enabled` enabled.
pub(crate) fn registry(enabled: &[&str]) -> (Arc<EnabledPlugins>, Registry) {
	let host: Arc<EnabledPlugins> = Arc::new(enabled.iter().copied().collect());
	let registry = Registry::new(host.clone());
	(host, registry)
}

pub(crate) fn plugin(name: &str) -> PluginId {
	PluginId::new(name)
}

pub(crate) fn key(src: &str) -> NamespacedKey {
	NamespacedKey::parse(src).expect("valid key")
}

/// An enchantment whose registrables are resolved through `lookup`, so
/// unknown aliases become undiscovered placeholders.
pub(crate) fn enchantment(lookup: &Registry, local: &str, aliases: &[&str]) -> Enchantment {
	let ignite = EnchantmentAction::new(
		lookup.resolve_action("ignite"),
		100.0,
		Time::ZERO,
		TargetType::SecondPlayer,
		vec!["60".into()],
		Vec::new(),
	)
	.expect("valid action");
	let level = EnchantmentLevel::new(1, Vec::new(), 100.0, Time::ZERO, vec![ignite]).expect("valid level");

	Enchantment::builder(key(&format!("underscore:{local}")))
		.aliases(aliases.iter().copied())
		.author("RoughlyUnderscore")
		.trigger(lookup.resolve_trigger("hurt"))
		.indicator(lookup.resolve_indicator("chat"))
		.applicable(lookup.resolve_applicable("swords"))
		.level(level)
		.build()
		.expect("valid enchantment")
}

/// Registrables `enchantment` needs besides its trigger and action.
pub(crate) fn basics() -> Vec<AnyRegistrable> {
	vec![
		of_kind(RegistrableKind::ActivationIndicator, &["chat"]),
		of_kind(RegistrableKind::Applicable, &["swords"]),
	]
}

pub(crate) struct HurtEvent;

impl Event for HurtEvent {
	fn event_name(&self) -> &str {
		"PlayerHurtEntityEvent"
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
