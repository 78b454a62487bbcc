use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use underscore_locale::{Locale, LocaleStore, Message};
use underscore_model::{
	Enchantment, EnchantmentAction, EnchantmentBuilder, EnchantmentLevel, ItemStack, Material, NamespacedKey, PlayerId,
	Registrable, TargetType, Time,
};
use uuid::Uuid;

use crate::index::test_fixtures::{HurtEvent, action, basics, enchantment, named, plugin, provider};
use crate::{
	Api, EnabledPlugins, EnchantResponseType, EnchanterError, EnchantingRestriction, PreferenceError, Settings,
};

fn locales() -> LocaleStore {
	let mut store = LocaleStore::new(Locale::new("en_US").with(Message::TokenEnchantment, "Enchantment"));
	store.insert(Locale::new("de_DE").with(Message::TokenEnchantment, "Verzauberung"));
	store
}

fn api(settings: &str) -> Api {
	let settings = Settings::from_toml_str(settings).expect("valid settings");
	let host: EnabledPlugins = ["UnderscoreEnchants", "Pyro"].into_iter().collect();
	Api::new(settings, Arc::new(host), locales())
}

fn player() -> PlayerId {
	PlayerId(Uuid::new_v4())
}

#[test]
fn burn_is_found_by_either_alias() {
	let api = api("");
	let registry = api.registry();
	registry
		.provide(provider("Pyro", vec![action(&["burn", "ignite"])]))
		.expect("Pyro enabled");

	let ignite = registry.find_action("ignite").expect("registered");
	assert_eq!(ignite.aliases(), ["burn".to_string(), "ignite".to_string()]);

	let owned = registry.find_actions(&plugin("Pyro"));
	assert_eq!(owned.len(), 1);
	assert!(Arc::ptr_eq(&owned[0], &ignite));
	assert!(registry.find_action("unknown").is_none());
}

#[test]
fn registered_action_runs_through_enchantment_action() {
	let api = api("");
	let registry = api.registry();
	registry
		.provide(provider("Pyro", vec![action(&["burn", "ignite"])]))
		.expect("Pyro enabled");

	let run = EnchantmentAction::new(
		registry.resolve_action("burn"),
		100.0,
		Time::ZERO,
		TargetType::SecondPlayer,
		vec!["80".into()],
		Vec::new(),
	)
	.expect("valid action");
	let modifications = run.run(&HurtEvent, &named(&["hurt"])).expect("no conditions to fail");

	assert_eq!(modifications.field_modifications.get("fireTicks"), Some(&json!(80)));
	assert!(modifications.methods_to_call.is_empty());
}

#[test]
fn unresolved_action_runs_inertly() {
	let api = api("");
	let run = EnchantmentAction::new(
		api.registry().resolve_action("burn"),
		100.0,
		Time::ZERO,
		TargetType::SecondPlayer,
		Vec::new(),
		Vec::new(),
	)
	.expect("valid action");

	assert!(run.action().undiscovered().is_some());
	assert_eq!(run.run(&HurtEvent, &named(&["hurt"])), None);
}

#[test]
fn server_locale_follows_settings() {
	let german = api("[settings]\nlocale = \"de_DE\"\n");
	assert_eq!(german.server_locale().identifier(), "de_DE");

	let missing = api("[settings]\nlocale = \"fr_FR\"\n");
	assert_eq!(missing.server_locale().identifier(), "en_US");

	missing.add_locale(Locale::new("fr_FR"));
	assert!(missing.locale("FR_fr").is_some());
}

#[test]
fn player_locale_falls_back_to_server() {
	let api = api("");
	let alice = player();

	assert_eq!(api.player_locale(&alice).identifier(), "en_US");
	api.set_player_locale(alice, "de_de").expect("known locale");
	assert_eq!(api.player_locale(&alice).identifier(), "de_DE");
	assert_eq!(
		api.set_player_locale(alice, "xx_XX"),
		Err(PreferenceError::UnknownLocale("xx_XX".into()))
	);
	assert_eq!(api.player_locale(&alice).identifier(), "de_DE");
}

#[test]
fn locked_servers_refuse_player_locales() {
	let api = api("[settings]\nplayers-can-change-locales = false\n");
	assert_eq!(
		api.set_player_locale(player(), "de_DE"),
		Err(PreferenceError::LocaleChangeDisabled)
	);
}

#[test]
fn only_loaded_enchantments_toggle() {
	let api = api("");
	let alice = player();
	let burn_key = api.settings().key("burn").expect("valid key");

	assert_eq!(
		api.toggle_enchantment(alice, &burn_key),
		Err(PreferenceError::NotToggleable(burn_key.clone()))
	);

	let burn = enchantment(api.registry(), "burn", &["Burn"]);
	api.registry().load_enchantment(api.settings().host_plugin(), burn);

	assert_eq!(api.enchantment_key("burn"), Some(burn_key.clone()));
	assert_eq!(api.toggle_enchantment(alice, &burn_key), Ok(true));
	assert!(api.players().is_disabled(&alice, &burn_key));
	assert_eq!(api.toggle_enchantment(alice, &burn_key), Ok(false));
}

#[test]
fn describes_in_the_player_locale() {
	let api = api("");
	api.registry()
		.provide(provider("UnderscoreEnchants", basics()))
		.expect("host enabled");
	let burn = enchantment(api.registry(), "burn", &["Burn"]);
	api.registry().load_enchantment(api.settings().host_plugin(), burn);

	assert!(api.describe_enchantment("unknown", None).is_empty());

	let server = api.describe_enchantment("BURN", None);
	assert_eq!(server.first().map(String::as_str), Some("Enchantment: Burn (underscore:burn)"));

	let alice = player();
	api.set_player_locale(alice, "de_DE").expect("known locale");
	let german = api.describe_enchantment("burn", Some(&alice));
	assert_eq!(german.first().map(String::as_str), Some("Verzauberung: Burn (underscore:burn)"));
}

/// An api whose registry provides the chat indicator and the swords applicable.
fn enchanting_api(settings: &str) -> Api {
	let api = api(settings);
	api.registry()
		.provide(provider("UnderscoreEnchants", basics()))
		.expect("host enabled");
	api
}

/// A two-level enchantment for swords.
fn sword_enchantment(api: &Api, local: &str) -> EnchantmentBuilder {
	let registry = api.registry();
	let level = |n| EnchantmentLevel::new(n, Vec::new(), 100.0, Time::ZERO, Vec::new()).expect("valid level");
	Enchantment::builder(api.settings().key(local).expect("valid key"))
		.aliases([local])
		.trigger(registry.resolve_trigger("hurt"))
		.indicator(registry.resolve_indicator("chat"))
		.applicable(registry.resolve_applicable("swords"))
		.level(level(1))
		.level(level(2))
}

fn load(api: &Api, builder: EnchantmentBuilder) -> NamespacedKey {
	let enchantment = builder.build().expect("valid enchantment");
	let key = enchantment.key().clone();
	api.registry().load_enchantment(api.settings().host_plugin(), enchantment);
	key
}

fn sword() -> ItemStack {
	ItemStack::new(Material::new("diamond_sword"))
}

#[test]
fn enchanting_runs_every_check() {
	let api = enchanting_api("[settings]\nenchantment-limit = 2\n");
	let burn = load(&api, sword_enchantment(&api, "burn").conflict("frost"));
	let frost = load(&api, sword_enchantment(&api, "frost"));
	let lone = load(&api, sword_enchantment(&api, "lone").unique(true));
	let sharp = load(&api, sword_enchantment(&api, "sharp"));
	let keen = load(&api, sword_enchantment(&api, "keen"));

	let enchanter = api.enchanter();
	let kind = |item: ItemStack, key: &NamespacedKey, level: i32| enchanter.enchant(item, key, level, &[]).expect("loaded").kind;

	let burned = enchanter.enchant(sword(), &burn, 2, &[]).expect("loaded");
	assert_eq!(burned.kind, EnchantResponseType::Success);
	assert_eq!((burned.key.clone(), burned.level), (burn.clone(), 2));
	assert_eq!(burned.item.enchantment_level(&burn), Some(2));

	assert_eq!(kind(ItemStack::new(Material::new("bow")), &burn, 1), EnchantResponseType::NotApplicable);
	assert_eq!(kind(sword(), &burn, 3), EnchantResponseType::LevelTooHigh);
	assert_eq!(kind(sword().with_enchantment(burn.clone(), 1), &lone, 1), EnchantResponseType::CantApplyUnique);
	assert_eq!(kind(sword().with_enchantment(lone.clone(), 1), &sharp, 1), EnchantResponseType::HasUnique);
	assert_eq!(kind(burned.item.clone(), &frost, 1), EnchantResponseType::Conflicts);
	assert_eq!(kind(sword().with_enchantment(frost.clone(), 1), &burn, 1), EnchantResponseType::Conflicts);

	let full = sword().with_enchantment(sharp.clone(), 1).with_enchantment(keen.clone(), 1);
	assert_eq!(kind(full.clone(), &burn, 1), EnchantResponseType::LimitExceeded);
	assert_eq!(kind(full, &sharp, 2), EnchantResponseType::Success);
}

#[test]
fn refused_enchant_returns_item_untouched() {
	let api = enchanting_api("");
	let burn = load(&api, sword_enchantment(&api, "burn"));
	let bow = ItemStack::new(Material::new("bow")).with_enchantment(NamespacedKey::parse("minecraft:power").expect("valid key"), 3);

	let response = api.enchanter().enchant(bow.clone(), &burn, 1, &[]).expect("loaded");
	assert_eq!(response.kind, EnchantResponseType::NotApplicable);
	assert_eq!(response.item, bow);
}

#[test]
fn lifted_restrictions_are_not_checked() {
	let api = enchanting_api("");
	let burn = load(&api, sword_enchantment(&api, "burn"));
	let enchanter = api.enchanter();

	let high = enchanter.enchant(sword(), &burn, 5, &[EnchantingRestriction::Level]).expect("loaded");
	assert!(high.kind.is_success());
	assert_eq!(high.item.enchantment_level(&burn), Some(5));

	let bow = ItemStack::new(Material::new("bow"));
	let lifted = [EnchantingRestriction::Applicability, EnchantingRestriction::Level];
	assert!(enchanter.enchant(bow, &burn, 9, &lifted).expect("loaded").kind.is_success());
}

#[test]
fn enchanting_rejects_unknown_keys_and_bad_levels() {
	let api = enchanting_api("");
	let burn = load(&api, sword_enchantment(&api, "burn"));
	let ghost = api.settings().key("ghost").expect("valid key");
	let enchanter = api.enchanter();

	assert_eq!(
		enchanter.enchant(sword(), &ghost, 1, &[]),
		Err(EnchanterError::UnknownEnchantment(ghost.clone()))
	);
	assert_eq!(enchanter.enchant(sword(), &burn, 0, &[]), Err(EnchanterError::NonPositiveLevel(0)));
}

#[test]
fn disenchanting_leaves_vanilla_enchantments() {
	let api = enchanting_api("");
	let burn = load(&api, sword_enchantment(&api, "burn"));
	let frost = load(&api, sword_enchantment(&api, "frost"));
	let sharpness = NamespacedKey::parse("minecraft:sharpness").expect("valid key");
	let item = sword()
		.with_enchantment(burn.clone(), 1)
		.with_enchantment(frost.clone(), 2)
		.with_enchantment(sharpness.clone(), 5);
	let enchanter = api.enchanter();

	let stripped = enchanter.disenchant(item.clone(), &burn).expect("carries burn");
	assert_eq!(stripped.enchantment_level(&burn), None);
	assert_eq!(stripped.enchantment_level(&frost), Some(2));
	assert_eq!(enchanter.disenchant(stripped, &burn), Err(EnchanterError::NotEnchanted(burn.clone())));
	assert_eq!(
		enchanter.disenchant(item.clone(), &sharpness),
		Err(EnchanterError::UnknownEnchantment(sharpness.clone()))
	);

	let bare = enchanter.fully_disenchant(item);
	assert_eq!(bare.enchantments.into_iter().collect::<Vec<_>>(), vec![(sharpness, 5)]);
}

#[test]
fn enchantment_names_resolve_to_keys() {
	let api = enchanting_api("");
	let burn = load(&api, sword_enchantment(&api, "burn").aliases(["Scorch"]));
	let enchanter = api.enchanter();

	assert_eq!(enchanter.enchantment_key("SCORCH"), Some(burn.clone()));
	assert_eq!(enchanter.enchantment_key("underscore:burn"), Some(burn.clone()));
	assert_eq!(enchanter.enchantment_key("Burn"), Some(burn.clone()));
	assert_eq!(api.enchantment_key("scorch"), Some(burn));
	assert_eq!(enchanter.enchantment_key("ghost"), None);
}
