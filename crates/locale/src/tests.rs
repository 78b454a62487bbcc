use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::{Locale, LocaleError, LocaleStore, Message};

#[test]
fn message_keys_are_unique_after_normalization() {
	for &message in Message::ALL {
		assert_eq!(Message::from_key(message.key()), Some(message), "{message:?}");
	}
	assert_eq!(Message::COUNT, Message::ALL.len());
}

#[rstest]
#[case("token-enchantment-chance")]
#[case("tokenEnchantmentChance")]
#[case("token_enchantment_chance")]
#[case("TOKEN-ENCHANTMENT-CHANCE")]
fn from_key_accepts_spellings(#[case] key: &str) {
	assert_eq!(Message::from_key(key), Some(Message::TokenEnchantmentChance));
}

#[test]
fn from_key_rejects_unknown() {
	assert_eq!(Message::from_key("token-enchantment-sparkle"), None);
	assert_eq!(Message::from_key(""), None);
}

#[test]
fn blank_locale_reads_empty_strings() {
	let locale = Locale::new("en_US");
	assert_eq!(locale.get(Message::Yes), "");
	assert!(!locale.is_set(Message::Yes));
	assert_eq!(locale.missing().count(), Message::COUNT);
}

#[test]
fn from_json_walks_nested_objects() {
	let doc = json!({
		"identifier": "en_US",
		"messages": {
			"yes": "Yes",
			"no": "No",
			"tokens": {
				"token-enchantment-chance": "chance",
				"deeper": { "tokenEnchantmentNegated": "negated" }
			},
			"ignored-array": ["a", "b"],
			"ignored-null": null
		}
	});

	let report = Locale::from_json(&doc).expect("valid locale");
	let locale = report.locale;

	assert_eq!(locale.identifier(), "en_US");
	assert_eq!(locale.get(Message::Yes), "Yes");
	assert_eq!(locale.get(Message::No), "No");
	assert_eq!(locale.get(Message::TokenEnchantmentChance), "chance");
	assert_eq!(locale.get(Message::TokenEnchantmentNegated), "negated");
	assert_eq!(locale.get(Message::StateOn), "");
	assert!(report.unknown_keys.is_empty());
}

#[test]
fn from_json_reports_unknown_keys() {
	let doc = json!({
		"lang": "de_DE",
		"msg": { "ja": "Ja", "yes": "Ja" }
	});

	let report = Locale::from_json(&doc).expect("valid locale");
	assert_eq!(report.locale.identifier(), "de_DE");
	assert_eq!(report.locale.get(Message::Yes), "Ja");
	assert_eq!(report.unknown_keys, vec!["ja".to_string()]);
}

#[test]
fn from_json_stringifies_scalars() {
	let doc = json!({
		"id": "en_US",
		"messages": { "yes": true, "no": 0 }
	});

	let locale = Locale::from_json(&doc).expect("valid locale").locale;
	assert_eq!(locale.get(Message::Yes), "true");
	assert_eq!(locale.get(Message::No), "0");
}

#[test]
fn from_json_requires_identifier_and_messages() {
	assert!(matches!(Locale::from_json(&json!([])), Err(LocaleError::NotAnObject)));
	assert!(matches!(
		Locale::from_json(&json!({ "messages": {} })),
		Err(LocaleError::MissingIdentifier { .. })
	));
	assert!(matches!(
		Locale::from_json(&json!({ "identifier": "en_US" })),
		Err(LocaleError::MissingMessages { identifier }) if identifier == "en_US"
	));
}

#[test]
fn from_json_str_surfaces_syntax_errors() {
	assert!(matches!(Locale::from_json_str("{"), Err(LocaleError::Json(_))));
}

#[test]
fn store_lookup_is_case_insensitive() {
	let mut store = LocaleStore::new(Locale::new("en_US"));
	store.insert(Locale::new("de_DE").with(Message::Yes, "Ja"));

	assert!(store.contains("EN_us"));
	assert_eq!(store.get("de_de").expect("loaded").get(Message::Yes), "Ja");
	assert!(store.get("fr_FR").is_none());
	assert_eq!(store.identifiers(), vec!["de_DE".to_string(), "en_US".to_string()]);
}

#[test]
fn store_switches_server_locale() {
	let mut store = LocaleStore::new(Locale::new("en_US"));
	store.insert(Locale::new("de_DE"));

	store.set_server_locale("de_DE").expect("loaded");
	assert_eq!(store.server_locale().identifier(), "de_DE");

	assert!(matches!(store.set_server_locale("fr_FR"), Err(LocaleError::UnknownLocale(id)) if id == "fr_FR"));
	assert_eq!(store.server_locale().identifier(), "de_DE");
}

#[test]
fn replacing_server_locale_updates_server() {
	let mut store = LocaleStore::new(Locale::new("en_US"));
	let displaced = store.insert(Locale::new("en_US").with(Message::Yes, "Yes"));

	assert!(displaced.is_some());
	assert_eq!(store.server_locale().get(Message::Yes), "Yes");
}
