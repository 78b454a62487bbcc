use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use super::load::{SETTINGS_FILE, load_settings_from_dir};
use super::*;

fn unique_temp_dir(prefix: &str) -> PathBuf {
	let nanos = std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.expect("system time should be after unix epoch")
		.as_nanos();
	let dir = std::env::temp_dir().join(format!("underscore-settings-{prefix}-{}-{nanos}", std::process::id()));
	std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
	dir
}

fn write_file(path: &Path, content: &str) {
	std::fs::write(path, content).expect("file should be writable");
}

#[test]
fn empty_document_yields_defaults() {
	let settings = Settings::from_toml_str("").expect("empty is valid");
	assert_eq!(settings, Settings::default());
	assert_eq!(settings.settings.locale, "en_US");
	assert!(settings.settings.players_can_change_locales);
	assert_eq!(settings.host_plugin(), PluginId::new("UnderscoreEnchants"));
}

#[test]
fn parses_all_sections() {
	let settings = Settings::from_toml_str(
		r#"
		[settings]
		locale = "de_DE"
		players-can-change-locales = false
		enchantment-limit = 4

		[registry]
		host-plugin = "MyEnchants"
		namespace = "mine"
		"#,
	)
	.expect("valid settings");

	assert_eq!(settings.settings.locale, "de_DE");
	assert!(!settings.settings.players_can_change_locales);
	assert_eq!(settings.settings.enchantment_limit, 4);
	assert_eq!(settings.registry.host_plugin, "MyEnchants");
	assert_eq!(settings.key("frost").expect("valid").to_string(), "mine:frost");
	assert!(settings.warnings.is_empty());
}

#[test]
fn unknown_keys_warn() {
	let settings = Settings::from_toml_str(
		r#"
		economy = true

		[settings]
		locale = "en_US"
		colour = "red"
		"#,
	)
	.expect("unknown keys are not fatal");

	assert_eq!(
		settings.warnings,
		vec![
			ConfigWarning::UnknownKey { key: "economy".into() },
			ConfigWarning::UnknownKey {
				key: "settings.colour".into()
			},
		]
	);
}

#[test]
fn rejects_invalid_values() {
	assert!(matches!(
		Settings::from_toml_str("[settings]\nlocale = 5"),
		Err(ConfigError::Toml(_))
	));
	assert!(matches!(
		Settings::from_toml_str("[settings]\nlocale = \"  \""),
		Err(ConfigError::MissingField(field)) if field == "settings.locale"
	));
	assert!(matches!(
		Settings::from_toml_str("[registry]\nnamespace = \"Not Valid\""),
		Err(ConfigError::InvalidNamespace(_))
	));
	assert!(matches!(Settings::from_toml_str("[settings"), Err(ConfigError::Toml(_))));
}

#[test]
fn load_ignores_missing_file() {
	let dir = unique_temp_dir("missing");
	let report = load_settings_from_dir(&dir);
	assert!(report.settings.is_none());
	assert!(report.errors.is_empty());
	assert_eq!(report.settings_or_default(), Settings::default());
	let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn load_reports_warnings_and_errors() {
	let dir = unique_temp_dir("warn");
	write_file(&dir.join(SETTINGS_FILE), "[settings]\nlocale = \"fr_FR\"\nshiny = 1\n");
	let report = load_settings_from_dir(&dir);
	assert_eq!(report.settings.as_ref().map(|s| s.settings.locale.as_str()), Some("fr_FR"));
	assert_eq!(report.warnings.len(), 1);
	assert!(report.errors.is_empty());
	let _ = std::fs::remove_dir_all(&dir);

	let dir = unique_temp_dir("broken");
	write_file(&dir.join(SETTINGS_FILE), "[settings\n");
	let report = load_settings_from_dir(&dir);
	assert!(report.settings.is_none());
	assert_eq!(report.errors.len(), 1);
	assert!(matches!(report.errors[0].1, ConfigError::Toml(_)));
	let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn unreadable_settings_are_io_errors() {
	let dir = unique_temp_dir("unreadable");
	std::fs::create_dir_all(dir.join(SETTINGS_FILE)).expect("settings path should be creatable as a directory");

	let report = load_settings_from_dir(&dir);
	assert!(report.settings.is_none());
	assert_eq!(report.errors.len(), 1);
	assert_eq!(report.errors[0].0, dir.join(SETTINGS_FILE));
	assert!(matches!(report.errors[0].1, ConfigError::Io(_)));
	let _ = std::fs::remove_dir_all(dir);
}
