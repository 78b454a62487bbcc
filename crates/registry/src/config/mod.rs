//! Settings for the registry host.
//!
//! Settings are read from `settings.toml`:
//!
//! ```toml
//! [settings]
//! locale = "en_US"
//! players-can-change-locales = true
//! enchantment-limit = 0
//!
//! [registry]
//! host-plugin = "UnderscoreEnchants"
//! namespace = "underscore"
//! ```
//!
//! Every key is optional. Unknown keys produce warnings, not errors.

pub mod load;

use serde::{Deserialize, Serialize};
use underscore_model::{NamespacedKey, PluginId};

/// General behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneralSettings {
	/// Identifier of the server locale.
	pub locale: String,
	/// Whether players may pick their own locale.
	pub players_can_change_locales: bool,
	/// Most enchantments the enchanter puts on one item; 0 for no limit.
	pub enchantment_limit: u32,
}

impl Default for GeneralSettings {
	fn default() -> Self {
		Self {
			locale: "en_US".to_string(),
			players_can_change_locales: true,
			enchantment_limit: 0,
		}
	}
}

/// Registry ownership and key namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RegistrySettings {
	/// Plugin that owns enchantments loaded from definition files.
	pub host_plugin: String,
	/// Namespace of enchantment keys.
	pub namespace: String,
}

impl Default for RegistrySettings {
	fn default() -> Self {
		Self {
			host_plugin: "UnderscoreEnchants".to_string(),
			namespace: "underscore".to_string(),
		}
	}
}

/// Parsed `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub settings: GeneralSettings,
	pub registry: RegistrySettings,
	/// Non-fatal warnings encountered during parsing.
	#[serde(skip)]
	pub warnings: Vec<ConfigWarning>,
}

impl Settings {
	/// Parses and validates settings from TOML text.
	pub fn from_toml_str(src: &str) -> Result<Self> {
		let table: toml::Table = src.parse()?;
		let warnings = unknown_keys(&table);

		let mut settings: Settings = toml::Value::Table(table).try_into()?;
		settings.validate()?;
		settings.warnings = warnings;
		Ok(settings)
	}

	pub fn host_plugin(&self) -> PluginId {
		PluginId::new(&self.registry.host_plugin)
	}

	/// Builds a key in the configured namespace.
	pub fn key(&self, local: &str) -> underscore_model::Result<NamespacedKey> {
		NamespacedKey::new(&self.registry.namespace, local)
	}

	fn validate(&self) -> Result<()> {
		if self.settings.locale.trim().is_empty() {
			return Err(ConfigError::MissingField("settings.locale".to_string()));
		}
		if self.registry.host_plugin.trim().is_empty() {
			return Err(ConfigError::MissingField("registry.host-plugin".to_string()));
		}
		if NamespacedKey::new(&self.registry.namespace, "key").is_err() {
			return Err(ConfigError::InvalidNamespace(self.registry.namespace.clone()));
		}
		Ok(())
	}
}

const KNOWN_KEYS: &[(&str, &[&str])] = &[
	("settings", &["locale", "players-can-change-locales", "enchantment-limit"]),
	("registry", &["host-plugin", "namespace"]),
];

fn unknown_keys(table: &toml::Table) -> Vec<ConfigWarning> {
	let mut warnings = Vec::new();
	for (section, value) in table {
		let Some((_, keys)) = KNOWN_KEYS.iter().find(|(name, _)| name == section) else {
			warnings.push(ConfigWarning::UnknownKey { key: section.clone() });
			continue;
		};
		let Some(inner) = value.as_table() else {
			continue;
		};
		for key in inner.keys() {
			if !keys.contains(&key.as_str()) {
				warnings.push(ConfigWarning::UnknownKey {
					key: format!("{section}.{key}"),
				});
			}
		}
	}
	warnings
}

/// Non-fatal warning during settings parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A key that no setting reads; it is ignored.
	UnknownKey { key: String },
}

impl std::fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigWarning::UnknownKey { key } => write!(f, "unknown key '{key}' will be ignored"),
		}
	}
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("failed to read settings: {0}")]
	Io(#[from] std::io::Error),

	/// A required field is present but blank.
	#[error("missing required field: {0}")]
	MissingField(String),

	#[error("invalid key namespace: '{0}'")]
	InvalidNamespace(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests;
