//! Enchantment extension registry.
//!
//! Other plugins extend the enchantment engine by submitting a
//! [`RegistrablesProvider`]: a batch of actions, conditions, triggers,
//! placeholders, seekers, applicables and activation indicators owned by one
//! plugin. The [`Registry`] indexes them by alias and keeps the loaded
//! enchantments and packs that refer to them.
//!
//! # Layout
//!
//! - [`index`] - alias tables, snapshots, collisions and diagnostics
//! - [`config`] - `settings.toml`
//! - [`players`] - per-player locale and toggles
//! - [`Enchanter`] - enchanting and disenchanting items
//! - [`Api`] - everything above behind one handle
//!
//! # Reload model
//!
//! Providers are kept for as long as their plugin stays enabled.
//! [`Registry::refresh`] clears every kind table and re-applies the kept
//! providers, dropping those whose plugin was disabled in the meantime.

mod api;
pub mod config;
mod enchanter;
mod host;
pub mod index;
pub mod players;
mod provider;

pub use api::Api;
pub use config::{ConfigError, Settings};
pub use enchanter::{EnchantResponse, EnchantResponseType, Enchanter, EnchanterError, EnchantingRestriction};
pub use host::{EnabledPlugins, PluginHost};
pub use index::{
	Collision, DiagnosticReport, LoadOutcome, Party, ProvideOutcome, RefreshSummary, Registry, RegistryError, Resolution,
	Skipped, Snapshot, diagnostics,
};
pub use players::{PlayerPreferences, PreferenceError};
pub use provider::{Registrables, RegistrablesProvider};
pub use underscore_locale as locale;
pub use underscore_model as model;

#[cfg(test)]
mod tests;
