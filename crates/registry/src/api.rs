//! Entry point handed to other plugins.

use std::sync::Arc;

use parking_lot::RwLock;
use underscore_locale::{Locale, LocaleStore};
use underscore_model::{NamespacedKey, PlayerId};

use crate::config::Settings;
use crate::enchanter::Enchanter;
use crate::host::PluginHost;
use crate::index::Registry;
use crate::players::{PlayerPreferences, PreferenceError};

/// Registry, locales, player preferences and settings in one place.
pub struct Api {
	settings: Settings,
	registry: Registry,
	locales: RwLock<LocaleStore>,
	players: PlayerPreferences,
}

impl Api {
	/// Builds the API. The server locale is switched to the one named in
	/// `settings` when `locales` has it; otherwise the store's current server
	/// locale stays.
	pub fn new(settings: Settings, host: Arc<dyn PluginHost>, mut locales: LocaleStore) -> Self {
		if let Err(error) = locales.set_server_locale(&settings.settings.locale) {
			tracing::warn!(
				%error,
				fallback = locales.server_locale().identifier(),
				"configured server locale is not loaded"
			);
		}

		Self {
			players: PlayerPreferences::new(settings.settings.players_can_change_locales),
			registry: Registry::new(host),
			locales: RwLock::new(locales),
			settings,
		}
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	pub fn players(&self) -> &PlayerPreferences {
		&self.players
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Returns a loaded locale by identifier, ignoring case.
	pub fn locale(&self, identifier: &str) -> Option<Arc<Locale>> {
		self.locales.read().get(identifier)
	}

	pub fn server_locale(&self) -> Arc<Locale> {
		self.locales.read().server_locale()
	}

	/// Adds or replaces a loaded locale.
	pub fn add_locale(&self, locale: Locale) {
		tracing::debug!(locale = locale.identifier(), "locale added");
		self.locales.write().insert(locale);
	}

	/// The locale `player` picked, falling back to the server locale.
	pub fn player_locale(&self, player: &PlayerId) -> Arc<Locale> {
		let locales = self.locales.read();
		self.players
			.locale(player)
			.and_then(|id| locales.get(&id))
			.unwrap_or_else(|| locales.server_locale())
	}

	pub fn set_player_locale(&self, player: PlayerId, identifier: &str) -> Result<(), PreferenceError> {
		let locales = self.locales.read();
		self.players.set_locale(player, identifier, &locales)
	}

	/// Toggles a loaded enchantment for `player`. Returns true if it is now
	/// disabled.
	pub fn toggle_enchantment(&self, player: PlayerId, key: &NamespacedKey) -> Result<bool, PreferenceError> {
		if self.registry.find_enchantment_by_key(key).is_none() {
			return Err(PreferenceError::NotToggleable(key.clone()));
		}
		Ok(self.players.toggle(player, key.clone()))
	}

	/// Enchanter bound to the registry and the configured enchantment limit.
	pub fn enchanter(&self) -> Enchanter<'_> {
		Enchanter::new(&self.registry, self.settings.settings.enchantment_limit)
	}

	/// Key of the loaded enchantment called `name`. See
	/// [`Enchanter::enchantment_key`].
	pub fn enchantment_key(&self, name: &str) -> Option<NamespacedKey> {
		self.enchanter().enchantment_key(name)
	}

	/// Multi-line description of an enchantment in the player's locale, or
	/// the server locale without a player.
	pub fn describe_enchantment(&self, name: &str, player: Option<&PlayerId>) -> Vec<String> {
		let locale = match player {
			Some(player) => self.player_locale(player),
			None => self.server_locale(),
		};
		underscore_model::describe(&locale, self.registry.find_enchantment(name).as_deref())
	}
}

impl std::fmt::Debug for Api {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Api")
			.field("settings", &self.settings)
			.field("locales", &self.locales.read().identifiers())
			.finish_non_exhaustive()
	}
}
