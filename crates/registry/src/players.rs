//! Per-player preferences.
//!
//! Preferences live in memory only; persisting them is the host's concern.

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use underscore_locale::LocaleStore;
use underscore_model::{NamespacedKey, PlayerId};

/// Rejected preference change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceError {
	#[error("players cannot change their locale on this server")]
	LocaleChangeDisabled,

	#[error("unknown locale '{0}'")]
	UnknownLocale(String),

	/// Only loaded enchantments can be toggled; vanilla ones cannot.
	#[error("'{0}' is not a loaded enchantment")]
	NotToggleable(NamespacedKey),
}

/// Player locale choices and disabled enchantments.
#[derive(Debug, Default)]
pub struct PlayerPreferences {
	players_can_change_locales: bool,
	locales: RwLock<FxHashMap<PlayerId, String>>,
	disabled: RwLock<FxHashMap<PlayerId, FxHashSet<NamespacedKey>>>,
}

impl PlayerPreferences {
	pub fn new(players_can_change_locales: bool) -> Self {
		Self {
			players_can_change_locales,
			..Self::default()
		}
	}

	/// Identifier of the locale `player` picked, if any.
	pub fn locale(&self, player: &PlayerId) -> Option<String> {
		self.locales.read().get(player).cloned()
	}

	/// Sets the locale of `player`. The identifier must name a locale in
	/// `store`; it is stored in the store's spelling.
	pub fn set_locale(&self, player: PlayerId, identifier: &str, store: &LocaleStore) -> Result<(), PreferenceError> {
		if !self.players_can_change_locales {
			return Err(PreferenceError::LocaleChangeDisabled);
		}
		let locale = store
			.get(identifier)
			.ok_or_else(|| PreferenceError::UnknownLocale(identifier.to_string()))?;

		tracing::debug!(player = %player, locale = locale.identifier(), "player locale changed");
		self.locales.write().insert(player, locale.identifier().to_string());
		Ok(())
	}

	/// Forgets the locale choice of `player`.
	pub fn clear_locale(&self, player: &PlayerId) {
		self.locales.write().remove(player);
	}

	pub fn is_disabled(&self, player: &PlayerId, key: &NamespacedKey) -> bool {
		self.disabled.read().get(player).is_some_and(|keys| keys.contains(key))
	}

	/// Flips whether `key` is disabled for `player`. Returns true if it is
	/// disabled afterwards.
	pub fn toggle(&self, player: PlayerId, key: NamespacedKey) -> bool {
		let mut disabled = self.disabled.write();
		let keys = disabled.entry(player).or_default();
		if keys.remove(&key) {
			false
		} else {
			keys.insert(key);
			true
		}
	}
}

#[cfg(test)]
mod tests {
	use underscore_locale::Locale;
	use uuid::Uuid;

	use super::*;

	fn store() -> LocaleStore {
		let mut store = LocaleStore::new(Locale::new("en_US"));
		store.insert(Locale::new("de_DE"));
		store
	}

	#[test]
	fn set_locale_requires_permission_and_known_locale() {
		let player = PlayerId(Uuid::new_v4());

		let locked = PlayerPreferences::new(false);
		assert_eq!(locked.set_locale(player, "de_DE", &store()), Err(PreferenceError::LocaleChangeDisabled));
		assert_eq!(locked.locale(&player), None);

		let open = PlayerPreferences::new(true);
		assert_eq!(
			open.set_locale(player, "xx_XX", &store()),
			Err(PreferenceError::UnknownLocale("xx_XX".into()))
		);
		open.set_locale(player, "DE_de", &store()).expect("known locale");
		assert_eq!(open.locale(&player).as_deref(), Some("de_DE"));

		open.clear_locale(&player);
		assert_eq!(open.locale(&player), None);
	}

	#[test]
	fn toggle_flips_per_player() {
		let prefs = PlayerPreferences::new(true);
		let alice = PlayerId(Uuid::new_v4());
		let bob = PlayerId(Uuid::new_v4());
		let frost = NamespacedKey::parse("underscore:frost").expect("valid");

		assert!(!prefs.is_disabled(&alice, &frost));
		assert!(prefs.toggle(alice, frost.clone()));
		assert!(prefs.is_disabled(&alice, &frost));
		assert!(!prefs.is_disabled(&bob, &frost));
		assert!(!prefs.toggle(alice, frost.clone()));
		assert!(!prefs.is_disabled(&alice, &frost));
	}
}
