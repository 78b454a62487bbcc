//! Loaded locales indexed by identifier.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::LocaleError;
use crate::locale::Locale;

/// Locales available to the server, with one designated server locale.
///
/// Identifiers compare case-insensitively (`en_us` finds `en_US`).
#[derive(Debug, Clone)]
pub struct LocaleStore {
	by_id: FxHashMap<String, Arc<Locale>>,
	server: Arc<Locale>,
}

impl LocaleStore {
	/// Creates a store whose server locale is `server`.
	pub fn new(server: Locale) -> Self {
		let server = Arc::new(server);
		let mut by_id = FxHashMap::default();
		by_id.insert(fold(server.identifier()), Arc::clone(&server));
		Self { by_id, server }
	}

	/// Adds or replaces a locale, returning the one it displaced.
	///
	/// Replacing the server locale's identifier also replaces the server locale.
	pub fn insert(&mut self, locale: Locale) -> Option<Arc<Locale>> {
		let key = fold(locale.identifier());
		let locale = Arc::new(locale);
		if fold(self.server.identifier()) == key {
			self.server = Arc::clone(&locale);
		}
		self.by_id.insert(key, locale)
	}

	/// Returns a loaded locale by identifier.
	pub fn get(&self, identifier: &str) -> Option<Arc<Locale>> {
		self.by_id.get(&fold(identifier)).cloned()
	}

	/// Returns true if a locale with this identifier is loaded.
	pub fn contains(&self, identifier: &str) -> bool {
		self.by_id.contains_key(&fold(identifier))
	}

	/// Returns the server locale.
	pub fn server_locale(&self) -> Arc<Locale> {
		Arc::clone(&self.server)
	}

	/// Makes an already-loaded locale the server locale.
	pub fn set_server_locale(&mut self, identifier: &str) -> Result<(), LocaleError> {
		let locale = self
			.get(identifier)
			.ok_or_else(|| LocaleError::UnknownLocale(identifier.to_string()))?;
		self.server = locale;
		Ok(())
	}

	/// Returns identifiers of all loaded locales, sorted.
	pub fn identifiers(&self) -> Vec<String> {
		let mut ids: Vec<_> = self.by_id.values().map(|l| l.identifier().to_string()).collect();
		ids.sort();
		ids
	}
}

fn fold(identifier: &str) -> String {
	identifier.to_lowercase()
}
