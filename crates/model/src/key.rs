use std::fmt;
use std::sync::Arc;

use crate::error::{Result, ValidationError};

/// Identity of a plugin as seen by the registry.
///
/// Plugin names are compared exactly; the host guarantees uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginId(Arc<str>);

impl PluginId {
	pub fn new(name: impl AsRef<str>) -> Self {
		Self(Arc::from(name.as_ref()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PluginId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for PluginId {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

/// A `namespace:key` identifier for enchantments.
///
/// Both parts are stored lowercase. The namespace allows `[a-z0-9._-]`; the
/// key additionally allows `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedKey {
	namespace: String,
	key: String,
}

impl NamespacedKey {
	pub fn new(namespace: &str, key: &str) -> Result<Self> {
		let namespace = namespace.to_lowercase();
		let key = key.to_lowercase();

		let valid_namespace = !namespace.is_empty() && namespace.chars().all(is_namespace_char);
		let valid_key = !key.is_empty() && key.chars().all(|c| is_namespace_char(c) || c == '/');
		if !valid_namespace || !valid_key {
			return Err(ValidationError::InvalidKey(format!("{namespace}:{key}")));
		}

		Ok(Self { namespace, key })
	}

	/// Parses `namespace:key`.
	pub fn parse(src: &str) -> Result<Self> {
		let (namespace, key) = src
			.split_once(':')
			.ok_or_else(|| ValidationError::InvalidKey(src.to_string()))?;
		Self::new(namespace, key)
	}

	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// The local part (`frost` in `underscore:frost`).
	pub fn key(&self) -> &str {
		&self.key
	}
}

fn is_namespace_char(c: char) -> bool {
	matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-')
}

impl fmt::Display for NamespacedKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.namespace, self.key)
	}
}

impl std::str::FromStr for NamespacedKey {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}
