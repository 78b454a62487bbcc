//! Plugin lifecycle as seen by the registry.

use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use underscore_model::PluginId;

/// Answers whether a plugin is currently enabled.
///
/// The game server implements this; the registry consults it whenever a
/// provider is submitted and on every refresh.
pub trait PluginHost: Send + Sync {
	fn is_enabled(&self, plugin: &PluginId) -> bool;
}

/// In-memory [`PluginHost`] with an explicit enabled set.
#[derive(Debug, Default)]
pub struct EnabledPlugins {
	enabled: RwLock<FxHashSet<PluginId>>,
}

impl EnabledPlugins {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn enable(&self, plugin: impl Into<PluginId>) {
		self.enabled.write().insert(plugin.into());
	}

	pub fn disable(&self, plugin: &PluginId) {
		self.enabled.write().remove(plugin);
	}
}

impl<P: Into<PluginId>> FromIterator<P> for EnabledPlugins {
	fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
		Self {
			enabled: RwLock::new(iter.into_iter().map(Into::into).collect()),
		}
	}
}

impl PluginHost for EnabledPlugins {
	fn is_enabled(&self, plugin: &PluginId) -> bool {
		self.enabled.read().contains(plugin)
	}
}
