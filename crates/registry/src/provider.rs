use underscore_model::{AnyRegistrable, PluginId};

/// One plugin's batch of registrables.
///
/// The registry keeps the provider for as long as its plugin stays enabled
/// and asks it again for its registrables on every refresh.
pub trait RegistrablesProvider: Send + Sync + 'static {
	fn associated_plugin(&self) -> PluginId;

	fn provided_registrables(&self) -> Vec<AnyRegistrable>;
}

/// A fixed list of registrables owned by one plugin.
#[derive(Debug, Clone)]
pub struct Registrables {
	plugin: PluginId,
	items: Vec<AnyRegistrable>,
}

impl Registrables {
	pub fn new(plugin: impl Into<PluginId>) -> Self {
		Self {
			plugin: plugin.into(),
			items: Vec::new(),
		}
	}

	pub fn with(mut self, item: AnyRegistrable) -> Self {
		self.items.push(item);
		self
	}

	pub fn push(&mut self, item: AnyRegistrable) {
		self.items.push(item);
	}
}

impl RegistrablesProvider for Registrables {
	fn associated_plugin(&self) -> PluginId {
		self.plugin.clone()
	}

	fn provided_registrables(&self) -> Vec<AnyRegistrable> {
		self.items.clone()
	}
}
