use underscore_model::PluginId;

/// Registry error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// The provider's plugin is not enabled; nothing it offered was registered.
	#[error("provider rejected: plugin '{plugin}' is not enabled")]
	ProviderRejected { plugin: PluginId },
}
