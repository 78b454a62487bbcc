//! Enchantment data model.
//!
//! Capability traits for the seven kinds of registrable extension objects,
//! the host-facing types they exchange with the server, and the validated
//! value objects an enchantment is assembled from.
//!
//! ```
//! use underscore_model::{EnchantmentObtainmentMeans, EnchantmentObtainmentRestriction};
//!
//! let restriction = EnchantmentObtainmentRestriction::parse(EnchantmentObtainmentMeans::Trades, "1-3, 5").unwrap();
//! assert_eq!(restriction.levels(), &[1, 2, 3, 5]);
//! ```

mod data;
mod describe;
mod error;
mod host;
mod key;
mod registrable;
mod time;

pub use data::{
	Enchantment, EnchantmentAction, EnchantmentBuilder, EnchantmentCondition, EnchantmentLevel,
	EnchantmentObtainmentRestriction, EnchantmentPack, EnchantmentPackMetadata, EnchantmentPackMetadataBuilder,
	MAX_LEVEL_SPAN, RequiredEnchantment, RequiredPlugin,
};
pub use describe::{Describe, describe, describe_shortly};
pub use error::{Result, ValidationError};
pub use host::{
	DataRetrievalType, EnchantmentObtainmentMeans, EnchantmentUnloadResponse, Event, EventModifications,
	EventModificationsBuilder, ItemStack, Material, PlayerId, TargetType, TriggerDataHolder,
};
pub use key::{NamespacedKey, PluginId};
pub use registrable::{
	AnyRegistrable, Registrable, RegistrableAction, RegistrableActivationIndicator, RegistrableApplicable,
	RegistrableCondition, RegistrableEnchantmentSeeker, RegistrableKind, RegistrableLookup, RegistrablePlaceholder,
	RegistrableTrigger, Undiscovered, UndiscoveredRef, address_of,
};
pub use time::{TICKS_PER_SECOND, Time};
