//! Validated enchantment value objects.
//!
//! # Role
//!
//! An enchantment definition is parsed elsewhere and assembled from these
//! types. Each type checks its invariants in its constructor and is immutable
//! afterwards; reload replaces values wholesale.
//!
//! # Invariants
//!
//! - Chances lie in `0.0..=100.0`.
//! - Delays and cooldowns are never negative.
//! - Level numbers are strictly positive.

mod action;
mod condition;
mod enchantment;
mod level;
mod pack;
mod required;
mod restriction;

pub use action::EnchantmentAction;
pub use condition::EnchantmentCondition;
pub use enchantment::{Enchantment, EnchantmentBuilder};
pub use level::EnchantmentLevel;
pub use pack::{EnchantmentPack, EnchantmentPackMetadata, EnchantmentPackMetadataBuilder};
pub use required::{RequiredEnchantment, RequiredPlugin};
pub use restriction::{EnchantmentObtainmentRestriction, MAX_LEVEL_SPAN};

use std::sync::Arc;

use crate::registrable::Registrable;

/// Primary alias of a shared registrable, or `?` when it has none.
pub(crate) fn alias_of<T: Registrable + ?Sized>(item: &Arc<T>) -> &str {
	item.primary_alias().unwrap_or("?")
}
