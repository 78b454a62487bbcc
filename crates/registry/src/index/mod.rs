//! Alias-indexed registry.
//!
//! Registrables arrive in batches from providers and land in one table per
//! kind. Loaded enchantments and packs live beside them in the same
//! snapshot so that placeholder references can be resolved as soon as the
//! registrable they name shows up.

mod collision;
mod diagnostics;
mod error;
mod runtime;
mod snapshot;
mod store;
mod table;

pub use collision::{Collision, Party, Resolution};
pub use diagnostics::{DiagnosticReport, diagnostics};
pub use error::RegistryError;
pub use runtime::{LoadOutcome, ProvideOutcome, RefreshSummary, Registry, Skipped};
pub use snapshot::Snapshot;

#[cfg(test)]
pub(crate) mod test_fixtures;
