//! Registry diagnostics.
//!
//! Reports alias collisions, table sizes and enchantments that still wait
//! for registrables, so operators can find misconfigured providers and packs.

use underscore_model::{NamespacedKey, RegistrableKind, UndiscoveredRef};

use super::collision::Collision;
use super::runtime::Registry;

/// Report over one registry snapshot.
#[derive(Debug, Clone)]
pub struct DiagnosticReport {
	pub collisions: Vec<Collision>,
	/// Entry count per kind, in [`RegistrableKind::ALL`] order.
	pub counts: Vec<(RegistrableKind, usize)>,
	pub enchantments: usize,
	/// Loaded enchantments with unresolved references.
	pub pending: Vec<(NamespacedKey, Vec<UndiscoveredRef>)>,
}

impl DiagnosticReport {
	pub fn is_clean(&self) -> bool {
		self.collisions.is_empty() && self.pending.is_empty()
	}
}

/// Generates a diagnostic report from the registry's current snapshot.
pub fn diagnostics(registry: &Registry) -> DiagnosticReport {
	let snap = registry.snapshot();

	let pending = snap
		.store
		.all()
		.into_iter()
		.filter_map(|e| {
			let refs = e.undiscovered_refs();
			(!refs.is_empty()).then(|| (e.key().clone(), refs))
		})
		.collect();

	DiagnosticReport {
		collisions: snap.collisions(),
		counts: RegistrableKind::ALL.iter().map(|&kind| (kind, snap.count(kind))).collect(),
		enchantments: snap.enchantment_count(),
		pending,
	}
}
