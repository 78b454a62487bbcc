//! Static message slot table.
//!
//! # Role
//!
//! Every user-facing message a locale can carry is declared once here with its
//! JSON key. Locale files are matched against this table instead of against
//! struct field names, so a renamed or missing key is an explicit lookup miss.
//!
//! # Invariants
//!
//! - `Message as usize` is a dense index in `0..Message::COUNT`.
//! - Keys are unique after normalization (see [`normalize_key`]).

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

macro_rules! define_messages {
	(
		$(
			$(#[$attr:meta])*
			$variant:ident => $key:literal,
		)*
	) => {
		/// A message slot in a [`crate::Locale`].
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum Message {
			$( $(#[$attr])* $variant, )*
		}

		impl Message {
			/// Every declared slot in declaration order.
			pub const ALL: &'static [Message] = &[ $( Message::$variant, )* ];

			/// Number of declared slots.
			pub const COUNT: usize = Self::ALL.len();

			/// The canonical (kebab-case) JSON key for this slot.
			pub const fn key(self) -> &'static str {
				match self {
					$( Message::$variant => $key, )*
				}
			}
		}
	};
}

define_messages! {
	/// The word "yes".
	Yes => "yes",
	/// The word "no".
	No => "no",
	NoPermissions => "no-permissions",
	NotForConsole => "not-for-console",
	PlayerNotFound => "player-not-found",
	InvalidEnchantmentName => "invalid-enchantment-name",
	InvalidEnchantmentLevel => "invalid-enchantment-level",
	InvalidParameter => "invalid-parameter",
	EnchantmentLevelOutOfBounds => "enchantment-level-out-of-bounds",
	/// An alias was already bound by another plugin.
	AlreadyRegistered => "already-registered",
	LoadedEnchantment => "loaded-enchantment",
	LoadedPack => "loaded-pack",
	FailedToLoadEnchantment => "failed-to-load-enchantment",
	FailedToLoadPack => "failed-to-load-pack",
	UnloadedEnchantment => "unloaded-enchantment",
	UnloadedPack => "unloaded-pack",
	UnloadEnchantmentNotFound => "unload-enchantment-not-found",
	UnloadPackNotFound => "unload-pack-not-found",
	ToggledEnchantment => "toggled-enchantment",
	StateOn => "state-on",
	StateOff => "state-off",
	ChangedLocale => "changed-locale",
	CantChangeLocale => "cant-change-locale",
	NoSuchLocale => "no-such-locale",
	Reloaded => "reloaded",

	LogTokenRegistry => "log-token-registry",
	LogTokenRegistryActionSingular => "log-token-registry-action-singular",
	LogTokenRegistryActionPlural => "log-token-registry-action-plural",
	LogTokenRegistryApplicableSingular => "log-token-registry-applicable-singular",
	LogTokenRegistryApplicablePlural => "log-token-registry-applicable-plural",
	LogTokenRegistryConditionSingular => "log-token-registry-condition-singular",
	LogTokenRegistryConditionPlural => "log-token-registry-condition-plural",
	LogTokenRegistryIndicatorSingular => "log-token-registry-indicator-singular",
	LogTokenRegistryIndicatorPlural => "log-token-registry-indicator-plural",
	LogTokenRegistryPlaceholderSingular => "log-token-registry-placeholder-singular",
	LogTokenRegistryPlaceholderPlural => "log-token-registry-placeholder-plural",
	LogTokenRegistrySeekerSingular => "log-token-registry-seeker-singular",
	LogTokenRegistrySeekerPlural => "log-token-registry-seeker-plural",
	LogTokenRegistryTriggerSingular => "log-token-registry-trigger-singular",
	LogTokenRegistryTriggerPlural => "log-token-registry-trigger-plural",
	LogTokenRegistryLoaded => "log-token-registry-loaded",
	LogTokenRegistryProvider => "log-token-registry-provider",
	LogTokenEnchantments => "log-token-enchantments",
	LogTokenEnchantmentsLoaded => "log-token-enchantments-loaded",

	/// Tokens used when describing enchantments for debugging.
	TokenEnchantment => "token-enchantment",
	TokenEnchantmentChance => "token-enchantment-chance",
	TokenEnchantmentIndicator => "token-enchantment-indicator",
	TokenEnchantmentApplicables => "token-enchantment-applicables",
	TokenEnchantmentAuthor => "token-enchantment-author",
	TokenEnchantmentConditions => "token-enchantment-conditions",
	TokenEnchantmentConflicts => "token-enchantment-conflicts",
	TokenEnchantmentCooldown => "token-enchantment-cooldown",
	TokenEnchantmentDescription => "token-enchantment-description",
	TokenEnchantmentForbidden => "token-enchantment-forbidden",
	TokenEnchantmentUnique => "token-enchantment-unique",
	TokenEnchantmentLevels => "token-enchantment-levels",
	TokenEnchantmentNegated => "token-enchantment-negated",
	TokenEnchantmentActions => "token-enchantment-actions",
	TokenEnchantmentRestrictions => "token-enchantment-restrictions",
	TokenEnchantmentRequired => "token-enchantment-required",
	TokenEnchantmentSeekers => "token-enchantment-seekers",
	TokenEnchantmentTrigger => "token-enchantment-trigger",
	TokenEnchantmentWhitelist => "token-enchantment-whitelist",
	TokenEnchantmentBlacklist => "token-enchantment-blacklist",
	TokenEnchantmentRequiredPluginLink => "token-enchantment-required-plugin-link",
	TokenEnchantmentBy => "token-enchantment-by",
	TokenEnchantments => "token-enchantments",
}

impl Message {
	/// Dense slot index.
	#[inline]
	pub const fn index(self) -> usize {
		self as usize
	}

	/// Resolves a locale-file key to its slot.
	///
	/// Both `kebab-case` and `camelCase` spellings of a key resolve to the same
	/// slot; anything else returns `None`.
	pub fn from_key(key: &str) -> Option<Message> {
		static BY_KEY: LazyLock<FxHashMap<String, Message>> = LazyLock::new(|| {
			Message::ALL
				.iter()
				.map(|&message| (normalize_key(message.key()), message))
				.collect()
		});

		BY_KEY.get(&normalize_key(key)).copied()
	}
}

impl std::fmt::Display for Message {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.key())
	}
}

/// Folds a key so that `token-enchantment-chance`, `token_enchantment_chance`
/// and `tokenEnchantmentChance` compare equal.
pub(crate) fn normalize_key(key: &str) -> String {
	key.chars()
		.filter(|c| *c != '-' && *c != '_')
		.flat_map(char::to_lowercase)
		.collect()
}
