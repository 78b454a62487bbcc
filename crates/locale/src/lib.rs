//! Locale message tables.
//!
//! A [`Locale`] is a fixed-size table of message slots declared in
//! [`Message`]. Locale files are JSON documents; [`Locale::from_json`] maps
//! their keys onto slots through the static table, so missing keys leave a slot
//! blank and unknown keys are reported instead of silently matched.
//!
//! ```json
//! {
//!   "identifier": "en_US",
//!   "messages": {
//!     "yes": "yes",
//!     "tokens": { "token-enchantment-chance": "chance" }
//!   }
//! }
//! ```

mod error;
mod locale;
mod messages;
mod store;

pub use error::LocaleError;
pub use locale::{IDENTIFIER_KEYS, Locale, LocaleLoadReport, MESSAGES_KEYS};
pub use messages::Message;
pub use store::LocaleStore;

#[cfg(test)]
mod tests;
