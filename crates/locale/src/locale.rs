use serde_json::{Map, Value};

use crate::error::LocaleError;
use crate::messages::Message;

/// Keys accepted for the locale identifier, in lookup order.
pub const IDENTIFIER_KEYS: &[&str] = &["identifier", "id", "localeId", "locale-id", "localeid", "locale", "language", "lang"];

/// Keys accepted for the messages object, in lookup order.
pub const MESSAGES_KEYS: &[&str] = &["messages", "message", "msg", "localeMessages", "locale-messages", "localemessages"];

/// A loaded set of user-facing messages for one language.
///
/// Slots that the source file did not provide read as the empty string; a
/// locale never fails to answer [`Locale::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
	identifier: String,
	messages: Box<[Option<String>]>,
}

/// Result of loading a locale from JSON.
#[derive(Debug)]
pub struct LocaleLoadReport {
	pub locale: Locale,
	/// Scalar keys that matched no message slot, in visit order.
	pub unknown_keys: Vec<String>,
}

impl Locale {
	/// Creates a locale with every slot blank.
	pub fn new(identifier: impl Into<String>) -> Self {
		Self {
			identifier: identifier.into(),
			messages: vec![None; Message::COUNT].into_boxed_slice(),
		}
	}

	/// Returns the locale identifier (e.g. `en_US`).
	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	/// Returns the message for `slot`, or `""` if the locale does not define it.
	#[inline]
	pub fn get(&self, slot: Message) -> &str {
		self.messages[slot.index()].as_deref().unwrap_or("")
	}

	/// Returns true if the locale defines `slot`.
	pub fn is_set(&self, slot: Message) -> bool {
		self.messages[slot.index()].is_some()
	}

	/// Returns a copy of this locale with `slot` set to `value`.
	pub fn with(mut self, slot: Message, value: impl Into<String>) -> Self {
		self.messages[slot.index()] = Some(value.into());
		self
	}

	/// Iterates over the slots this locale leaves blank.
	pub fn missing(&self) -> impl Iterator<Item = Message> + '_ {
		Message::ALL.iter().copied().filter(|slot| !self.is_set(*slot))
	}

	/// Parses a locale from a JSON string. See [`Locale::from_json`].
	pub fn from_json_str(src: &str) -> Result<LocaleLoadReport, LocaleError> {
		let value: Value = serde_json::from_str(src)?;
		Self::from_json(&value)
	}

	/// Builds a locale from an already-parsed JSON document.
	///
	/// The document must be an object carrying an identifier and a messages
	/// object. Messages are walked depth-first: nested objects are descended
	/// into and their scalar entries matched by key alone, arrays and nulls are
	/// skipped. Keys with no matching slot are reported, not rejected.
	pub fn from_json(value: &Value) -> Result<LocaleLoadReport, LocaleError> {
		let root = value.as_object().ok_or(LocaleError::NotAnObject)?;

		let identifier = first_present(root, IDENTIFIER_KEYS)
			.and_then(Value::as_str)
			.ok_or(LocaleError::MissingIdentifier { expected: IDENTIFIER_KEYS })?;

		let messages = first_present(root, MESSAGES_KEYS)
			.and_then(Value::as_object)
			.ok_or_else(|| LocaleError::MissingMessages {
				identifier: identifier.to_string(),
			})?;

		let mut report = LocaleLoadReport {
			locale: Locale::new(identifier),
			unknown_keys: Vec::new(),
		};
		collect_messages(messages, &mut report);

		if !report.unknown_keys.is_empty() {
			tracing::debug!(
				locale = identifier,
				unknown = report.unknown_keys.len(),
				"locale file has keys with no message slot"
			);
		}

		Ok(report)
	}
}

fn first_present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
	keys.iter().find_map(|key| object.get(*key))
}

fn collect_messages(object: &Map<String, Value>, report: &mut LocaleLoadReport) {
	for (key, value) in object {
		let text = match value {
			Value::Object(nested) => {
				collect_messages(nested, report);
				continue;
			}
			Value::Array(_) | Value::Null => continue,
			Value::String(s) => s.clone(),
			Value::Bool(b) => b.to_string(),
			Value::Number(n) => n.to_string(),
		};

		match Message::from_key(key) {
			Some(slot) => report.locale.messages[slot.index()] = Some(text),
			None => report.unknown_keys.push(key.clone()),
		}
	}
}
