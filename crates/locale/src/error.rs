/// Errors produced while loading or selecting locales.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
	#[error("locale document is not a JSON object")]
	NotAnObject,

	#[error("locale document has no identifier (expected one of {expected:?})")]
	MissingIdentifier { expected: &'static [&'static str] },

	#[error("locale '{identifier}' has no messages object")]
	MissingMessages { identifier: String },

	#[error("unknown locale: {0}")]
	UnknownLocale(String),

	#[error("invalid locale json: {0}")]
	Json(#[from] serde_json::Error),
}
