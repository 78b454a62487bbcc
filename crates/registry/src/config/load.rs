//! Settings file loading.

use std::path::{Path, PathBuf};

use super::{ConfigError, ConfigWarning, Settings};

/// File name looked up in the settings directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Result of loading settings from disk.
#[derive(Debug, Default)]
pub struct ConfigLoadReport {
	/// Parsed settings if the file existed and was valid.
	pub settings: Option<Settings>,
	/// Non-fatal parse warnings keyed by source file path.
	pub warnings: Vec<(PathBuf, ConfigWarning)>,
	/// File read or parse errors keyed by source file path.
	pub errors: Vec<(PathBuf, ConfigError)>,
}

impl ConfigLoadReport {
	/// The loaded settings, or defaults when nothing usable was found.
	pub fn settings_or_default(&self) -> Settings {
		self.settings.clone().unwrap_or_default()
	}
}

/// Loads `settings.toml` from `dir`. A missing file is not an error.
pub fn load_settings_from_dir(dir: &Path) -> ConfigLoadReport {
	let mut report = ConfigLoadReport::default();
	let path = dir.join(SETTINGS_FILE);
	if !path.exists() {
		tracing::debug!(path = %path.display(), "no settings file, using defaults");
		return report;
	}

	let content = match std::fs::read_to_string(&path) {
		Ok(content) => content,
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "failed to read settings");
			report.errors.push((path, ConfigError::Io(error)));
			return report;
		}
	};

	match Settings::from_toml_str(&content) {
		Ok(mut settings) => {
			for warning in settings.warnings.drain(..) {
				tracing::warn!(path = %path.display(), %warning, "settings warning");
				report.warnings.push((path.clone(), warning));
			}
			report.settings = Some(settings);
		}
		Err(error) => {
			tracing::warn!(path = %path.display(), %error, "failed to parse settings");
			report.errors.push((path, error));
		}
	}

	report
}
