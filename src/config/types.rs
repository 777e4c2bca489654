use std::path::PathBuf;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Default bounded wait for the PO load lock.
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 5_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "poDir")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How translations are kept between lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreMode {
    /// Re-read the PO files after every hit. Meant for editing PO files
    /// while the host is running, not for production.
    AlwaysFromFile,
    /// Parse once per language and keep the result in memory.
    #[default]
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationSettings {
    /// Active language code. Switched at runtime through the translator.
    pub lang: String,

    /// Directory holding one subdirectory of `.po` files per language.
    pub po_dir: PathBuf,

    pub store_mode: StoreMode,

    /// How long a lookup waits for another task's PO import before giving up.
    pub load_timeout_ms: u64,
}

impl TranslationSettings {
    #[must_use]
    pub fn new(lang: impl Into<String>, po_dir: impl Into<PathBuf>) -> Self {
        Self { lang: lang.into(), po_dir: po_dir.into(), ..Self::default() }
    }

    #[must_use]
    pub const fn with_store_mode(mut self, store_mode: StoreMode) -> Self {
        self.store_mode = store_mode;
        self
    }

    #[must_use]
    pub const fn with_load_timeout(mut self, timeout_ms: u64) -> Self {
        self.load_timeout_ms = timeout_ms;
        self
    }

    #[must_use]
    pub const fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    /// # Errors
    /// - Required field is empty
    /// - Zero load timeout
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.lang.trim().is_empty() {
            errors.push(ValidationError::new(
                "lang",
                "The language code cannot be empty. Example: \"fr\" or \"x-pseudo\"",
            ));
        }

        if self.po_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "poDir",
                "The PO directory cannot be empty. Example: \"translations\"",
            ));
        }

        if self.load_timeout_ms == 0 {
            errors.push(ValidationError::new(
                "loadTimeoutMs",
                "The load timeout must be greater than zero",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            po_dir: PathBuf::from("translations"),
            store_mode: StoreMode::default(),
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
        }
    }
}
