use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the translation store.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Lookup attempted before any settings were configured
    #[error("Set settings before attempting translation")]
    NoSettings,
    /// Settings could not be loaded or failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),
}
