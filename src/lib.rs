//! po-translate
//!
//! Runtime lookup of gettext PO translations with lazy per-language loading,
//! in-memory caching and pseudolocalization.

pub mod catalog;
pub mod config;
pub mod error;
pub mod pseudo;
pub mod translator;

mod test_utils;

pub use error::TranslationError;
pub use pseudo::{
    PSEUDO_LANGUAGE,
    pseudolocalize,
};
pub use translator::{
    Localize,
    Translator,
};
