//! Public lookup entry point.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use crate::catalog::{
    LocalFileSystem,
    PoFileSystem,
    TranslationStore,
};
use crate::config::{
    self,
    ConfigError,
    TranslationSettings,
};
use crate::error::TranslationError;
use crate::pseudo::{
    PSEUDO_LANGUAGE,
    pseudolocalize,
};

/// Translation context owned by the host application.
///
/// Cloning is cheap and every clone shares the same settings and cache, so a
/// single translator can be handed to all request handlers.
#[derive(Debug)]
pub struct Translator<F = LocalFileSystem> {
    store: Arc<TranslationStore<F>>,
}

impl<F> Clone for Translator<F> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl Translator<LocalFileSystem> {
    /// Translator without settings; every lookup returns its input until
    /// [`Translator::configure`] is called.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(TranslationStore::new())
    }

    #[must_use]
    pub fn with_settings(settings: TranslationSettings) -> Self {
        Self::with_store(TranslationStore::configured(LocalFileSystem, settings))
    }

    /// Load settings from a JSON configuration file.
    ///
    /// # Errors
    /// `Config` when the file cannot be read, is not valid JSON or fails
    /// validation.
    pub fn from_config_file(path: &Path) -> Result<Self, TranslationError> {
        let settings = config::load_from_file(path)?;
        Ok(Self::with_settings(settings))
    }
}

impl Default for Translator<LocalFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PoFileSystem> Translator<F> {
    #[must_use]
    pub fn with_store(store: TranslationStore<F>) -> Self {
        Self { store: Arc::new(store) }
    }

    #[must_use]
    pub fn store(&self) -> &TranslationStore<F> {
        &self.store
    }

    /// Validate and install new settings.
    ///
    /// # Errors
    /// `Config` when the settings fail validation; the previous settings stay.
    pub async fn configure(&self, settings: TranslationSettings) -> Result<(), TranslationError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        self.store.configure(settings).await;
        Ok(())
    }

    pub async fn settings(&self) -> Option<TranslationSettings> {
        self.store.settings().await
    }

    /// # Errors
    /// `NoSettings` when the translator has not been configured.
    pub async fn set_language(&self, lang: impl Into<String>) -> Result<(), TranslationError> {
        self.store.set_language(lang).await
    }

    pub async fn language(&self) -> Option<String> {
        self.store.language().await
    }

    /// Translate `source`, returning it unchanged when no translation exists
    /// or the translator is not configured.
    pub async fn t(&self, source: &str, context: Option<&str>) -> String {
        self.t_with_placeholders(source, context, std::iter::empty::<(&str, &str)>()).await
    }

    /// Translate `source`, then replace every occurrence of each placeholder
    /// token in the result. Pairs are applied in iteration order.
    ///
    /// Pseudolocalized output is returned as is.
    pub async fn t_with_placeholders<I, K, V>(
        &self,
        source: &str,
        context: Option<&str>,
        placeholders: I,
    ) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if self.language().await.as_deref() == Some(PSEUDO_LANGUAGE) {
            return pseudolocalize(source);
        }

        // The store logs the missing settings.
        match self.store.get_t(source, context).await {
            Ok(translated) => apply_placeholders(translated, placeholders),
            Err(_) => source.to_string(),
        }
    }

    /// Register a translation for the active language.
    ///
    /// # Errors
    /// `NoSettings` when the translator has not been configured.
    pub async fn set_t(
        &self,
        source: &str,
        context: Option<&str>,
        translation: impl Into<String>,
    ) -> Result<(), TranslationError> {
        self.store.set_t(source, context, translation).await
    }
}

fn apply_placeholders<I, K, V>(text: String, placeholders: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    placeholders.into_iter().fold(text, |text, (token, value)| {
        let token = token.as_ref();
        if token.is_empty() { text } else { text.replace(token, value.as_ref()) }
    })
}

/// `"Formats".localize(&translator, None).await` style lookups.
pub trait Localize {
    fn localize<F: PoFileSystem>(
        &self,
        translator: &Translator<F>,
        context: Option<&str>,
    ) -> impl Future<Output = String>;
}

impl Localize for str {
    async fn localize<F: PoFileSystem>(
        &self,
        translator: &Translator<F>,
        context: Option<&str>,
    ) -> String {
        translator.t(self, context).await
    }
}
