//! Per-language translation cache with lazy PO import.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use tokio::sync::{
    Mutex,
    RwLock,
};

use super::fs::{
    LocalFileSystem,
    PoFileSystem,
    is_po_file,
};
use super::key::build_key;
use super::po::{
    PoDocument,
    Severity,
    parse_po_bytes,
};
use crate::config::{
    StoreMode,
    TranslationSettings,
};
use crate::error::TranslationError;
use crate::pseudo::{
    PSEUDO_LANGUAGE,
    pseudolocalize,
};

/// Cached translations for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Bucket {
    /// Never imported, or evicted by [`StoreMode::AlwaysFromFile`].
    #[default]
    NotLoaded,
    /// Imported from PO files or filled through `set_t`.
    Loaded(HashMap<String, String>),
}

impl Bucket {
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        match self {
            Self::NotLoaded => None,
            Self::Loaded(translations) => translations.get(key),
        }
    }

    /// Add entries, turning a `NotLoaded` bucket into a loaded one.
    fn extend(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        match self {
            Self::Loaded(translations) => translations.extend(entries),
            Self::NotLoaded => *self = Self::Loaded(entries.into_iter().collect()),
        }
    }
}

/// Translation store shared by every caller of a translator.
///
/// # Locking
///
/// `load_lock` serializes PO imports across all languages. `buckets` is only
/// held for map reads and writes, never across file I/O, so lookups for
/// languages that are already loaded are not blocked by an import.
///
/// In [`StoreMode::AlwaysFromFile`] a hit from another task can evict a bucket
/// right after this task imported it, in which case the lookup reports a miss.
#[derive(Debug)]
pub struct TranslationStore<F = LocalFileSystem> {
    /// Active settings; `None` until the host configures the store
    settings: RwLock<Option<TranslationSettings>>,
    /// Language code → cached translations
    buckets: RwLock<HashMap<String, Bucket>>,
    /// Held for the whole duration of a directory import
    load_lock: Mutex<()>,
    /// Number of directory imports started
    imports: AtomicUsize,
    /// Where PO files are read from
    fs: F,
}

impl TranslationStore<LocalFileSystem> {
    /// Store reading PO files from the local filesystem, without settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_file_system(LocalFileSystem)
    }
}

impl Default for TranslationStore<LocalFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PoFileSystem> TranslationStore<F> {
    #[must_use]
    pub fn with_file_system(fs: F) -> Self {
        Self::build(fs, None)
    }

    /// Store that is usable right away with the given settings.
    #[must_use]
    pub fn configured(fs: F, settings: TranslationSettings) -> Self {
        Self::build(fs, Some(settings))
    }

    fn build(fs: F, settings: Option<TranslationSettings>) -> Self {
        Self {
            settings: RwLock::new(settings),
            buckets: RwLock::new(HashMap::new()),
            load_lock: Mutex::new(()),
            imports: AtomicUsize::new(0),
            fs,
        }
    }

    /// Replace the settings. Cached languages are kept.
    pub async fn configure(&self, settings: TranslationSettings) {
        tracing::debug!(lang = %settings.lang, po_dir = %settings.po_dir.display(), "Configuring translation store");
        *self.settings.write().await = Some(settings);
    }

    pub async fn settings(&self) -> Option<TranslationSettings> {
        self.settings.read().await.clone()
    }

    /// Switch the active language.
    ///
    /// # Errors
    /// `NoSettings` when the store has not been configured.
    pub async fn set_language(&self, lang: impl Into<String>) -> Result<(), TranslationError> {
        let mut settings = self.settings.write().await;
        let settings = settings.as_mut().ok_or(TranslationError::NoSettings)?;
        settings.lang = lang.into();
        Ok(())
    }

    pub async fn language(&self) -> Option<String> {
        self.settings.read().await.as_ref().map(|settings| settings.lang.clone())
    }

    /// Look up `source` in the active language.
    ///
    /// Imports the language's PO files first if it is not loaded yet. A miss
    /// or a timed-out wait for another import returns `source` unchanged.
    ///
    /// # Errors
    /// `NoSettings` when the store has not been configured.
    pub async fn get_t(
        &self,
        source: &str,
        context: Option<&str>,
    ) -> Result<String, TranslationError> {
        let Some(settings) = self.settings().await else {
            tracing::error!("Set settings before attempting translation!");
            return Err(TranslationError::NoSettings);
        };
        let lang = settings.lang.as_str();

        if lang == PSEUDO_LANGUAGE {
            return Ok(pseudolocalize(source));
        }

        let key = build_key(source, context);

        if !self.is_loaded(lang).await {
            let Ok(_guard) =
                tokio::time::timeout(settings.load_timeout(), self.load_lock.lock()).await
            else {
                tracing::warn!(lang, "Timed out attempting to load translations");
                return Ok(source.to_string());
            };
            // Another task may have finished the import while we waited.
            if !self.is_loaded(lang).await {
                self.import_translations(&settings).await;
            }
        }

        let hit = match settings.store_mode {
            StoreMode::Memory => {
                self.buckets.read().await.get(lang).and_then(|bucket| bucket.get(&key)).cloned()
            }
            StoreMode::AlwaysFromFile => {
                let mut buckets = self.buckets.write().await;
                let hit = buckets.get(lang).and_then(|bucket| bucket.get(&key)).cloned();
                if hit.is_some() {
                    buckets.insert(lang.to_string(), Bucket::NotLoaded);
                }
                hit
            }
        };

        Ok(hit.unwrap_or_else(|| {
            tracing::debug!(key = %key, lang, "No translation found");
            source.to_string()
        }))
    }

    /// Store a translation for the active language, replacing any previous
    /// one for the same key.
    ///
    /// # Errors
    /// `NoSettings` when the store has not been configured.
    pub async fn set_t(
        &self,
        source: &str,
        context: Option<&str>,
        translation: impl Into<String>,
    ) -> Result<(), TranslationError> {
        let lang = self.language().await.ok_or(TranslationError::NoSettings)?;
        let key = build_key(source, context);
        self.buckets
            .write()
            .await
            .entry(lang)
            .or_default()
            .extend([(key, translation.into())]);
        Ok(())
    }

    pub async fn is_loaded(&self, lang: &str) -> bool {
        self.buckets.read().await.get(lang).is_some_and(Bucket::is_loaded)
    }

    /// Codes of the languages currently loaded, sorted.
    pub async fn loaded_languages(&self) -> Vec<String> {
        let buckets = self.buckets.read().await;
        let mut languages: Vec<String> = buckets
            .iter()
            .filter(|(_, bucket)| bucket.is_loaded())
            .map(|(lang, _)| lang.clone())
            .collect();
        languages.sort();
        languages
    }

    /// Drop every cached language so the next lookups import again.
    pub async fn clear(&self) {
        self.buckets.write().await.clear();
    }

    /// Number of directory imports started so far.
    #[must_use]
    pub fn import_count(&self) -> usize {
        self.imports.load(Ordering::SeqCst)
    }

    /// Parse every `.po` file of the settings' language and merge the result
    /// into its bucket. An import that yields no entries leaves the language
    /// unloaded, so the next lookup scans the directory again.
    async fn import_translations(&self, settings: &TranslationSettings) {
        self.imports.fetch_add(1, Ordering::SeqCst);
        let lang = settings.lang.as_str();
        let lang_dir = settings.po_dir.join(lang);

        let imported = self.read_language_dir(&lang_dir).await;
        if imported.is_empty() {
            tracing::debug!(lang, "No translations imported");
            return;
        }
        tracing::debug!(lang, entries = imported.len(), "Imported translations");

        self.buckets
            .write()
            .await
            .entry(lang.to_string())
            .or_default()
            .extend(imported);
    }

    async fn read_language_dir(&self, lang_dir: &Path) -> HashMap<String, String> {
        let mut imported = HashMap::new();

        if !self.fs.is_dir(lang_dir).await {
            tracing::error!(
                "PO language directory {} is not a directory or not readable.",
                lang_dir.display()
            );
            return imported;
        }

        let files: Vec<PathBuf> = match self.fs.list_dir(lang_dir).await {
            Ok(paths) => paths.into_iter().filter(|path| is_po_file(path)).collect(),
            Err(e) => {
                tracing::error!("Failed to list PO directory {}: {}", lang_dir.display(), e);
                return imported;
            }
        };

        let documents =
            futures::future::join_all(files.iter().map(|path| self.load_po_file(path))).await;

        for document in documents.into_iter().flatten() {
            for entry in document.entries {
                imported
                    .insert(build_key(&entry.source, entry.context.as_deref()), entry.translation);
            }
        }

        imported
    }

    async fn load_po_file(&self, path: &Path) -> Option<PoDocument> {
        let bytes = match self.fs.read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Couldn't read PO file {}; skipping: {}", path.display(), e);
                return None;
            }
        };

        tracing::info!("Parsing PO file {}.", path.display());
        let document = parse_po_bytes(&bytes);
        for diagnostic in &document.diagnostics {
            match diagnostic.severity {
                Severity::Warning => tracing::warn!("{diagnostic} of PO file {}", path.display()),
                Severity::Error => tracing::error!("{diagnostic} of PO file {}", path.display()),
            }
        }
        Some(document)
    }
}
