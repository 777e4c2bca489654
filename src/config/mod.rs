//! 翻訳設定の型と読み込み
mod loader;
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_from_dir,
    load_from_file,
};
pub use types::{
    ConfigError,
    DEFAULT_LOAD_TIMEOUT_MS,
    StoreMode,
    TranslationSettings,
    ValidationError,
};
