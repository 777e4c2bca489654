//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    TranslationSettings,
};

/// ディレクトリ内で探す設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".po-translate.json";

/// 設定ファイルを読み込み、バリデーションする
///
/// # Arguments
/// * `config_path` - JSON 設定ファイルのパス
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_from_file(config_path: &Path) -> Result<TranslationSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: TranslationSettings = serde_json::from_str(&content)?;
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    Ok(settings)
}

/// ディレクトリから設定を読み込む
///
/// `.po-translate.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込み、パース、またはバリデーションエラー
pub fn load_from_dir(dir: &Path) -> Result<Option<TranslationSettings>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}
