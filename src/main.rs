//! Command-line lookups against a PO translation directory.

use std::io::{
    self,
    Write,
};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    ValueEnum,
};
use po_translate::Translator;
use po_translate::config::{
    self,
    StoreMode,
    TranslationSettings,
};

/// Translate strings with the PO files of a language directory
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// JSON settings file (lang, poDir, storeMode, loadTimeoutMs)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding one subdirectory of `.po` files per language (overrides config file)
    #[arg(long)]
    po_dir: Option<PathBuf>,

    /// Language code, or `x-pseudo` for pseudolocalization (overrides config file)
    #[arg(long)]
    lang: Option<String>,

    /// How translations are cached (overrides config file)
    #[arg(long, value_enum)]
    store_mode: Option<StoreModeArg>,

    /// msgctxt to look the strings up with
    #[arg(long)]
    context: Option<String>,

    /// Placeholder substitution applied after translation, as TOKEN=VALUE
    #[arg(long = "placeholder", value_parser = parse_placeholder)]
    placeholders: Vec<(String, String)>,

    /// Strings to translate
    #[arg(required = true)]
    strings: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StoreModeArg {
    Memory,
    AlwaysFromFile,
}

impl From<StoreModeArg> for StoreMode {
    fn from(arg: StoreModeArg) -> Self {
        match arg {
            StoreModeArg::Memory => Self::Memory,
            StoreModeArg::AlwaysFromFile => Self::AlwaysFromFile,
        }
    }
}

/// Split `TOKEN=VALUE` at the first `=`.
fn parse_placeholder(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((token, value)) if !token.is_empty() => Ok((token.to_string(), value.to_string())),
        _ => Err(format!("expected TOKEN=VALUE, got '{raw}'")),
    }
}

/// Merge the config file and command-line overrides into validated settings.
fn resolve_settings(args: &Arguments) -> Result<TranslationSettings, String> {
    let mut settings = match &args.config {
        Some(path) => config::load_from_file(path).map_err(|e| e.to_string())?,
        None => {
            if args.po_dir.is_none() || args.lang.is_none() {
                return Err("--po-dir and --lang are required without --config".to_string());
            }
            TranslationSettings::default()
        }
    };

    if let Some(po_dir) = &args.po_dir {
        settings.po_dir.clone_from(po_dir);
    }
    if let Some(lang) = &args.lang {
        settings.lang.clone_from(lang);
    }
    if let Some(store_mode) = args.store_mode {
        settings.store_mode = store_mode.into();
    }

    settings.validate().map_err(|errors| {
        errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
    })?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Arguments::parse();
    let settings = match resolve_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let translator = Translator::with_settings(settings);
    let mut stdout = io::stdout().lock();
    for source in &args.strings {
        let translated = translator
            .t_with_placeholders(
                source,
                args.context.as_deref(),
                args.placeholders.iter().map(|(token, value)| (token, value)),
            )
            .await;
        if let Err(e) = writeln!(stdout, "{translated}") {
            tracing::error!("Failed to write output: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
