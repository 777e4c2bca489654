//! Lookup keys for the translation cache.

/// Longest key, in characters, that the cache stores.
pub const MAX_KEY_CHARS: usize = 255;

/// Build the cache key for a source string and optional context.
///
/// The key is `source + ":" + context`, with a missing context treated as
/// empty. Keys longer than [`MAX_KEY_CHARS`] have their source part cut so
/// the whole key fits; if the context alone is too long the key is cut at the
/// limit. Two long sources sharing a prefix can therefore collide.
///
/// # Examples
/// ```
/// use po_translate::catalog::build_key;
///
/// assert_eq!(build_key("Formats", None), "Formats:");
/// assert_eq!(build_key("Formats", Some("menu")), "Formats:menu");
/// ```
#[must_use]
pub fn build_key(source: &str, context: Option<&str>) -> String {
    let context = context.unwrap_or_default();
    let source_chars = source.chars().count();
    let context_chars = context.chars().count();

    if source_chars + 1 + context_chars <= MAX_KEY_CHARS {
        return format!("{source}:{context}");
    }

    let max_source_chars = MAX_KEY_CHARS.saturating_sub(context_chars + 1);
    let truncated: String = source.chars().take(max_source_chars).collect();
    let key = format!("{truncated}:{context}");

    if max_source_chars == 0 { key.chars().take(MAX_KEY_CHARS).collect() } else { key }
}
