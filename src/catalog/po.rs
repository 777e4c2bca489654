//! Parser for the subset of the gettext PO format used by the store.
//!
//! A file is a list of sections separated by a blank line. Each section holds
//! an optional `msgctxt`, a `msgid` and a `msgstr`. Bare quoted continuation
//! lines always extend `msgstr`. Values are kept verbatim.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// `msgid "..."`, `msgstr "..."` or `msgctxt "..."` on a single line.
#[allow(clippy::expect_used)]
static DIRECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^msg(id|str|ctxt) "(.*)"$"#).expect("directive pattern is valid")
});

/// A bare quoted string continuing `msgstr`.
#[allow(clippy::expect_used)]
static CONTINUATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"(.*)"$"#).expect("continuation pattern is valid")
});

/// One translation parsed from a PO section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoEntry {
    pub source: String,
    pub context: Option<String>,
    pub translation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A line that is neither a directive, a continuation nor a comment.
    UnparsableLine(String),
    /// A continuation line before any `msgstr` directive in its section; it
    /// is taken as the start of `msgstr`.
    PrematureContinuation,
    MissingMsgid,
    MissingMsgstr,
    InvalidUtf8,
}

/// A problem found while parsing. None of them abort the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoDiagnostic {
    pub severity: Severity,
    /// 0-based index of the blank-line separated section.
    pub section: usize,
    pub kind: DiagnosticKind,
}

impl PoDiagnostic {
    const fn warning(section: usize, kind: DiagnosticKind) -> Self {
        Self { severity: Severity::Warning, section, kind }
    }

    const fn error(section: usize, kind: DiagnosticKind) -> Self {
        Self { severity: Severity::Error, section, kind }
    }
}

impl fmt::Display for PoDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let section = self.section;
        match &self.kind {
            DiagnosticKind::UnparsableLine(line) => {
                write!(f, "Unparsable line \"{line}\" in section {section}")
            }
            DiagnosticKind::PrematureContinuation => write!(
                f,
                "Continuation line before any msgstr definition in section {section} (accepting it as a msgstr anyway)"
            ),
            DiagnosticKind::MissingMsgid => {
                write!(f, "Could not find msgid in section {section}; skipping")
            }
            DiagnosticKind::MissingMsgstr => {
                write!(f, "Could not find msgstr in section {section}; skipping")
            }
            DiagnosticKind::InvalidUtf8 => write!(f, "File is not valid UTF-8"),
        }
    }
}

/// Result of parsing one PO file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoDocument {
    pub entries: Vec<PoEntry>,
    pub diagnostics: Vec<PoDiagnostic>,
}

/// Field named by a directive line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Str,
    Ctxt,
}

/// Fields collected while scanning one section.
#[derive(Debug, Default)]
struct SectionState {
    msgid: Option<String>,
    msgstr: Option<String>,
    msgctxt: Option<String>,
    /// A `msgstr` directive was seen, even one with an empty value.
    msgstr_seen: bool,
}

impl SectionState {
    /// An empty directive value leaves the field unset so that continuation
    /// lines can supply it.
    fn set(&mut self, field: Field, value: &str) {
        if field == Field::Str {
            self.msgstr_seen = true;
        }
        if value.is_empty() {
            return;
        }
        let slot = match field {
            Field::Id => &mut self.msgid,
            Field::Str => &mut self.msgstr,
            Field::Ctxt => &mut self.msgctxt,
        };
        *slot = Some(value.to_string());
    }

    /// Append a continuation value to `msgstr`. Returns `false` when the
    /// value had to start `msgstr` because no `msgstr` directive preceded it.
    fn continue_msgstr(&mut self, value: &str) -> bool {
        let expected = self.msgstr_seen || self.msgstr.is_some();
        self.msgstr.get_or_insert_with(String::new).push_str(value);
        expected
    }
}

/// Parse raw file contents, rejecting anything that is not UTF-8.
#[must_use]
pub fn parse_po_bytes(bytes: &[u8]) -> PoDocument {
    std::str::from_utf8(bytes).map_or_else(
        |_| PoDocument {
            entries: Vec::new(),
            diagnostics: vec![PoDiagnostic::error(0, DiagnosticKind::InvalidUtf8)],
        },
        parse_po,
    )
}

/// Parse PO text into entries plus diagnostics.
///
/// # Examples
/// ```
/// use po_translate::catalog::parse_po;
///
/// let doc = parse_po("msgid \"Formats\"\nmsgstr \"Mise en forme\"\n");
/// assert_eq!(doc.entries.len(), 1);
/// assert_eq!(doc.entries[0].translation, "Mise en forme");
/// ```
#[must_use]
pub fn parse_po(text: &str) -> PoDocument {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut document = PoDocument::default();

    for (index, section) in normalized.split("\n\n").enumerate() {
        if section.trim().is_empty() {
            continue;
        }
        if let Some(entry) = parse_section(index, section, &mut document.diagnostics) {
            document.entries.push(entry);
        }
    }

    document
}

fn parse_section(
    index: usize,
    section: &str,
    diagnostics: &mut Vec<PoDiagnostic>,
) -> Option<PoEntry> {
    let mut state = SectionState::default();

    for line in section.split('\n') {
        if let Some(captures) = DIRECTIVE_PATTERN.captures(line) {
            let field = match captures.get(1).map(|m| m.as_str()) {
                Some("id") => Field::Id,
                Some("str") => Field::Str,
                _ => Field::Ctxt,
            };
            let value = captures.get(2).map_or("", |m| m.as_str());
            state.set(field, value);
        } else if let Some(captures) = CONTINUATION_PATTERN.captures(line) {
            let value = captures.get(1).map_or("", |m| m.as_str());
            if !state.continue_msgstr(value) {
                diagnostics
                    .push(PoDiagnostic::warning(index, DiagnosticKind::PrematureContinuation));
            }
        } else if line.starts_with('#') || line.trim().is_empty() {
            continue;
        } else {
            diagnostics.push(PoDiagnostic::warning(
                index,
                DiagnosticKind::UnparsableLine(line.to_string()),
            ));
        }
    }

    let Some(source) = state.msgid else {
        diagnostics.push(PoDiagnostic::error(index, DiagnosticKind::MissingMsgid));
        return None;
    };
    let Some(translation) = state.msgstr else {
        diagnostics.push(PoDiagnostic::error(index, DiagnosticKind::MissingMsgstr));
        return None;
    };

    Some(PoEntry { source, context: state.msgctxt, translation })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[googletest::test]
    fn parses_entry_without_context() {
        let doc = parse_po("msgid \"Formats\"\nmsgstr \"Mise en forme\"\n");

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].source, eq("Formats"));
        expect_that!(doc.entries[0].translation, eq("Mise en forme"));
        expect_that!(doc.entries[0].context.is_none(), eq(true));
        expect_that!(doc.diagnostics, is_empty());
    }

    #[googletest::test]
    fn parses_entry_with_context() {
        let text = concat!(
            "#: shells.src#STR_REDLINE_TITLE.string.text\n",
            "msgctxt \"shells.src#STR_REDLINE_TITLE.string.text\"\n",
            "msgid \"AutoCorrect\"\n",
            "msgstr \"AutoCorrection\"\n",
        );

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(
            doc.entries[0].context.as_deref(),
            some(eq("shells.src#STR_REDLINE_TITLE.string.text"))
        );
        expect_that!(doc.entries[0].translation, eq("AutoCorrection"));
        expect_that!(doc.diagnostics, is_empty());
    }

    #[googletest::test]
    fn splits_sections_on_blank_lines() {
        let text = "msgid \"Save\"\nmsgstr \"Enregistrer\"\n\nmsgid \"Open\"\nmsgstr \"Ouvrir\"\n";

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(2));
        expect_that!(doc.entries[0].source, eq("Save"));
        expect_that!(doc.entries[1].source, eq("Open"));
        expect_that!(doc.entries[1].translation, eq("Ouvrir"));
    }

    #[rstest]
    #[case::crlf("msgid \"Save\"\r\nmsgstr \"Enregistrer\"\r\n\r\nmsgid \"Open\"\r\nmsgstr \"Ouvrir\"\r\n")]
    #[case::cr("msgid \"Save\"\rmsgstr \"Enregistrer\"\r\rmsgid \"Open\"\rmsgstr \"Ouvrir\"\r")]
    fn normalizes_line_endings(#[case] text: &str) {
        let doc = parse_po(text);

        assert_eq!(doc.entries.len(), 2);
        assert_eq!(doc.entries[0].translation, "Enregistrer");
        assert_eq!(doc.entries[1].translation, "Ouvrir");
        assert!(doc.diagnostics.is_empty());
    }

    #[googletest::test]
    fn continuation_lines_extend_msgstr() {
        let text = concat!(
            "msgid \"Hello World\"\n",
            "msgstr \"Bonjour \"\n",
            "\"le \"\n",
            "\"monde\"\n",
        );

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].source, eq("Hello World"));
        expect_that!(doc.entries[0].translation, eq("Bonjour le monde"));
        expect_that!(doc.diagnostics, is_empty());
    }

    #[googletest::test]
    fn continuation_after_msgid_goes_to_msgstr_with_warning() {
        let doc = parse_po("msgid \"Hello\"\n\" World\"\nmsgstr \"Bonjour\"\n");

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].source, eq("Hello"));
        expect_that!(doc.entries[0].translation, eq("Bonjour"));
        assert_eq!(
            doc.diagnostics,
            vec![PoDiagnostic::warning(0, DiagnosticKind::PrematureContinuation)]
        );
    }

    #[googletest::test]
    fn continuation_without_msgstr_becomes_translation() {
        let doc = parse_po("msgid \"Hello\"\n\"Bonjour\"\n\" le monde\"\n");

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].translation, eq("Bonjour le monde"));
        assert_eq!(
            doc.diagnostics,
            vec![PoDiagnostic::warning(0, DiagnosticKind::PrematureContinuation)]
        );
    }

    #[googletest::test]
    fn multiline_msgid_is_not_supported() {
        let doc = parse_po("msgid \"\"\n\"Hello\"\nmsgstr \"Bonjour\"\n");

        expect_that!(doc.entries, is_empty());
        assert_eq!(
            doc.diagnostics,
            vec![
                PoDiagnostic::warning(0, DiagnosticKind::PrematureContinuation),
                PoDiagnostic::error(0, DiagnosticKind::MissingMsgid),
            ]
        );
    }

    #[googletest::test]
    fn empty_msgstr_is_filled_by_continuation() {
        let text = "msgid \"%PRODUCTNAME Calendar\"\nmsgstr \"\"\n\"%PRODUCTNAME カレンダー\"\n";

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].translation, eq("%PRODUCTNAME カレンダー"));
        expect_that!(doc.diagnostics, is_empty());
    }

    #[googletest::test]
    fn premature_continuation_starts_msgstr_with_warning() {
        let text = "\"Bonjour\"\nmsgid \"Hello\"\n";

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].source, eq("Hello"));
        expect_that!(doc.entries[0].translation, eq("Bonjour"));
        assert_eq!(
            doc.diagnostics,
            vec![PoDiagnostic::warning(0, DiagnosticKind::PrematureContinuation)]
        );
    }

    #[googletest::test]
    fn missing_msgid_skips_section() {
        let text = "msgstr \"Orphan\"\n\nmsgid \"Open\"\nmsgstr \"Ouvrir\"\n";

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].source, eq("Open"));
        assert_eq!(doc.diagnostics, vec![PoDiagnostic::error(0, DiagnosticKind::MissingMsgid)]);
    }

    #[googletest::test]
    fn missing_msgstr_skips_section() {
        let text = "msgid \"Open\"\n\nmsgid \"Save\"\nmsgstr \"Enregistrer\"\n";

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].source, eq("Save"));
        assert_eq!(doc.diagnostics, vec![PoDiagnostic::error(0, DiagnosticKind::MissingMsgstr)]);
    }

    #[googletest::test]
    fn header_section_is_reported_and_skipped() {
        let text = concat!(
            "msgid \"\"\n",
            "msgstr \"\"\n",
            "\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
            "\n",
            "msgid \"Formats\"\n",
            "msgstr \"属性\"\n",
        );

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].translation, eq("属性"));
        assert_eq!(doc.diagnostics, vec![PoDiagnostic::error(0, DiagnosticKind::MissingMsgid)]);
    }

    #[googletest::test]
    fn unparsable_lines_are_warned_and_skipped() {
        let text = "msgid \"Save\"\nmsgid_plural \"Saves\"\nmsgstr \"Enregistrer\"\n";

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.entries[0].translation, eq("Enregistrer"));
        assert_eq!(
            doc.diagnostics,
            vec![PoDiagnostic::warning(
                0,
                DiagnosticKind::UnparsableLine("msgid_plural \"Saves\"".to_string())
            )]
        );
    }

    #[googletest::test]
    fn comments_and_extra_blank_lines_are_ignored() {
        let text = "# Translator comment\n#, fuzzy\nmsgid \"Save\"\nmsgstr \"Enregistrer\"\n\n\n\n";

        let doc = parse_po(text);

        expect_that!(doc.entries.len(), eq(1));
        expect_that!(doc.diagnostics, is_empty());
    }

    #[googletest::test]
    fn values_are_kept_verbatim() {
        let doc = parse_po("msgid \"Line\\nBreak \\\"quoted\\\"\"\nmsgstr \"Ligne\\n\"\n");

        expect_that!(doc.entries[0].source, eq("Line\\nBreak \\\"quoted\\\""));
        expect_that!(doc.entries[0].translation, eq("Ligne\\n"));
    }

    #[googletest::test]
    fn later_directive_overwrites_earlier_value() {
        let doc = parse_po("msgid \"Save\"\nmsgstr \"Sauver\"\nmsgstr \"Enregistrer\"\n");

        expect_that!(doc.entries[0].translation, eq("Enregistrer"));
    }

    #[googletest::test]
    fn invalid_utf8_yields_error() {
        let doc = parse_po_bytes(&[0x6d, 0x73, 0x67, 0xff, 0xfe]);

        expect_that!(doc.entries, is_empty());
        assert_eq!(doc.diagnostics, vec![PoDiagnostic::error(0, DiagnosticKind::InvalidUtf8)]);
    }

    #[googletest::test]
    fn diagnostic_messages_name_the_section() {
        let diagnostic = PoDiagnostic::error(3, DiagnosticKind::MissingMsgstr);

        expect_that!(diagnostic.to_string(), contains_substring("section 3"));
        expect_that!(diagnostic.to_string(), contains_substring("msgstr"));
    }
}
