//! PO catalogs: key building, parsing, file access and the cache.
mod fs;
mod key;
mod po;
mod store;

pub use fs::{
    LocalFileSystem,
    PoFileSystem,
    is_po_file,
};
pub use key::{
    MAX_KEY_CHARS,
    build_key,
};
pub use po::{
    DiagnosticKind,
    PoDiagnostic,
    PoDocument,
    PoEntry,
    Severity,
    parse_po,
    parse_po_bytes,
};
pub use store::{
    Bucket,
    TranslationStore,
};
