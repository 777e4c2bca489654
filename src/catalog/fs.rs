//! Filesystem access needed by the PO import.

use std::future::Future;
use std::io;
use std::path::{
    Path,
    PathBuf,
};

/// The three filesystem operations the store relies on.
///
/// Implemented by [`LocalFileSystem`] for real directories; tests and hosts
/// with virtual storage can provide their own.
pub trait PoFileSystem: Send + Sync + 'static {
    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> impl Future<Output = bool> + Send;

    /// Entries directly inside `dir`. Subdirectories are not descended.
    fn list_dir(&self, dir: &Path) -> impl Future<Output = io::Result<Vec<PathBuf>>> + Send;

    /// Full contents of the file at `path`.
    fn read(&self, path: &Path) -> impl Future<Output = io::Result<Vec<u8>>> + Send;
}

/// [`PoFileSystem`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl PoFileSystem for LocalFileSystem {
    async fn is_dir(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok_and(|metadata| metadata.is_dir())
    }

    async fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            paths.push(entry.path());
        }
        Ok(paths)
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// Whether a directory entry should be imported: its file name must end in
/// `.po` and be at least five characters long.
#[must_use]
pub fn is_po_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.chars().count() > 4 && name.ends_with(".po"))
}
