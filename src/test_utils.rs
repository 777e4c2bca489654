//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用されるインメモリのファイルシステムを提供します。
#![cfg(test)]

use std::collections::{
    HashMap,
    HashSet,
};
use std::io;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::time::Duration;

use crate::catalog::PoFileSystem;

/// テスト用のインメモリ `PoFileSystem`
///
/// ファイルを追加すると親ディレクトリも存在する扱いになる。
#[derive(Debug, Default)]
pub(crate) struct MemoryFileSystem {
    /// パス → ファイル内容
    files: HashMap<PathBuf, Vec<u8>>,
    /// 一覧には出るが読み込みに失敗するファイル
    unreadable: HashSet<PathBuf>,
    /// 存在するディレクトリ
    dirs: HashSet<PathBuf>,
    /// `list_dir` の前に入れる待ち時間（ロック競合の再現用）
    delay: Option<Duration>,
    /// `read` の呼び出し回数
    pub(crate) reads: Arc<AtomicUsize>,
}

impl MemoryFileSystem {
    /// ファイルを追加する
    pub(crate) fn with_file(mut self, path: impl Into<PathBuf>, contents: &str) -> Self {
        let path = path.into();
        self.add_parent(&path);
        self.files.insert(path, contents.as_bytes().to_vec());
        self
    }

    /// 読み込みに失敗するファイルを追加する
    pub(crate) fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parent(&path);
        self.unreadable.insert(path);
        self
    }

    /// ディレクトリ一覧を遅延させる
    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 親ディレクトリを登録する
    fn add_parent(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            self.dirs.insert(parent.to_path_buf());
        }
    }
}

impl PoFileSystem for MemoryFileSystem {
    async fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    async fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .files
            .keys()
            .chain(self.unreadable.iter())
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::PermissionDenied, "unreadable"))
    }
}
