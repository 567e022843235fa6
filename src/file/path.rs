//! パス処理ユーティリティ
//!
//! パスチューザーに入力された文字列をファイルパスへ変換する。

use std::env;
use std::path::{Path, PathBuf};

/// 入力文字列をパスに展開
///
/// `~` と環境変数を展開し、相対パスはカレントディレクトリ基準の絶対パスにする。
/// 空入力は `None`。未定義の環境変数は展開せずそのまま残す。
pub fn expand_input(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let expanded = match shellexpand::full(trimmed) {
        Ok(expanded) => expanded.into_owned(),
        Err(err) => {
            log::warn!("path expansion failed for {:?}: {}", trimmed, err);
            shellexpand::tilde(trimmed).into_owned()
        }
    };

    Some(to_absolute(Path::new(&expanded)))
}

fn to_absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(current_dir) => current_dir.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// 表示用のファイル名（最後のコンポーネント）
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
