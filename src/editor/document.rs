//! ドキュメント状態（ファイル名とバッファ）

use crate::buffer::TextBuffer;
use crate::file::display_name;
use std::fmt;
use std::path::{Path, PathBuf};

/// New で設定されるプレースホルダー名
pub const UNTITLED: &str = "Untitled";

/// ドキュメントのファイル名
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileName {
    /// New 直後の未保存ドキュメント（実在パスではない）
    Untitled,
    /// 直近の Open / Save As で選ばれたパス
    Path(PathBuf),
}

impl FileName {
    pub fn path(&self) -> Option<&Path> {
        match self {
            FileName::Untitled => None,
            FileName::Path(path) => Some(path),
        }
    }

    /// タイトルバー向けの短い名前
    pub fn short_name(&self) -> String {
        match self {
            FileName::Untitled => UNTITLED.to_string(),
            FileName::Path(path) => display_name(path),
        }
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileName::Untitled => f.write_str(UNTITLED),
            FileName::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// コントローラーが所有する編集中ドキュメント
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub filename: Option<FileName>,
    pub buffer: TextBuffer,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存先として使える実パス
    pub fn path(&self) -> Option<&Path> {
        self.filename.as_ref().and_then(FileName::path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untitled_has_no_path() {
        let document = Document {
            filename: Some(FileName::Untitled),
            buffer: TextBuffer::new(),
        };
        assert_eq!(document.path(), None);
        assert_eq!(FileName::Untitled.to_string(), "Untitled");
    }

    #[test]
    fn path_names() {
        let name = FileName::Path(PathBuf::from("/tmp/notes/todo.txt"));
        assert_eq!(name.to_string(), "/tmp/notes/todo.txt");
        assert_eq!(name.short_name(), "todo.txt");
    }
}
