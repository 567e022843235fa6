//! ファイル操作モジュール
//!
//! - 読み書きはUTF-8テキストをそのまま扱う（変換なし）
//! - 保存は対象ファイルを直接上書き（バックアップなし）
//! - 権限不足などはエラーとして呼び出し元へ返し、表示は呼び出し側が行う

pub mod completion;
pub mod io;
pub mod path;

pub use completion::{candidate_label, common_prefix, complete};
pub use io::{read_text, write_text};
pub use path::{display_name, expand_input};
