//! エラーハンドリングシステム
//!
//! textpad 全体で使用されるエラー型とユーティリティを定義する。
//! ユーザーに見えるのはファイル I/O の失敗だけで、それ以外はフロントエンドの
//! 起動・描画失敗として `main` まで伝搬する。

use std::io;
use std::path::Path;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextpadError {
    /// ファイル操作エラー
    #[error(transparent)]
    File(#[from] FileError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 起動オプションエラー
    #[error("Invalid options: {0}")]
    Options(#[from] OptionsError),

    /// ロガー初期化エラー
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileError {
    #[error("No such file or directory: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Is a directory: {path}")]
    InvalidPath { path: String },

    #[error("{path} is not valid UTF-8 text")]
    Encoding { path: String },

    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

impl FileError {
    /// `std::io::Error` を対象パス付きのエラーに変換
    pub fn from_io(path: &Path, error: &io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileError::NotFound { path },
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            io::ErrorKind::InvalidData => FileError::Encoding { path },
            _ => FileError::Io {
                path,
                message: error.to_string(),
            },
        }
    }
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    #[error("terminal initialization failed: {reason}")]
    TerminalInit { reason: String },

    #[error("rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 起動オプション固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("{flag} requires the `gui` feature")]
    FeatureDisabled { flag: String },
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, TextpadError>;

/// ファイル操作用のResult型
pub mod file {
    pub type Result<T> = std::result::Result<T, super::FileError>;
}

/// パニックハンドラの設定
///
/// 端末が raw モードのまま残らないよう、メッセージ出力前に復帰させる。
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut out = std::io::stdout();
        let _ = crossterm::execute!(out, crossterm::terminal::LeaveAlternateScreen);

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            *s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic payload"
        };

        match panic_info.location() {
            Some(location) => {
                log::error!("panic at {}:{}: {}", location.file(), location.line(), message);
                eprintln!("PANIC at {}:{}: {}", location.file(), location.line(), message);
            }
            None => {
                log::error!("panic: {}", message);
                eprintln!("PANIC: {}", message);
            }
        }
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}
