//! textpad - minimal single-document text editor
//!
//! File メニュー（New / Open / Save / Save As / Exit）だけを持つエディタ。
//! コントローラーは表示系から独立しており、端末版と Slint 版の両方が同じ
//! コントローラーを使う。

// コアモジュール
pub mod error;
pub mod frontend;
pub mod logging;
pub mod options;

// データ層
pub mod buffer;
pub mod file;

// 編集層
pub mod dialog;
pub mod editor;
pub mod menu;

// 表示層
pub mod ui;

// 公開API
pub use dialog::{AlertPresenter, FileDialogProvider};
pub use editor::{AppController, Document, EditorController, FileName};
pub use error::{Result, TextpadError};
#[cfg(feature = "gui")]
pub use frontend::GuiApplication;
pub use frontend::TuiApplication;
pub use options::{RunMode, RunOptions};
