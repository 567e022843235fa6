//! エディタモジュール
//!
//! ドキュメント状態とそれを操作するコントローラー

pub mod controller;
pub mod document;

pub use controller::{
    EditorController, APP_TITLE, OPEN_ERROR_TITLE, SAVE_ERROR_TITLE,
};
pub use document::{Document, FileName, UNTITLED};

use crate::dialog::{AlertQueue, PreparedChoice};

/// フロントエンドが使う標準構成のコントローラー
pub type AppController = EditorController<PreparedChoice, AlertQueue>;

impl AppController {
    pub fn with_default_collaborators() -> Self {
        EditorController::new(PreparedChoice::new(), AlertQueue::new())
    }
}
