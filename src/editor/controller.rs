//! エディタコントローラー
//!
//! ドキュメント状態を所有し、File メニューの各操作を実行する。ファイル選択と
//! エラー表示は注入されたダイアログ・アラート実装に委譲する。

use crate::buffer::TextBuffer;
use crate::dialog::{AlertPresenter, DialogPurpose, DialogRequest, FileDialogProvider};
use crate::editor::document::{Document, FileName};
use crate::file;
use crate::menu::MenuCommand;
use std::path::Path;

pub const APP_TITLE: &str = "Text Editor";
pub const OPEN_ERROR_TITLE: &str = "Open Error";
pub const SAVE_ERROR_TITLE: &str = "Save Error";

pub struct EditorController<D, A> {
    document: Document,
    dialogs: D,
    alerts: A,
    running: bool,
}

impl<D, A> EditorController<D, A>
where
    D: FileDialogProvider,
    A: AlertPresenter,
{
    pub fn new(dialogs: D, alerts: A) -> Self {
        Self {
            document: Document::new(),
            dialogs,
            alerts,
            running: true,
        }
    }

    pub fn filename(&self) -> Option<&FileName> {
        self.document.filename.as_ref()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.document.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.document.buffer
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    pub fn alerts(&self) -> &A {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut A {
        &mut self.alerts
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Save が保存先の選択を必要とするか
    pub fn needs_save_path(&self) -> bool {
        self.document.path().is_none()
    }

    /// コマンド実行前にパス選択が必要なら、その要求内容を返す
    ///
    /// 非同期にダイアログを出すフロントエンドは、先に回答を集めてから
    /// `execute` を呼ぶ。
    pub fn dialog_for(&self, command: MenuCommand) -> Option<DialogRequest> {
        match command {
            MenuCommand::Open => Some(DialogRequest::open()),
            MenuCommand::SaveAs => Some(DialogRequest::save()),
            MenuCommand::Save if self.needs_save_path() => Some(DialogRequest::save()),
            MenuCommand::New | MenuCommand::Save | MenuCommand::Exit => None,
        }
    }

    /// パス入力欄の初期値（保存時は現在のパス）
    pub fn suggested_input(&self, request: &DialogRequest) -> String {
        match request.purpose {
            DialogPurpose::Save => self
                .document
                .path()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            DialogPurpose::Open => String::new(),
        }
    }

    /// ウィンドウタイトル
    pub fn window_title(&self) -> String {
        match self.filename() {
            Some(name) => format!("{} - {}", name.short_name(), APP_TITLE),
            None => APP_TITLE.to_string(),
        }
    }

    /// メニューコマンドを実行
    pub fn execute(&mut self, command: MenuCommand) {
        log::debug!("menu command: {:?}", command);
        match command {
            MenuCommand::New => self.new_file(),
            MenuCommand::Open => self.open(),
            MenuCommand::Save => self.save(),
            MenuCommand::SaveAs => self.save_as(),
            MenuCommand::Exit => self.exit(),
        }
    }

    /// 新規ドキュメント（未保存の変更は確認しない）
    pub fn new_file(&mut self) {
        self.document.filename = Some(FileName::Untitled);
        self.document.buffer.clear();
        log::info!("new untitled document");
    }

    /// ファイルを開く
    ///
    /// 読み込みに失敗してもファイル名は選択されたパスのまま残り、バッファは
    /// 変更されない。
    pub fn open(&mut self) {
        let Some(path) = self.dialogs.choose_open_path(&DialogRequest::open()) else {
            log::debug!("open cancelled");
            return;
        };

        self.document.filename = Some(FileName::Path(path.clone()));

        match file::read_text(&path) {
            Ok(content) => {
                self.document.buffer.replace(content);
                log::info!("opened {}", path.display());
            }
            Err(err) => {
                self.alerts
                    .show_error(OPEN_ERROR_TITLE, &format!("Unable to open file: {}", err));
            }
        }
    }

    /// 上書き保存（保存先が未定なら Save As）
    pub fn save(&mut self) {
        match self.document.path().map(Path::to_path_buf) {
            Some(path) => self.write_to(&path),
            None => self.save_as(),
        }
    }

    /// 別名で保存
    pub fn save_as(&mut self) {
        let Some(path) = self.dialogs.choose_save_path(&DialogRequest::save()) else {
            log::debug!("save as cancelled");
            return;
        };

        self.document.filename = Some(FileName::Path(path.clone()));
        self.write_to(&path);
    }

    /// 終了（確認なし）
    pub fn exit(&mut self) {
        log::info!("exit requested");
        self.running = false;
    }

    fn write_to(&mut self, path: &Path) {
        match file::write_text(path, self.document.buffer.text()) {
            Ok(()) => log::info!("saved {}", path.display()),
            Err(err) => {
                self.alerts
                    .show_error(SAVE_ERROR_TITLE, &format!("Unable to save file: {}", err));
            }
        }
    }
}
