//! Slint ウィンドウの状態遷移
//!
//! メニュー・パス入力・アラートの流れだけを持ち、Slint には依存しない。
//! ウィンドウ側はコールバックごとにここを呼び、結果を画面へ反映する。

use crate::dialog::Alert;
use crate::editor::AppController;
use crate::frontend::prompt::PathPrompt;
use crate::menu::MenuCommand;

pub struct GuiState {
    editor: AppController,
    prompt: Option<PathPrompt>,
    alert: Option<Alert>,
}

impl GuiState {
    pub fn new() -> Self {
        Self {
            editor: AppController::with_default_collaborators(),
            prompt: None,
            alert: None,
        }
    }

    pub fn editor(&self) -> &AppController {
        &self.editor
    }

    pub fn prompt(&self) -> Option<&PathPrompt> {
        self.prompt.as_ref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.editor.is_running()
    }

    /// テキスト欄の編集をバッファへ反映
    pub fn sync_text(&mut self, text: &str) {
        self.editor.buffer_mut().sync_text(text);
    }

    /// メニュー項目を実行する
    ///
    /// パスが必要なコマンドは入力ダイアログを開くだけで、確定時に実行する。
    /// モーダル表示中は無視する。戻り値はテキストが置き換わったかどうか。
    pub fn activate(&mut self, command: MenuCommand) -> bool {
        if self.prompt.is_some() || self.alert.is_some() {
            log::debug!("ignoring {:?} while a dialog is open", command);
            return false;
        }

        match self.editor.dialog_for(command) {
            Some(request) => {
                let input = self.editor.suggested_input(&request);
                self.prompt = Some(PathPrompt::new(command, request, input));
                false
            }
            None => self.execute(command),
        }
    }

    /// 入力欄の変更（候補一覧を更新する）
    pub fn edit_prompt(&mut self, input: &str) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.set_input(input);
            prompt.refresh_candidates();
        }
    }

    pub fn select_filter(&mut self, index: usize) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.select_filter(index);
            prompt.refresh_candidates();
        }
    }

    pub fn choose_candidate(&mut self, index: usize) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.choose_candidate(index);
        }
    }

    /// 入力を確定してコマンドを実行（空入力ならダイアログを開いたまま）
    pub fn accept_prompt(&mut self, input: &str) -> bool {
        let Some(prompt) = self.prompt.as_mut() else {
            return false;
        };
        prompt.set_input(input);
        let Some(path) = prompt.answer() else {
            return false;
        };

        let command = prompt.command;
        self.prompt = None;
        self.editor.dialogs_mut().prepare(Some(path));
        self.execute(command)
    }

    /// キャンセル（コマンドは選択なしとして実行される）
    pub fn cancel_prompt(&mut self) -> bool {
        let Some(prompt) = self.prompt.take() else {
            return false;
        };
        self.editor.dialogs_mut().prepare(None);
        self.execute(prompt.command)
    }

    /// 表示中のアラートを閉じ、溜まっていれば次を出す
    pub fn dismiss_alert(&mut self) {
        self.alert = self.editor.alerts_mut().pop();
    }

    fn execute(&mut self, command: MenuCommand) -> bool {
        self.editor.execute(command);
        if self.alert.is_none() {
            self.alert = self.editor.alerts_mut().pop();
        }
        matches!(command, MenuCommand::New | MenuCommand::Open)
    }
}

impl Default for GuiState {
    fn default() -> Self {
        Self::new()
    }
}
