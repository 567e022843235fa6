//! ダイアログとアラートの抽象
//!
//! コントローラーはファイル選択とエラー通知をこのトレイト経由で呼び出す。
//! フロントエンドは自前のモーダルUIでパスを集め、`PreparedChoice` に詰めて
//! 操作を実行する。

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// ファイルチューザーのフィルター
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    pub pattern: &'static str,
}

impl FileFilter {
    pub const TEXT: FileFilter = FileFilter {
        label: "Text Files",
        pattern: "*.txt",
    };
    pub const ALL: FileFilter = FileFilter {
        label: "All Files",
        pattern: "*.*",
    };

    /// ファイル名がパターンに一致するか（`*.ext` と `*.*` のみ対応）
    pub fn matches(&self, path: &Path) -> bool {
        match self.pattern.strip_prefix("*.") {
            Some("*") => true,
            Some(ext) => path
                .extension()
                .map(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
                .unwrap_or(false),
            None => false,
        }
    }

    /// 表示用の名前（例: `Text Files (*.txt)`）
    pub fn description(&self) -> String {
        format!("{} ({})", self.label, self.pattern)
    }
}

/// 標準のフィルター一覧
pub const STANDARD_FILTERS: [FileFilter; 2] = [FileFilter::TEXT, FileFilter::ALL];

/// 保存時の既定拡張子
pub const DEFAULT_EXTENSION: &str = ".txt";

/// ダイアログの用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPurpose {
    Open,
    Save,
}

impl DialogPurpose {
    pub fn title(self) -> &'static str {
        match self {
            DialogPurpose::Open => "Open",
            DialogPurpose::Save => "Save As",
        }
    }
}

/// ファイル選択の要求内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub purpose: DialogPurpose,
    pub filters: &'static [FileFilter],
    pub default_extension: Option<&'static str>,
}

impl DialogRequest {
    pub fn open() -> Self {
        Self {
            purpose: DialogPurpose::Open,
            filters: &STANDARD_FILTERS,
            default_extension: None,
        }
    }

    pub fn save() -> Self {
        Self {
            purpose: DialogPurpose::Save,
            filters: &STANDARD_FILTERS,
            default_extension: Some(DEFAULT_EXTENSION),
        }
    }

    /// 要求に従って選択結果を仕上げる（保存時の既定拡張子など）
    pub fn finish(&self, path: PathBuf) -> PathBuf {
        match self.default_extension {
            Some(extension) => apply_default_extension(path, extension),
            None => path,
        }
    }

    /// 選択中のフィルター（範囲外は先頭に折り返す）
    pub fn filter(&self, index: usize) -> FileFilter {
        match self.filters.len() {
            0 => FileFilter::ALL,
            len => self.filters[index % len],
        }
    }
}

/// 拡張子のないパスに既定拡張子を付ける
pub fn apply_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() || path.file_name().is_none() {
        return path;
    }
    let extension = extension.trim_start_matches('.');
    path.with_extension(extension)
}

/// ファイル選択ダイアログ
pub trait FileDialogProvider {
    /// 開くファイルを選ぶ（キャンセル時は `None`）
    fn choose_open_path(&mut self, request: &DialogRequest) -> Option<PathBuf>;

    /// 保存先を選ぶ（キャンセル時は `None`）
    fn choose_save_path(&mut self, request: &DialogRequest) -> Option<PathBuf>;
}

/// エラー通知
pub trait AlertPresenter {
    fn show_error(&mut self, title: &str, message: &str);
}

/// 事前に集めた回答を一度だけ返すダイアログ
#[derive(Debug, Clone, Default)]
pub struct PreparedChoice {
    answer: Option<PathBuf>,
}

impl PreparedChoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次の選択結果を設定（`None` はキャンセル）
    pub fn prepare(&mut self, answer: Option<PathBuf>) {
        self.answer = answer;
    }
}

impl FileDialogProvider for PreparedChoice {
    fn choose_open_path(&mut self, _request: &DialogRequest) -> Option<PathBuf> {
        self.answer.take()
    }

    fn choose_save_path(&mut self, request: &DialogRequest) -> Option<PathBuf> {
        self.answer.take().map(|path| request.finish(path))
    }
}

/// モーダル表示待ちのアラート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// アラートを溜めておき、フロントエンドが順に表示する
#[derive(Debug, Default)]
pub struct AlertQueue {
    pending: VecDeque<Alert>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&mut self) -> Option<Alert> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl AlertPresenter for AlertQueue {
    fn show_error(&mut self, title: &str, message: &str) {
        log::error!("{}: {}", title, message);
        self.pending.push_back(Alert {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}
