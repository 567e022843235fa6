//! パス入力ダイアログの状態
//!
//! 端末版と Slint 版で共有する。入力文字列・選択中のフィルター・補完候補を
//! 持ち、確定時に `expand_input` でパスへ変換する。

use crate::dialog::{DialogRequest, FileFilter};
use crate::file;
use crate::menu::MenuCommand;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    /// 入力確定後に実行するコマンド
    pub command: MenuCommand,
    pub request: DialogRequest,
    pub input: String,
    filter: usize,
    candidates: Vec<String>,
}

impl PathPrompt {
    pub fn new(command: MenuCommand, request: DialogRequest, input: String) -> Self {
        Self {
            command,
            request,
            input,
            filter: 0,
            candidates: Vec::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.request.purpose.title()
    }

    pub fn active_filter(&self) -> FileFilter {
        self.request.filter(self.filter)
    }

    pub fn filter_index(&self) -> usize {
        self.filter
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// 入力を置き換える（表示中の候補は捨てる）
    pub fn set_input(&mut self, input: &str) {
        if self.input != input {
            self.input = input.to_string();
            self.candidates.clear();
        }
    }

    pub fn push_str(&mut self, text: &str) {
        self.input.push_str(text);
        self.candidates.clear();
    }

    pub fn pop(&mut self) {
        self.input.pop();
        self.candidates.clear();
    }

    /// 次のフィルターへ切り替える
    pub fn cycle_filter(&mut self) {
        self.select_filter(self.filter + 1);
    }

    pub fn select_filter(&mut self, index: usize) {
        let len = self.request.filters.len().max(1);
        self.filter = index % len;
        if !self.candidates.is_empty() {
            self.refresh_candidates();
        }
    }

    /// 現在の入力とフィルターで候補を作り直す
    pub fn refresh_candidates(&mut self) {
        self.candidates = file::complete(&self.input, &self.active_filter());
    }

    /// 入力を補完する
    ///
    /// 共通部分まで伸ばし、候補が複数残る場合はそれを表示用に保持する。
    pub fn complete(&mut self) {
        let candidates = file::complete(&self.input, &self.active_filter());
        let prefix = file::common_prefix(&candidates);
        if prefix.len() > self.input.len() {
            self.input = prefix;
        }
        self.candidates = if candidates.len() > 1 {
            candidates
        } else {
            Vec::new()
        };
    }

    /// 候補を選ぶ（ディレクトリならその中身を次の候補にする）
    pub fn choose_candidate(&mut self, index: usize) {
        let Some(candidate) = self.candidates.get(index).cloned() else {
            return;
        };
        self.input = candidate;
        if self.input.ends_with('/') {
            self.refresh_candidates();
        } else {
            self.candidates.clear();
        }
    }

    /// 確定時のパス（空入力は `None`）
    pub fn answer(&self) -> Option<PathBuf> {
        file::expand_input(&self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn open_prompt(input: String) -> PathPrompt {
        PathPrompt::new(MenuCommand::Open, DialogRequest::open(), input)
    }

    #[test]
    fn completes_unique_candidate() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let mut prompt = open_prompt(format!("{}/no", dir.path().display()));
        prompt.complete();

        assert_eq!(prompt.input, format!("{}/notes.txt", dir.path().display()));
        assert!(prompt.candidates().is_empty());
    }

    #[test]
    fn completion_respects_active_filter() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("data.txt"), "").unwrap();
        fs::write(dir.path().join("data.csv"), "").unwrap();
        let base = format!("{}/da", dir.path().display());

        let mut prompt = open_prompt(base.clone());
        assert_eq!(prompt.active_filter(), FileFilter::TEXT);
        prompt.complete();
        assert_eq!(prompt.input, format!("{}/data.txt", dir.path().display()));

        let mut prompt = open_prompt(base);
        prompt.cycle_filter();
        assert_eq!(prompt.active_filter(), FileFilter::ALL);
        prompt.complete();
        assert_eq!(prompt.input, format!("{}/data.", dir.path().display()));
        assert_eq!(prompt.candidates().len(), 2);

        prompt.cycle_filter();
        assert_eq!(prompt.filter_index(), 0);
        assert_eq!(prompt.candidates().len(), 1);
    }

    #[test]
    fn choosing_a_directory_lists_its_contents() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs").join("readme.txt"), "").unwrap();
        fs::write(dir.path().join("draft.txt"), "").unwrap();

        let mut prompt = open_prompt(format!("{}/d", dir.path().display()));
        prompt.complete();
        assert_eq!(prompt.candidates().len(), 2);

        let docs = prompt
            .candidates()
            .iter()
            .position(|c| c.ends_with("docs/"))
            .unwrap();
        prompt.choose_candidate(docs);

        assert_eq!(prompt.input, format!("{}/docs/", dir.path().display()));
        assert_eq!(
            prompt.candidates(),
            &[format!("{}/docs/readme.txt", dir.path().display())]
        );
    }

    #[test]
    fn editing_discards_candidates() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a1.txt"), "").unwrap();
        fs::write(dir.path().join("a2.txt"), "").unwrap();

        let mut prompt = open_prompt(format!("{}/a", dir.path().display()));
        prompt.complete();
        assert_eq!(prompt.candidates().len(), 2);

        prompt.pop();
        assert!(prompt.candidates().is_empty());
    }

    #[test]
    fn empty_input_has_no_answer() {
        let prompt = open_prompt(String::new());
        assert_eq!(prompt.answer(), None);

        let prompt = open_prompt("/tmp/a.txt".to_string());
        assert_eq!(prompt.answer(), Some(PathBuf::from("/tmp/a.txt")));
    }
}
