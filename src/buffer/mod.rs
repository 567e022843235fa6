//! バッファ管理モジュール
//!
//! 編集中のテキスト全体とカーソル位置を保持する。カーソルは常に
//! UTF-8 の文字境界上のバイトオフセット。

use unicode_width::UnicodeWidthStr;

/// カーソル位置（行・列とも0ベース、列は文字単位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

/// 編集可能なテキストバッファ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字列からバッファを作成（カーソルは先頭）
    pub fn from_str(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// カーソルのバイトオフセット
    pub fn cursor_offset(&self) -> usize {
        self.cursor
    }

    /// 内容を丸ごと置き換え、カーソルを先頭へ
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = 0;
    }

    /// 内容を空にする
    pub fn clear(&mut self) {
        self.replace(String::new());
    }

    /// 外部ウィジェットで編集された内容を取り込む
    ///
    /// カーソルは可能な限り同じ位置に残し、範囲外なら末尾、文字境界でなければ
    /// 直前の境界に寄せる。
    pub fn sync_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let mut cursor = self.cursor.min(self.text.len());
        while !self.text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// カーソル直前の1文字を削除
    pub fn backspace(&mut self) -> bool {
        match self.text[..self.cursor].chars().next_back() {
            Some(ch) => {
                self.cursor -= ch.len_utf8();
                self.text.remove(self.cursor);
                true
            }
            None => false,
        }
    }

    /// カーソル位置の1文字を削除
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) -> bool {
        match self.text[..self.cursor].chars().next_back() {
            Some(ch) => {
                self.cursor -= ch.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match self.text[self.cursor..].chars().next() {
            Some(ch) => {
                self.cursor += ch.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn move_line_start(&mut self) -> bool {
        let start = self.line_start(self.cursor);
        let moved = start != self.cursor;
        self.cursor = start;
        moved
    }

    pub fn move_line_end(&mut self) -> bool {
        let end = self.line_end(self.cursor);
        let moved = end != self.cursor;
        self.cursor = end;
        moved
    }

    pub fn move_up(&mut self) -> bool {
        let start = self.line_start(self.cursor);
        if start == 0 {
            return false;
        }
        let column = self.text[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_in_line(prev_start, column);
        true
    }

    pub fn move_down(&mut self) -> bool {
        let end = self.line_end(self.cursor);
        if end >= self.text.len() {
            return false;
        }
        let column = self.text[self.line_start(self.cursor)..self.cursor]
            .chars()
            .count();
        self.cursor = self.offset_in_line(end + 1, column);
        true
    }

    /// カーソルの行・列
    pub fn cursor_position(&self) -> CursorPosition {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let column = before[self.line_start(self.cursor)..].chars().count();
        CursorPosition { line, column }
    }

    /// カーソルの表示列（全角文字は幅2）
    pub fn display_column(&self) -> usize {
        self.text[self.line_start(self.cursor)..self.cursor].width()
    }

    /// 表示用の行一覧（末尾の改行の後ろにも空行を1つ含む）
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    fn line_start(&self, offset: usize) -> usize {
        self.text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, offset: usize) -> usize {
        self.text[offset..]
            .find('\n')
            .map(|i| i + offset)
            .unwrap_or(self.text.len())
    }

    fn offset_in_line(&self, line_start: usize, column: usize) -> usize {
        let line_end = self.line_end(line_start);
        self.text[line_start..line_end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| line_start + i)
            .unwrap_or(line_end)
    }
}
