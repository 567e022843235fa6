//! 画面描画
//!
//! エディタ本体とモーダル（メニュー・パス入力・アラート）を描く。

use crate::buffer::TextBuffer;
use crate::dialog::Alert;
use crate::file::candidate_label;
use crate::menu::{file_menu, MenuEntry, FILE_MENU_TITLE};
use crate::ui::layout::{centered_rect, dropdown_rect, AppLayout};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DROPDOWN_WIDTH: u16 = 24;
const PROMPT_WIDTH: u16 = 60;
const ALERT_WIDTH: u16 = 50;
const MAX_CANDIDATE_ROWS: usize = 8;

/// 画面の上に重ねるモーダル
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    None,
    Menu { selected: usize },
    Prompt(PromptView<'a>),
    Alert(&'a Alert),
}

#[derive(Debug, Clone, Copy)]
pub struct PromptView<'a> {
    pub title: &'a str,
    pub input: &'a str,
    /// 選択中のファイル種別
    pub filter: &'a str,
    pub candidates: &'a [String],
}

/// 描画に必要な状態
#[derive(Debug, Clone, Copy)]
pub struct ScreenView<'a> {
    pub title: &'a str,
    pub buffer: &'a TextBuffer,
    pub overlay: Overlay<'a>,
}

/// スクロール位置を保持するレンダラー
#[derive(Debug, Default)]
pub struct Renderer {
    top_line: usize,
    left_column: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_offset(&self) -> (usize, usize) {
        (self.top_line, self.left_column)
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, view: &ScreenView<'_>) {
        let area = frame.area();
        let layout = AppLayout::calculate(area);

        let menu_open = matches!(view.overlay, Overlay::Menu { .. });
        self.render_menu_bar(frame, layout.menu_bar, menu_open);
        let cursor = self.render_editor(frame, layout.editor, view);
        self.render_status_line(frame, layout.status_line, view.buffer);

        match view.overlay {
            Overlay::None => {
                if let Some(position) = cursor {
                    frame.set_cursor_position(position);
                }
            }
            Overlay::Menu { selected } => render_dropdown(frame, area, selected),
            Overlay::Prompt(prompt) => render_prompt(frame, area, &prompt),
            Overlay::Alert(alert) => render_alert(frame, area, alert),
        }
    }

    fn render_menu_bar(&self, frame: &mut Frame<'_>, area: Rect, menu_open: bool) {
        let title_style = if menu_open {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled(format!(" {} ", FILE_MENU_TITLE), title_style),
            Span::styled("  F10: menu", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(Color::Gray).fg(Color::Black)),
            area,
        );
    }

    /// テキストを描画し、カーソルの画面位置を返す
    fn render_editor(
        &mut self,
        frame: &mut Frame<'_>,
        area: Rect,
        view: &ScreenView<'_>,
    ) -> Option<Position> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", view.title));
        let inner = block.inner(area);

        let cursor = view.buffer.cursor_position();
        let display_column = view.buffer.display_column();
        self.scroll_into_view(cursor.line, display_column, inner);

        // 表示範囲の行と列だけを渡す（ratatui のスクロール量は u16）
        let visible: Vec<Line> = view
            .buffer
            .lines()
            .skip(self.top_line)
            .take(usize::from(inner.height))
            .map(|line| Line::raw(skip_columns(line, self.left_column)))
            .collect();
        frame.render_widget(Paragraph::new(Text::from(visible)).block(block), area);

        if inner.width == 0 || inner.height == 0 {
            return None;
        }
        let x = inner.x + to_u16(display_column - self.left_column);
        let y = inner.y + to_u16(cursor.line - self.top_line);
        Some(Position::new(x, y))
    }

    fn scroll_into_view(&mut self, line: usize, column: usize, inner: Rect) {
        let height = usize::from(inner.height.max(1));
        let width = usize::from(inner.width.max(1));

        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + height {
            self.top_line = line + 1 - height;
        }

        if column < self.left_column {
            self.left_column = column;
        } else if column >= self.left_column + width {
            self.left_column = column + 1 - width;
        }
    }

    fn render_status_line(&self, frame: &mut Frame<'_>, area: Rect, buffer: &TextBuffer) {
        let cursor = buffer.cursor_position();
        let status = format!(
            " Ln {}, Col {}  |  {} lines  |  UTF-8",
            cursor.line + 1,
            cursor.column + 1,
            buffer.line_count()
        );
        frame.render_widget(
            Paragraph::new(status).style(Style::default().add_modifier(Modifier::REVERSED)),
            area,
        );
    }
}

fn render_dropdown(frame: &mut Frame<'_>, area: Rect, selected: usize) {
    let entries = file_menu();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| match entry {
            MenuEntry::Command(command) => {
                let label = command.label();
                let shortcut = command.shortcut();
                let padding = usize::from(DROPDOWN_WIDTH)
                    .saturating_sub(label.width() + shortcut.width() + 4);
                ListItem::new(format!("{}{}{}", label, " ".repeat(padding), shortcut))
            }
            MenuEntry::Separator => ListItem::new("─".repeat(usize::from(DROPDOWN_WIDTH) - 2))
                .style(Style::default().fg(Color::DarkGray)),
        })
        .collect();

    let rect = dropdown_rect(area, DROPDOWN_WIDTH, entries.len() as u16 + 2);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(selected));

    frame.render_widget(Clear, rect);
    frame.render_stateful_widget(list, rect, &mut state);
}

fn render_prompt(frame: &mut Frame<'_>, area: Rect, prompt: &PromptView<'_>) {
    let candidate_rows = prompt.candidates.len().min(MAX_CANDIDATE_ROWS);
    let rect = centered_rect(area, PROMPT_WIDTH, to_u16(candidate_rows + 5));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", prompt.title));
    let inner = block.inner(rect);

    let label = "File name: ";
    // 入りきらない入力は末尾側を見せる
    let room = usize::from(inner.width).saturating_sub(label.width() + 1);
    let shown_input = tail_fitting(prompt.input, room);

    let hint = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![Span::raw(label), Span::raw(shown_input)]),
        Line::styled(format!("Type: {}", prompt.filter), hint),
    ];
    for (index, candidate) in prompt.candidates.iter().take(candidate_rows).enumerate() {
        let hidden = prompt.candidates.len() - index;
        if index + 1 == MAX_CANDIDATE_ROWS && hidden > 1 {
            lines.push(Line::styled(format!("  (+{} more)", hidden), hint));
        } else {
            lines.push(Line::raw(format!("  {}", candidate_label(candidate))));
        }
    }
    lines.push(Line::styled(
        "Tab: complete  Shift+Tab: type  Enter: OK  Esc: Cancel",
        hint,
    ));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);

    if inner.width > 0 && inner.height > 0 {
        let offset = (label.width() + shown_input.width()).min(usize::from(inner.width - 1));
        frame.set_cursor_position(Position::new(inner.x + to_u16(offset), inner.y));
    }
}

/// 表示幅 `columns` 分を読み飛ばした残り
fn skip_columns(line: &str, columns: usize) -> &str {
    let mut width = 0;
    for (index, ch) in line.char_indices() {
        if width >= columns {
            return &line[index..];
        }
        width += ch.width().unwrap_or(0);
    }
    ""
}

/// 表示幅 `columns` に収まる末尾部分
fn tail_fitting(text: &str, columns: usize) -> &str {
    let mut width = 0;
    for (index, ch) in text.char_indices().rev() {
        width += ch.width().unwrap_or(0);
        if width > columns {
            return &text[index + ch.len_utf8()..];
        }
    }
    text
}

fn render_alert(frame: &mut Frame<'_>, area: Rect, alert: &Alert) {
    let inner_width = usize::from(ALERT_WIDTH - 2).max(1);
    let message_rows = alert.message.width() / inner_width + 1;
    let height = to_u16(message_rows + 4);
    let rect = centered_rect(area, ALERT_WIDTH, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" {} ", alert.title));
    let text = Text::from(vec![
        Line::raw(alert.message.as_str()),
        Line::raw(""),
        Line::styled("[ OK ]", Style::default().add_modifier(Modifier::REVERSED)),
    ]);

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        rect,
    );
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
