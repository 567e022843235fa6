use crate::dialog::Alert;
use crate::editor::AppController;
use crate::error::{Result, TextpadError, UiError};
use crate::frontend::prompt::PathPrompt;
use crate::menu::{file_menu, MenuCommand, MenuEntry};
use crate::ui::{Overlay, PromptView, Renderer, ScreenView};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::Duration;

/// 現在のモーダル状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    None,
    Menu { selected: usize },
    Prompt(PathPrompt),
    Alert(Alert),
}

pub struct TuiApplication {
    editor: AppController,
    renderer: Renderer,
    modal: Modal,
}

impl TuiApplication {
    pub fn new() -> Self {
        Self {
            editor: AppController::with_default_collaborators(),
            renderer: Renderer::new(),
            modal: Modal::None,
        }
    }

    pub fn editor(&self) -> &AppController {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut AppController {
        &mut self.editor
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn is_running(&self) -> bool {
        self.editor.is_running()
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal =
            Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        while self.editor.is_running() {
            self.render(terminal)?;

            if event::poll(Duration::from_millis(16))
                .map_err(|err| terminal_error("event poll", err))?
            {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) => self.handle_key_event(key_event),
                    Event::Paste(text) => self.handle_paste(&text),
                    Event::Resize(_, _) => {}
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
                }
            }
        }

        Ok(())
    }

    fn render<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let title = self.editor.window_title();
        let filter = match &self.modal {
            Modal::Prompt(prompt) => prompt.active_filter().description(),
            _ => String::new(),
        };
        let overlay = match &self.modal {
            Modal::None => Overlay::None,
            Modal::Menu { selected } => Overlay::Menu {
                selected: *selected,
            },
            Modal::Prompt(prompt) => Overlay::Prompt(PromptView {
                title: prompt.title(),
                input: &prompt.input,
                filter: &filter,
                candidates: prompt.candidates(),
            }),
            Modal::Alert(alert) => Overlay::Alert(alert),
        };
        let view = ScreenView {
            title: &title,
            buffer: self.editor.buffer(),
            overlay,
        };
        let renderer = &mut self.renderer;

        terminal
            .draw(|frame| renderer.render(frame, &view))
            .map(|_| ())
            .map_err(|err| terminal_error("render", err))
    }

    /// キー入力を現在のモーダルに振り分ける
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        match std::mem::replace(&mut self.modal, Modal::None) {
            Modal::None => self.handle_editor_key(key),
            Modal::Menu { selected } => self.handle_menu_key(key, selected),
            Modal::Prompt(prompt) => self.handle_prompt_key(key, prompt),
            Modal::Alert(alert) => self.handle_alert_key(key, alert),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        match &mut self.modal {
            Modal::None => self.editor.buffer_mut().insert_str(text),
            Modal::Prompt(prompt) => prompt.push_str(text.trim_end_matches(['\r', '\n'])),
            Modal::Menu { .. } | Modal::Alert(_) => {}
        }
    }

    /// メニューコマンドを実行（パスが必要なら入力ダイアログを開く）
    pub fn run_command(&mut self, command: MenuCommand) {
        match self.editor.dialog_for(command) {
            Some(request) => {
                let input = self.editor.suggested_input(&request);
                self.modal = Modal::Prompt(PathPrompt::new(command, request, input));
            }
            None => {
                self.editor.execute(command);
                self.show_pending_alert();
            }
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::F(10)
            || (key.code == KeyCode::Char('f') && key.modifiers.contains(KeyModifiers::ALT))
        {
            self.modal = Modal::Menu { selected: 0 };
            return;
        }

        if let Some(command) = MenuCommand::from_key(&key) {
            self.run_command(command);
            return;
        }

        let buffer = self.editor.buffer_mut();
        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                buffer.insert_char(ch)
            }
            KeyCode::Enter => buffer.insert_newline(),
            KeyCode::Tab => buffer.insert_char('\t'),
            KeyCode::Backspace => {
                buffer.backspace();
            }
            KeyCode::Delete => {
                buffer.delete();
            }
            KeyCode::Left => {
                buffer.move_left();
            }
            KeyCode::Right => {
                buffer.move_right();
            }
            KeyCode::Up => {
                buffer.move_up();
            }
            KeyCode::Down => {
                buffer.move_down();
            }
            KeyCode::Home => {
                buffer.move_line_start();
            }
            KeyCode::End => {
                buffer.move_line_end();
            }
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent, selected: usize) {
        let entries = file_menu();
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => {}
            KeyCode::Up => {
                self.modal = Modal::Menu {
                    selected: step_selection(&entries, selected, false),
                }
            }
            KeyCode::Down => {
                self.modal = Modal::Menu {
                    selected: step_selection(&entries, selected, true),
                }
            }
            KeyCode::Enter => {
                if let Some(command) = entries.get(selected).and_then(|entry| entry.command()) {
                    self.run_command(command);
                }
            }
            _ => self.modal = Modal::Menu { selected },
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent, mut prompt: PathPrompt) {
        match key.code {
            KeyCode::Esc => self.finish_prompt(prompt.command, None),
            KeyCode::Enter => match prompt.answer() {
                Some(path) => self.finish_prompt(prompt.command, Some(path)),
                None => self.modal = Modal::Prompt(prompt),
            },
            KeyCode::Tab => {
                prompt.complete();
                self.modal = Modal::Prompt(prompt);
            }
            KeyCode::BackTab => {
                prompt.cycle_filter();
                self.modal = Modal::Prompt(prompt);
            }
            KeyCode::Backspace => {
                prompt.pop();
                self.modal = Modal::Prompt(prompt);
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.push_str(ch.encode_utf8(&mut [0; 4]));
                self.modal = Modal::Prompt(prompt);
            }
            _ => self.modal = Modal::Prompt(prompt),
        }
    }

    /// 入力結果をダイアログの回答としてコマンドを実行する（`None` はキャンセル）
    fn finish_prompt(&mut self, command: MenuCommand, answer: Option<std::path::PathBuf>) {
        self.editor.dialogs_mut().prepare(answer);
        self.editor.execute(command);
        self.show_pending_alert();
    }

    fn handle_alert_key(&mut self, key: KeyEvent, alert: Alert) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => self.show_pending_alert(),
            _ => self.modal = Modal::Alert(alert),
        }
    }

    fn show_pending_alert(&mut self) {
        if let Some(alert) = self.editor.alerts_mut().pop() {
            self.modal = Modal::Alert(alert);
        }
    }
}

impl Default for TuiApplication {
    fn default() -> Self {
        Self::new()
    }
}

/// セパレーターを飛ばして次の選択位置へ（端で折り返す）
fn step_selection(entries: &[MenuEntry], selected: usize, forward: bool) -> usize {
    let len = entries.len();
    let mut index = selected;
    for _ in 0..len {
        index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        if entries[index].command().is_some() {
            return index;
        }
    }
    selected
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| init_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| init_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn init_error(context: &str, err: impl std::fmt::Display) -> TextpadError {
    TextpadError::Ui(UiError::TerminalInit {
        reason: format!("{}: {}", context, err),
    })
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> TextpadError {
    TextpadError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::FileName;
    use std::fs;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut TuiApplication, text: &str) {
        for ch in text.chars() {
            app.handle_key_event(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_edits_the_buffer() {
        let mut app = TuiApplication::new();
        type_text(&mut app, "hi");
        app.handle_key_event(key(KeyCode::Enter));
        type_text(&mut app, "there");
        app.handle_key_event(key(KeyCode::Backspace));

        assert_eq!(app.editor().buffer().text(), "hi\nther");
    }

    #[test]
    fn menu_navigation_skips_separator() {
        let mut app = TuiApplication::new();
        app.handle_key_event(key(KeyCode::F(10)));
        assert_eq!(app.modal(), &Modal::Menu { selected: 0 });

        for _ in 0..4 {
            app.handle_key_event(key(KeyCode::Down));
        }
        // New, Open, Save, Save As, (separator), Exit
        assert_eq!(app.modal(), &Modal::Menu { selected: 5 });

        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.modal(), &Modal::Menu { selected: 0 });

        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.modal(), &Modal::None);
    }

    #[test]
    fn menu_exit_stops_the_application() {
        let mut app = TuiApplication::new();
        app.handle_key_event(key(KeyCode::F(10)));
        app.handle_key_event(key(KeyCode::Up));
        app.handle_key_event(key(KeyCode::Enter));
        assert!(!app.is_running());
    }

    #[test]
    fn new_from_menu_resets_document() {
        let mut app = TuiApplication::new();
        type_text(&mut app, "scratch");
        app.handle_key_event(key(KeyCode::F(10)));
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.editor().filename(), Some(&FileName::Untitled));
        assert!(app.editor().buffer().is_empty());
    }

    #[test]
    fn open_prompt_loads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "File content").unwrap();

        let mut app = TuiApplication::new();
        app.handle_key_event(ctrl('o'));
        assert!(matches!(app.modal(), Modal::Prompt(p) if p.command == MenuCommand::Open));

        type_text(&mut app, &path.display().to_string());
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.modal(), &Modal::None);
        assert_eq!(app.editor().filename(), Some(&FileName::Path(path)));
        assert_eq!(app.editor().buffer().text(), "File content");
    }

    #[test]
    fn cancelled_open_keeps_state() {
        let mut app = TuiApplication::new();
        type_text(&mut app, "keep me");
        app.handle_key_event(ctrl('o'));
        type_text(&mut app, "/tmp/whatever.txt");
        app.handle_key_event(key(KeyCode::Esc));

        assert_eq!(app.modal(), &Modal::None);
        assert_eq!(app.editor().filename(), None);
        assert_eq!(app.editor().buffer().text(), "keep me");
    }

    #[test]
    fn empty_prompt_input_is_not_accepted() {
        let mut app = TuiApplication::new();
        app.handle_key_event(ctrl('o'));
        app.handle_key_event(key(KeyCode::Enter));
        assert!(matches!(app.modal(), Modal::Prompt(_)));
    }

    #[test]
    fn save_untitled_asks_for_path_and_applies_extension() {
        let dir = tempdir().unwrap();
        let stem = dir.path().join("draft");

        let mut app = TuiApplication::new();
        app.run_command(MenuCommand::New);
        type_text(&mut app, "hello world");
        app.handle_key_event(ctrl('s'));
        assert!(matches!(app.modal(), Modal::Prompt(p) if p.command == MenuCommand::Save));

        type_text(&mut app, &stem.display().to_string());
        app.handle_key_event(key(KeyCode::Enter));

        let saved = dir.path().join("draft.txt");
        assert_eq!(fs::read_to_string(&saved).unwrap(), "hello world");
        assert_eq!(app.editor().filename(), Some(&FileName::Path(saved)));
    }

    #[test]
    fn save_existing_writes_immediately() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "old").unwrap();

        let mut app = TuiApplication::new();
        app.handle_key_event(ctrl('o'));
        type_text(&mut app, &path.display().to_string());
        app.handle_key_event(key(KeyCode::Enter));

        app.handle_key_event(key(KeyCode::End));
        type_text(&mut app, "er");
        app.handle_key_event(ctrl('s'));

        assert_eq!(app.modal(), &Modal::None);
        assert_eq!(fs::read_to_string(&path).unwrap(), "older");
    }

    #[test]
    fn save_failure_shows_alert_until_dismissed() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("missing-dir").join("a.txt");

        let mut app = TuiApplication::new();
        app.handle_key_event(key(KeyCode::F(12)));
        type_text(&mut app, &bad.display().to_string());
        app.handle_key_event(key(KeyCode::Enter));

        match app.modal() {
            Modal::Alert(alert) => {
                assert_eq!(alert.title, "Save Error");
                assert!(alert.message.starts_with("Unable to save file: "));
            }
            other => panic!("expected alert, got {:?}", other),
        }

        type_text(&mut app, "x");
        assert!(matches!(app.modal(), Modal::Alert(_)));
        assert!(app.editor().buffer().is_empty());

        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.modal(), &Modal::None);
    }

    #[test]
    fn open_failure_shows_open_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let mut app = TuiApplication::new();
        app.handle_key_event(ctrl('o'));
        type_text(&mut app, &missing.display().to_string());
        app.handle_key_event(key(KeyCode::Enter));

        assert!(matches!(app.modal(), Modal::Alert(a) if a.title == "Open Error"));
        assert_eq!(app.editor().filename(), Some(&FileName::Path(missing)));
    }

    #[test]
    fn tab_completes_with_the_selected_file_type() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("report.txt"), "text report").unwrap();
        fs::write(dir.path().join("report.csv"), "a,b").unwrap();

        let mut app = TuiApplication::new();
        app.handle_key_event(ctrl('o'));
        type_text(&mut app, &format!("{}/rep", dir.path().display()));
        app.handle_key_event(key(KeyCode::Tab));

        let expected = format!("{}/report.txt", dir.path().display());
        assert!(matches!(app.modal(), Modal::Prompt(p) if p.input == expected));

        app.handle_key_event(key(KeyCode::BackTab));
        app.handle_key_event(key(KeyCode::Backspace));
        app.handle_key_event(key(KeyCode::Backspace));
        app.handle_key_event(key(KeyCode::Backspace));
        app.handle_key_event(key(KeyCode::Tab));
        match app.modal() {
            Modal::Prompt(prompt) => {
                assert_eq!(prompt.input, format!("{}/report.", dir.path().display()));
                assert_eq!(prompt.candidates().len(), 2);
            }
            other => panic!("expected prompt, got {:?}", other),
        }

        type_text(&mut app, "txt");
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.editor().buffer().text(), "text report");
    }

    #[test]
    fn long_paste_into_prompt_renders() {
        let mut app = TuiApplication::new();
        app.handle_key_event(ctrl('o'));
        app.handle_paste(&"x".repeat(70_000));

        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(60, 16)).unwrap();
        app.render(&mut terminal).unwrap();
        assert!(matches!(app.modal(), Modal::Prompt(p) if p.input.len() == 70_000));
    }

    #[test]
    fn paste_goes_to_the_active_target() {
        let mut app = TuiApplication::new();
        app.handle_paste("pasted\ntext");
        assert_eq!(app.editor().buffer().text(), "pasted\ntext");

        app.handle_key_event(ctrl('o'));
        app.handle_paste("/tmp/x.txt\n");
        assert!(matches!(app.modal(), Modal::Prompt(p) if p.input == "/tmp/x.txt"));
    }
}
