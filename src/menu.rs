//! File メニューの定義
//!
//! 両フロントエンドが同じ項目・同じ順序でメニューを表示する。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// メニューから実行できるコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 5] = [
        MenuCommand::New,
        MenuCommand::Open,
        MenuCommand::Save,
        MenuCommand::SaveAs,
        MenuCommand::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::New => "New",
            MenuCommand::Open => "Open",
            MenuCommand::Save => "Save",
            MenuCommand::SaveAs => "Save As",
            MenuCommand::Exit => "Exit",
        }
    }

    /// GUI コールバックで使う識別子
    pub fn id(self) -> &'static str {
        match self {
            MenuCommand::New => "new",
            MenuCommand::Open => "open",
            MenuCommand::Save => "save",
            MenuCommand::SaveAs => "save-as",
            MenuCommand::Exit => "exit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.id() == id)
    }

    /// 端末版のショートカット表示
    pub fn shortcut(self) -> &'static str {
        match self {
            MenuCommand::New => "Ctrl+N",
            MenuCommand::Open => "Ctrl+O",
            MenuCommand::Save => "Ctrl+S",
            MenuCommand::SaveAs => "F12",
            MenuCommand::Exit => "Ctrl+Q",
        }
    }

    /// キー入力に対応するコマンド
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::F(12) => Some(MenuCommand::SaveAs),
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'n' => Some(MenuCommand::New),
                'o' => Some(MenuCommand::Open),
                's' if shift || c.is_ascii_uppercase() => Some(MenuCommand::SaveAs),
                's' => Some(MenuCommand::Save),
                'q' => Some(MenuCommand::Exit),
                _ => None,
            },
            _ => None,
        }
    }
}

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Command(MenuCommand),
    Separator,
}

impl MenuEntry {
    pub fn command(self) -> Option<MenuCommand> {
        match self {
            MenuEntry::Command(command) => Some(command),
            MenuEntry::Separator => None,
        }
    }
}

pub const FILE_MENU_TITLE: &str = "File";

/// File メニューの項目（表示順）
pub fn file_menu() -> [MenuEntry; 6] {
    [
        MenuEntry::Command(MenuCommand::New),
        MenuEntry::Command(MenuCommand::Open),
        MenuEntry::Command(MenuCommand::Save),
        MenuEntry::Command(MenuCommand::SaveAs),
        MenuEntry::Separator,
        MenuEntry::Command(MenuCommand::Exit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_menu_order() {
        let labels: Vec<&str> = file_menu()
            .iter()
            .map(|entry| match entry {
                MenuEntry::Command(command) => command.label(),
                MenuEntry::Separator => "-",
            })
            .collect();
        assert_eq!(labels, vec!["New", "Open", "Save", "Save As", "-", "Exit"]);
    }

    #[test]
    fn ids_round_trip() {
        for command in MenuCommand::ALL {
            assert_eq!(MenuCommand::from_id(command.id()), Some(command));
        }
        assert_eq!(MenuCommand::from_id("print"), None);
    }

    #[test]
    fn shortcuts() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(MenuCommand::from_key(&ctrl('n')), Some(MenuCommand::New));
        assert_eq!(MenuCommand::from_key(&ctrl('o')), Some(MenuCommand::Open));
        assert_eq!(MenuCommand::from_key(&ctrl('s')), Some(MenuCommand::Save));
        assert_eq!(MenuCommand::from_key(&ctrl('q')), Some(MenuCommand::Exit));
        assert_eq!(
            MenuCommand::from_key(&KeyEvent::new(
                KeyCode::Char('S'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            )),
            Some(MenuCommand::SaveAs)
        );
        assert_eq!(
            MenuCommand::from_key(&KeyEvent::new(KeyCode::F(12), KeyModifiers::NONE)),
            Some(MenuCommand::SaveAs)
        );
        assert_eq!(
            MenuCommand::from_key(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)),
            None
        );
    }
}
