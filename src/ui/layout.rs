//! TUIレイアウト管理
//!
//! メニューバー（上1行）、テキストエリア（中央）、ステータスライン（下1行）

use ratatui::layout::{Constraint, Layout, Rect};

/// 画面全体のレイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub menu_bar: Rect,
    pub editor: Rect,
    pub status_line: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Self {
        let [menu_bar, editor, status_line] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            menu_bar,
            editor,
            status_line,
        }
    }
}

/// 領域の中央に置くダイアログの矩形（画面からはみ出さないよう縮める）
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// メニューのドロップダウン領域（メニューバーの直下）
pub fn dropdown_rect(area: Rect, width: u16, height: u16) -> Rect {
    let y = area.y + 1;
    let available = area.height.saturating_sub(1);
    Rect::new(area.x, y, width.min(area.width), height.min(available))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_splits_rows() {
        let layout = AppLayout::calculate(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.menu_bar, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.editor, Rect::new(0, 1, 80, 22));
        assert_eq!(layout.status_line, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(area, 40, 6), Rect::new(20, 9, 40, 6));
        assert_eq!(centered_rect(Rect::new(0, 0, 20, 4), 40, 6), Rect::new(0, 0, 20, 4));
    }

    #[test]
    fn dropdown_sits_below_menu_bar() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(dropdown_rect(area, 24, 8), Rect::new(0, 1, 24, 8));
        assert_eq!(dropdown_rect(Rect::new(0, 0, 10, 4), 24, 8), Rect::new(0, 1, 10, 3));
    }
}
