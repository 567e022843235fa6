//! UIモジュール
//!
//! ratatuiベースのターミナルUI描画

pub mod layout;
pub mod renderer;

// 公開API
pub use layout::{centered_rect, AppLayout};
pub use renderer::{Overlay, PromptView, Renderer, ScreenView};
