pub mod gui_state;
pub mod prompt;
pub mod tui;

#[cfg(feature = "gui")]
pub mod gui;

#[cfg(feature = "gui")]
pub use gui::GuiApplication;
pub use gui_state::GuiState;
pub use prompt::PathPrompt;
pub use tui::TuiApplication;
