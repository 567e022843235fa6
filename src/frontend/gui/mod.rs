#![cfg(feature = "gui")]

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, TextpadError, UiError};
use crate::file;
use crate::frontend::gui_state::GuiState;
use crate::menu::MenuCommand;
use slint::{ComponentHandle, ModelRc, SharedString, StandardListViewItem, VecModel};

mod components;
use components::AppWindow;

pub struct GuiApplication {
    state: Rc<RefCell<GuiState>>,
    window: AppWindow,
}

impl GuiApplication {
    pub fn new() -> Result<Self> {
        let state = Rc::new(RefCell::new(GuiState::new()));
        let window = AppWindow::new().map_err(gui_error)?;
        Ok(Self { state, window })
    }

    pub fn run(&mut self) -> Result<()> {
        self.setup_callbacks();
        if let Ok(state) = self.state.try_borrow() {
            sync_window(&self.window.as_weak(), &state, true);
        }

        self.window.show().map_err(gui_error)?;
        slint::run_event_loop().map_err(gui_error)?;
        Ok(())
    }

    fn setup_callbacks(&mut self) {
        let state_rc = self.state.clone();
        let window_weak = self.window.as_weak();
        self.window.on_menu_activated(move |id| {
            let Some(command) = MenuCommand::from_id(id.as_str()) else {
                log::warn!("unknown menu item: {}", id);
                return;
            };
            update(&state_rc, &window_weak, |state| state.activate(command));
        });

        let state_rc = self.state.clone();
        self.window.on_text_edited(move |text| {
            if let Ok(mut state) = state_rc.try_borrow_mut() {
                state.sync_text(text.as_str());
            }
        });

        let state_rc = self.state.clone();
        let window_weak = self.window.as_weak();
        self.window.on_prompt_edited(move |input| {
            update(&state_rc, &window_weak, |state| {
                state.edit_prompt(input.as_str());
                false
            });
        });

        let state_rc = self.state.clone();
        let window_weak = self.window.as_weak();
        self.window.on_prompt_filter_selected(move |index| {
            update(&state_rc, &window_weak, |state| {
                state.select_filter(usize::try_from(index).unwrap_or(0));
                false
            });
        });

        let state_rc = self.state.clone();
        let window_weak = self.window.as_weak();
        self.window.on_prompt_candidate_chosen(move |index| {
            let Ok(index) = usize::try_from(index) else {
                return;
            };
            update(&state_rc, &window_weak, |state| {
                state.choose_candidate(index);
                false
            });
        });

        let state_rc = self.state.clone();
        let window_weak = self.window.as_weak();
        self.window.on_prompt_accepted(move |input| {
            update(&state_rc, &window_weak, |state| state.accept_prompt(input.as_str()));
        });

        let state_rc = self.state.clone();
        let window_weak = self.window.as_weak();
        self.window.on_prompt_cancelled(move || {
            update(&state_rc, &window_weak, GuiState::cancel_prompt);
        });

        let state_rc = self.state.clone();
        let window_weak = self.window.as_weak();
        self.window.on_alert_dismissed(move || {
            update(&state_rc, &window_weak, |state| {
                state.dismiss_alert();
                false
            });
        });
    }
}

/// 状態を更新してウィンドウへ反映（戻り値はテキストを置き換えるかどうか）
fn update(
    state_rc: &Rc<RefCell<GuiState>>,
    window: &slint::Weak<AppWindow>,
    action: impl FnOnce(&mut GuiState) -> bool,
) {
    let Ok(mut state) = state_rc.try_borrow_mut() else {
        return;
    };
    let replace_text = action(&mut state);
    sync_window(window, &state, replace_text);
}

/// ウィンドウへ状態を反映
///
/// テキストの書き戻しはカーソル位置が失われるため、内容が置き換わった時だけ行う。
fn sync_window(window: &slint::Weak<AppWindow>, state: &GuiState, replace_text: bool) {
    if !state.is_running() {
        slint::quit_event_loop().ok();
        return;
    }
    let Some(app) = window.upgrade() else {
        return;
    };

    app.set_window_title(SharedString::from(state.editor().window_title()));
    if replace_text {
        app.set_text(SharedString::from(state.editor().buffer().text()));
    }

    match state.prompt() {
        Some(prompt) => {
            app.set_prompt_title(SharedString::from(prompt.title()));
            if app.get_prompt_path().as_str() != prompt.input {
                app.set_prompt_path(SharedString::from(prompt.input.as_str()));
            }

            let labels: Vec<SharedString> = prompt
                .request
                .filters
                .iter()
                .map(|filter| SharedString::from(filter.description()))
                .collect();
            app.set_prompt_filter_labels(ModelRc::new(VecModel::from(labels)));
            app.set_prompt_filter_index(i32::try_from(prompt.filter_index()).unwrap_or(0));

            let candidates: Vec<StandardListViewItem> = prompt
                .candidates()
                .iter()
                .map(|candidate| StandardListViewItem::from(file::candidate_label(candidate)))
                .collect();
            app.set_prompt_candidates(ModelRc::new(VecModel::from(candidates)));
            app.set_prompt_visible(true);
        }
        None => app.set_prompt_visible(false),
    }

    match state.alert() {
        Some(alert) => {
            app.set_alert_title(SharedString::from(alert.title.as_str()));
            app.set_alert_message(SharedString::from(alert.message.as_str()));
            app.set_alert_visible(true);
        }
        None => app.set_alert_visible(false),
    }
}

fn gui_error(err: impl std::fmt::Display) -> TextpadError {
    TextpadError::Ui(UiError::RenderingFailed {
        component: format!("GUI: {}", err),
    })
}
