use anyhow::Context;
use textpad::logging::build_logger;
use textpad::{error, RunMode, RunOptions, TuiApplication};
#[cfg(feature = "gui")]
use textpad::GuiApplication;

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let options = RunOptions::from_env().context("failed to parse command line")?;
    init_logging(&options)?;
    log::info!(
        "textpad {} starting in {:?} mode",
        env!("CARGO_PKG_VERSION"),
        options.mode
    );

    match options.mode {
        RunMode::Tui => run_tui()?,
        RunMode::Gui => run_gui()?,
    }

    log::info!("textpad exited");
    log::logger().flush();
    Ok(())
}

fn init_logging(options: &RunOptions) -> anyhow::Result<()> {
    // 端末版では stderr に書くと画面が崩れる
    let stderr = options.mode == RunMode::Gui;
    build_logger(options.log_level(), options.debug_log.as_deref(), stderr)
        .and_then(|logger| logger.install())
        .context("failed to initialize logging")
}

fn run_tui() -> anyhow::Result<()> {
    let mut app = TuiApplication::new();
    app.run().context("terminal frontend failed")
}

#[cfg(feature = "gui")]
fn run_gui() -> anyhow::Result<()> {
    let mut app = GuiApplication::new().context("failed to create the window")?;
    app.run().context("GUI frontend failed")
}

#[cfg(not(feature = "gui"))]
fn run_gui() -> anyhow::Result<()> {
    anyhow::bail!("this build does not include the GUI frontend (enable the `gui` feature)")
}
