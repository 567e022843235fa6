//! 起動オプション
//!
//! `textpad [--tui | --gui] [--debug-log [PATH]]`
//! 未知の引数は無視する。

use crate::error::{OptionsError, Result};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Tui,
    Gui,
}

impl Default for RunMode {
    fn default() -> Self {
        if cfg!(feature = "gui") {
            RunMode::Gui
        } else {
            RunMode::Tui
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: RunMode,
    /// JSON Lines 形式のログ出力先
    pub debug_log: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            debug_log: None,
        }
    }
}

impl RunOptions {
    /// プロセス引数から構築
    pub fn from_env() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Ok(Self::parse(&args)?)
    }

    pub fn parse(args: &[String]) -> std::result::Result<Self, OptionsError> {
        let mut options = RunOptions::default();

        let mut iter = args.iter().peekable();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--tui" => options.mode = RunMode::Tui,
                "--gui" => {
                    if !cfg!(feature = "gui") {
                        return Err(OptionsError::FeatureDisabled { flag: arg.clone() });
                    }
                    options.mode = RunMode::Gui;
                }
                "--debug-log" => {
                    let path = iter
                        .next_if(|next| !next.starts_with('-'))
                        .map(PathBuf::from)
                        .or_else(default_log_path)
                        .unwrap_or_else(|| PathBuf::from("debug.log"));
                    options.debug_log = Some(path);
                }
                other => log::debug!("ignoring argument {:?}", other),
            }
        }

        Ok(options)
    }

    /// デバッグログ指定時は Debug、それ以外は Info
    pub fn log_level(&self) -> LevelFilter {
        if self.debug_log.is_some() {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// `--debug-log` にパスがない場合の出力先（`~/.textpad-log/debug.log`）
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".textpad-log").join("debug.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let options = RunOptions::parse(&[]).unwrap();
        assert_eq!(options, RunOptions::default());
        assert_eq!(options.debug_log, None);
        assert_eq!(options.log_level(), LevelFilter::Info);
    }

    #[test]
    fn tui_flag() {
        let options = RunOptions::parse(&args(&["--tui"])).unwrap();
        assert_eq!(options.mode, RunMode::Tui);
    }

    #[test]
    fn debug_log_with_path() {
        let options = RunOptions::parse(&args(&["--debug-log", "/tmp/textpad.log", "--tui"])).unwrap();
        assert_eq!(options.debug_log, Some(PathBuf::from("/tmp/textpad.log")));
        assert_eq!(options.mode, RunMode::Tui);
        assert_eq!(options.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn debug_log_without_path_uses_default() {
        let options = RunOptions::parse(&args(&["--debug-log", "--tui"])).unwrap();
        let path = options.debug_log.unwrap();
        assert!(path.ends_with("debug.log"));
        assert_eq!(options.mode, RunMode::Tui);
    }

    #[test]
    fn unknown_arguments_are_ignored() {
        let options = RunOptions::parse(&args(&["--log-level", "debug", "--frobnicate"])).unwrap();
        assert_eq!(options, RunOptions::default());
    }

    #[cfg(not(feature = "gui"))]
    #[test]
    fn gui_flag_requires_feature() {
        assert!(matches!(
            RunOptions::parse(&args(&["--gui"])),
            Err(OptionsError::FeatureDisabled { .. })
        ));

        let error: crate::error::TextpadError = OptionsError::FeatureDisabled {
            flag: "--gui".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Invalid options: --gui requires the `gui` feature"
        );
    }
}
