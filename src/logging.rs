//! ロギングシステム
//!
//! `log` クレートの出力先。標準エラー出力と JSON Lines ファイルに書き出す。
//! 端末フロントエンドでは画面が崩れるため標準エラー出力を使わない。

use crate::error::{Result, TextpadError};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// ロガー
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
    output_stderr: bool,
    output_file: Option<Mutex<File>>,
    log_path: Option<PathBuf>,
}

#[derive(Serialize)]
struct LogRecord<'a> {
    timestamp: String,
    level: &'a str,
    target: &'a str,
    message: String,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            output_stderr: true,
            output_file: None,
            log_path: None,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// 標準エラー出力を無効化
    pub fn without_stderr(mut self) -> Self {
        self.output_stderr = false;
        self
    }

    /// ファイル出力を設定（既存内容は切り詰める）
    pub fn with_file_output(mut self, path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        self.output_file = Some(Mutex::new(file));
        self.log_path = Some(path.to_path_buf());
        Ok(self)
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// グローバルロガーとして登録
    pub fn install(self) -> Result<()> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))
            .map_err(|err| TextpadError::Logging(err.to_string()))?;
        log::set_max_level(level);
        Ok(())
    }

    fn write_file(&self, record: &Record) {
        let Some(file) = &self.output_file else {
            return;
        };
        let entry = LogRecord {
            timestamp: current_timestamp(),
            level: record.level().as_str(),
            target: record.target(),
            message: record.args().to_string(),
        };
        let Ok(line) = serde_json::to_string(&entry) else {
            return;
        };
        if let Ok(mut file) = file.lock() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        if self.output_stderr {
            let tag = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARNING",
                Level::Info => "INFO",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };
            eprintln!("{}: {} in {}", tag, record.args(), record.target());
        }

        self.write_file(record);
    }

    fn flush(&self) {
        if let Some(file) = &self.output_file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// 起動オプションに従ってロガーを組み立てる
///
/// ログファイル指定がない端末モードでは何も出力しない。
pub fn build_logger(level: LevelFilter, debug_log: Option<&Path>, stderr: bool) -> Result<Logger> {
    let mut logger = Logger::new(level);
    if !stderr {
        logger = logger.without_stderr();
    }
    if let Some(path) = debug_log {
        logger = logger.with_file_output(path).map_err(|err| {
            TextpadError::Logging(format!("cannot open {}: {}", path.display(), err))
        })?;
    } else if !stderr {
        logger.level = LevelFilter::Off;
    }
    Ok(logger)
}

pub fn current_timestamp() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => format!("{}.{:09}", duration.as_secs(), duration.subsec_nanos()),
        Err(_) => "0.0".to_string(),
    }
}
