//! ファイルI/O操作
//!
//! UTF-8テキストファイルをそのまま読み書きする。改行コードの統一や BOM 除去は
//! 行わず、ディスク上のバイト列とバッファの内容を常に一致させる。

use crate::error::file::Result;
use crate::error::FileError;
use std::fs;
use std::path::Path;

/// ファイル全体をUTF-8テキストとして読み込み
pub fn read_text(path: &Path) -> Result<String> {
    if path.is_dir() {
        return Err(FileError::InvalidPath {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| FileError::from_io(path, &e))?;
    log::debug!("read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// テキストでファイルを上書き
///
/// 親ディレクトリは作成しない。保存先が存在しなければそのままエラーになる。
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if path.is_dir() {
        return Err(FileError::InvalidPath {
            path: path.display().to_string(),
        });
    }

    fs::write(path, content.as_bytes()).map_err(|e| FileError::from_io(path, &e))?;
    log::debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        let content = "Hello, World!\nこんにちは！";

        write_text(&file_path, content).unwrap();
        assert_eq!(read_text(&file_path).unwrap(), content);
    }

    #[test]
    fn line_endings_are_preserved() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("crlf.txt");

        fs::write(&file_path, "line1\r\nline2\rline3").unwrap();
        let content = read_text(&file_path).unwrap();
        assert_eq!(content, "line1\r\nline2\rline3");

        write_text(&file_path, &content).unwrap();
        assert_eq!(fs::read(&file_path).unwrap(), b"line1\r\nline2\rline3");
    }

    #[test]
    fn write_overwrites_existing_content() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("existing.txt");
        fs::write(&file_path, "a much longer original content").unwrap();

        write_text(&file_path, "short").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "short");
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nope.txt");

        assert!(matches!(
            read_text(&file_path),
            Err(FileError::NotFound { .. })
        ));
    }

    #[test]
    fn missing_parent_directory_fails_write() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("no").join("such").join("dir.txt");

        assert!(matches!(
            write_text(&file_path, "x"),
            Err(FileError::NotFound { .. })
        ));
        assert!(!file_path.exists());
    }

    #[test]
    fn directories_are_rejected() {
        let temp_dir = tempdir().unwrap();

        assert!(matches!(
            read_text(temp_dir.path()),
            Err(FileError::InvalidPath { .. })
        ));
        assert!(matches!(
            write_text(temp_dir.path(), "x"),
            Err(FileError::InvalidPath { .. })
        ));
    }

    #[test]
    fn non_utf8_content_is_an_encoding_error() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("latin1.txt");
        fs::write(&file_path, [0x63, 0x61, 0x66, 0xe9]).unwrap();

        assert!(matches!(
            read_text(&file_path),
            Err(FileError::Encoding { .. })
        ));
    }
}
