//! パス補完
//!
//! パス入力欄の文字列から、同じディレクトリにある候補を列挙する。
//! ディレクトリは常に候補に含め（末尾に `/`）、ファイルは選択中の
//! フィルターに一致するものだけを返す。

use crate::dialog::FileFilter;
use crate::file::path::expand_input;
use std::env;
use std::fs;
use std::path::Path;

/// 入力に続く補完候補（入力のディレクトリ部分はそのまま残す）
///
/// 隠しファイルは入力が `.` で始まる時だけ候補にする。
pub fn complete(input: &str, filter: &FileFilter) -> Vec<String> {
    let (dir_part, prefix) = match input.rfind('/') {
        Some(index) => input.split_at(index + 1),
        None => ("", input),
    };

    let directory = if dir_part.is_empty() {
        env::current_dir().ok()
    } else {
        expand_input(dir_part)
    };
    let Some(directory) = directory else {
        return Vec::new();
    };

    let entries = match fs::read_dir(&directory) {
        Ok(entries) => entries,
        Err(err) => {
            log::debug!("cannot list {}: {}", directory.display(), err);
            return Vec::new();
        }
    };

    let show_hidden = prefix.starts_with('.');
    let mut candidates: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(prefix) || (!show_hidden && name.starts_with('.')) {
                return None;
            }
            if entry.path().is_dir() {
                Some(format!("{}{}/", dir_part, name))
            } else if filter.matches(Path::new(&name)) {
                Some(format!("{}{}", dir_part, name))
            } else {
                None
            }
        })
        .collect();

    candidates.sort();
    candidates
}

/// 全候補に共通する先頭部分
pub fn common_prefix(candidates: &[String]) -> String {
    let Some((first, rest)) = candidates.split_first() else {
        return String::new();
    };

    let mut end = first.len();
    for candidate in rest {
        end = first
            .char_indices()
            .zip(candidate.chars())
            .take_while(|((_, a), b)| a == b)
            .map(|((index, ch), _)| index + ch.len_utf8())
            .last()
            .unwrap_or(0)
            .min(end);
    }
    first[..end].to_string()
}

/// 候補の表示名（最後のコンポーネント、ディレクトリは `/` 付き）
pub fn candidate_label(candidate: &str) -> &str {
    let trimmed = candidate.strip_suffix('/').unwrap_or(candidate);
    match trimmed.rfind('/') {
        Some(index) => &candidate[index + 1..],
        None => candidate,
    }
}
