//! Audio folder scanning and file ordering

use super::config::ConstructConfig;
use anyhow::Result;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Find audio files under the configured folder, in dataset order
///
/// Hidden files and folders are skipped. The returned order defines each
/// file's `file_id`: numeric stems first, compared numerically, then the
/// rest by name.
pub fn scan_audio_files(config: &ConstructConfig) -> Result<Vec<PathBuf>> {
    let root = &config.audio_dir;
    if !root.exists() {
        anyhow::bail!("Audio folder not found: {:?}", root);
    }
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {:?}", root);
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), &config.extensions) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                log::warn!("Error accessing entry: {}", e);
            }
        }
    }

    files.sort_by(|a, b| natural_cmp(root, a, b));

    log::debug!("Found {} audio files under {:?}", files.len(), root);
    Ok(files)
}

/// Record identifier for a file: its path below the root, without extension
pub fn record_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let without_ext = relative.with_extension("");
    without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

fn natural_cmp(root: &Path, a: &Path, b: &Path) -> Ordering {
    let a_id = record_id(root, a);
    let b_id = record_id(root, b);
    match (a_id.parse::<u64>(), b_id.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a_id.cmp(&b_id).then_with(|| a.cmp(b)),
    }
}
