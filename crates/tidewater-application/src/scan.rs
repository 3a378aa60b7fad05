// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Directory {0} does not exist or is not accessible")]
    PathNotFound(String),
    #[error("I/O error: {0}")]
    Io(String),
}

/// Recursively collect files under `root` whose name ends in one of `extensions`.
///
/// Extensions compare case-insensitively against the file name suffix and may
/// be given with or without a leading dot. Symlinks to regular files are
/// included; symlinked directories are not descended into. Paths come back
/// sorted so a run visits files in a stable order.
pub fn scan_audio_files(
    root: impl AsRef<Path>,
    extensions: &[String],
) -> Result<Vec<PathBuf>, ScanError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ScanError::PathNotFound(root.display().to_string()));
    }

    let suffixes: Vec<String> = extensions
        .iter()
        .map(|ext| format!(".{}", ext.trim_start_matches('.').to_lowercase()))
        .collect();

    let entries = fs::read_dir(root).map_err(|err| ScanError::Io(err.to_string()))?;
    let mut scanned = Vec::new();
    visit_entries(entries, &suffixes, &mut scanned);
    scanned.sort();
    Ok(scanned)
}

fn visit_entries(entries: fs::ReadDir, suffixes: &[String], scanned: &mut Vec<PathBuf>) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(target: "import", error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                warn!(target: "import", path = %path.display(), error = %err, "skipping entry");
                continue;
            }
        };

        if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(target) if target.is_file() => {}
                Ok(_) => continue,
                Err(err) => {
                    warn!(target: "import", path = %path.display(), error = %err, "skipping dangling symlink");
                    continue;
                }
            }
        } else if file_type.is_dir() {
            match fs::read_dir(&path) {
                Ok(children) => visit_entries(children, suffixes, scanned),
                Err(err) => {
                    warn!(target: "import", path = %path.display(), error = %err, "skipping unreadable directory");
                }
            }
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_lowercase();
        if suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())) {
            scanned.push(path);
        }
    }
}
