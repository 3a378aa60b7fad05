// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Plain-text log of files that could not be imported, one
/// `"<path> | <reason>"` line per failure.
///
/// The file is truncated once when the log is created; each append opens,
/// writes and closes it again.
#[derive(Debug, Clone)]
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        File::create(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, file: &Path, reason: &str) -> io::Result<()> {
        let mut log = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(log, "{} | {}", file.display(), reason)
    }
}
