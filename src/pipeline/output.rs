//! Writing documents and reports into the output directory.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

use super::TagRecord;

/// File name of the per-document tag report.
pub const TAGS_FILE: &str = "tags.json";

/// File name of the corpus word-frequency report.
pub const WORDS_FILE: &str = "words.json";

/// How a document reaches the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Byte copy
    Copy,
    /// Symbolic link to the absolute source path
    Symlink,
}

impl Placement {
    /// Place `source` at `destination`.
    ///
    /// An existing file at `destination` is replaced. Placing a file onto
    /// itself is a no-op.
    pub fn place(self, source: &Path, destination: &Path) -> Result<()> {
        if same_file(source, destination) {
            log::debug!("{} is already in place", destination.display());
            return Ok(());
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        match self {
            Self::Copy => {
                fs::copy(source, destination)?;
            },
            Self::Symlink => {
                let target = source.canonicalize()?;
                if destination.symlink_metadata().is_ok() {
                    fs::remove_file(destination)?;
                }
                symlink(&target, destination)?;
            },
        }
        Ok(())
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link)?;
    Ok(())
}

#[cfg(not(unix))]
fn symlink(target: &Path, _link: &Path) -> Result<()> {
    Err(crate::error::Error::Unsupported(format!(
        "cannot link to {}: symlinks are only supported on unix",
        target.display()
    )))
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write recovered text next to the placed document.
pub fn write_text(destination: &Path, text: &str) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, text)?;
    Ok(())
}

/// Pretty-print `value` as JSON into `path`.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write `tags.json` and `words.json` into `output_dir`.
///
/// Returns the paths written, tags first.
pub fn write_reports(
    output_dir: &Path,
    tags: &BTreeMap<String, TagRecord>,
    words: &BTreeMap<String, u64>,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(output_dir)?;

    let tags_path = output_dir.join(TAGS_FILE);
    write_json(&tags_path, tags)?;

    let words_path = output_dir.join(WORDS_FILE);
    write_json(&words_path, words)?;

    log::info!(
        "Wrote {} tag records and {} words to {}",
        tags.len(),
        words.len(),
        output_dir.display()
    );
    Ok((tags_path, words_path))
}
