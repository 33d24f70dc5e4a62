//! Packs a user's results folder into a single archive for hand-off.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Results folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Writes `<folder>/<name>.zip` holding every regular file in `folder`.
///
/// Sub-folders are included with their relative paths. An existing archive
/// of the same name is replaced and never archived into itself.
pub fn zip_results(folder: impl AsRef<Path>, name: &str) -> Result<PathBuf, ArchiveError> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Err(ArchiveError::FolderNotFound(folder.to_path_buf()));
    }
    let archive_path = folder.join(format!("{}.zip", name));

    let mut files = Vec::new();
    collect_files(folder, &mut files)?;
    files.retain(|p| p != &archive_path);
    files.sort();

    let mut zip = ZipWriter::new(File::create(&archive_path)?);
    let options = SimpleFileOptions::default();
    for path in &files {
        let relative = path.strip_prefix(folder).unwrap_or(path);
        let entry_name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        zip.start_file(entry_name, options)?;
        zip.write_all(&fs::read(path)?)?;
    }
    zip.finish()?;

    log::info!(
        "Archived {} result file(s) into '{}'",
        files.len(),
        archive_path.display()
    );
    Ok(archive_path)
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}
