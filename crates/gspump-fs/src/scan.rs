//! Directory listing for the backup tree
//!
//! A missing or unreadable directory is an empty directory: backups omit
//! `styles/`, `datastores/` and friends when the server had none.

use std::fs;

use crate::BackupPath;
use crate::constants::FileKind;

/// Names of the regular files directly inside `dir`, sorted.
pub fn list_files(dir: &BackupPath) -> Vec<String> {
    list_entries(dir, |file_type| file_type.is_file())
}

/// Names of the directories directly inside `dir`, sorted.
pub fn list_subdirectories(dir: &BackupPath) -> Vec<String> {
    list_entries(dir, |file_type| file_type.is_dir())
}

/// Files in `dir` ending in `.ftl`.
pub fn template_files(dir: &BackupPath) -> Vec<String> {
    files_where(dir, |kind| kind == FileKind::Template)
}

/// Files in `dir` ending in `.sld`.
pub fn sld_files(dir: &BackupPath) -> Vec<String> {
    files_where(dir, |kind| kind == FileKind::StyleDescriptor)
}

/// Files in `dir` not ending in `.sld`.
pub fn non_sld_style_files(dir: &BackupPath) -> Vec<String> {
    files_where(dir, |kind| kind != FileKind::StyleDescriptor)
}

fn files_where(dir: &BackupPath, keep: impl Fn(FileKind) -> bool) -> Vec<String> {
    list_files(dir)
        .into_iter()
        .filter(|name| keep(FileKind::of(name)))
        .collect()
}

fn list_entries(dir: &BackupPath, keep: impl Fn(&fs::FileType) -> bool) -> Vec<String> {
    let entries = match fs::read_dir(dir.to_native()) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir, error = %e, "Directory not listable, treating as empty");
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        // Follow symlinks so a linked style directory still counts.
        let Ok(metadata) = fs::metadata(entry.path()) else {
            continue;
        };
        if !keep(&metadata.file_type()) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                tracing::warn!("Skipping non UTF-8 entry {:?} in {}", raw, dir);
            }
        }
    }
    names.sort();
    names
}
