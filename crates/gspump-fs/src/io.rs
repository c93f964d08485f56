//! Reading source files out of the backup tree

use std::fs;

use crate::{BackupPath, Error, Result};

/// Read raw bytes from a file.
pub fn read_bytes(path: &BackupPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file.
pub fn read_text(path: &BackupPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}
