//! Filesystem side of gspump
//!
//! Resolves paths inside a GeoServer backup tree, lists its entries and
//! loads configuration files.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod scan;

pub use config::ConfigStore;
pub use constants::{BackupDir, DescriptorFile, FileKind};
pub use error::{Error, Result};
pub use path::BackupPath;
pub use scan::{list_files, list_subdirectories};
