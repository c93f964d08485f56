//! Shared test utilities for the gspump workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`backup`] - [`TestBackup`] builder for on-disk backup trees
//! - [`rest`] - [`MockRestClient`] with scripted statuses and a call log

pub mod backup;
pub mod rest;

pub use backup::TestBackup;
pub use rest::{MockRestClient, RecordedCall, Verb};
