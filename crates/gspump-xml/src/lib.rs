//! XML sanitization for GeoServer REST descriptors
//!
//! GeoServer decorates exported descriptors with Atom links that point at
//! child collections (`<featureTypes><atom:link .../></featureTypes>`).
//! Posting such a descriptor before its children exist is rejected, so the
//! wrappers are cut before upload and the server recreates them later.

pub mod error;
pub mod purify;

pub use error::{Error, Result};
pub use purify::{ATOM_NAMESPACE, link_wrappers, purify, purify_bytes};
