//! Pushing backup files into GeoServer through the REST configuration API
//!
//! [`Pusher`] implements the per-object protocol (existence check, delete
//! then create, or update in place) on top of any [`RestClient`].
//! [`HttpRestClient`] is the production client.

pub mod client;
pub mod config;
pub mod content_type;
pub mod error;
pub mod pusher;

pub use client::{HttpRestClient, RestClient, RestResponse, TransportError};
pub use config::ServerConfig;
pub use content_type::content_type_for;
pub use error::{Error, Result};
pub use pusher::{PushOutcome, PushRequest, Pusher};
pub use reqwest::StatusCode;
