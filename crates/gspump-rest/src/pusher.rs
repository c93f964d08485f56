//! Per-object push protocol
//!
//! Two flavours exist. Update-only (layers, templates, SLD bodies) reads the
//! object for information and then PUTs it in place. Create-preferred (all
//! other objects) deletes an existing object, POSTs a fresh one to the
//! collection and falls back to a PUT when the server refuses the POST.

use gspump_fs::{BackupPath, io};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::client::{RestClient, RestResponse, TransportError};
use crate::content_type::content_type_for;
use crate::{Error, Result};

/// One object to push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    /// Collection path relative to the admin URL, e.g. `/workspaces`
    pub relative_url: String,
    /// Identifier of the object inside the collection
    pub object_name: String,
    /// Directory holding the source file
    pub source_dir: BackupPath,
    /// File to upload; `None` means a file named like the object
    pub source_file: Option<String>,
    /// Query parameters sent with the DELETE
    pub delete_params: Vec<(String, String)>,
    /// Strip Atom link wrappers before upload
    pub purify: bool,
    /// Use the update-only protocol
    pub update_only: bool,
}

impl PushRequest {
    pub fn new(
        relative_url: impl Into<String>,
        object_name: impl Into<String>,
        source_dir: BackupPath,
    ) -> Self {
        Self {
            relative_url: relative_url.into(),
            object_name: object_name.into(),
            source_dir,
            source_file: None,
            delete_params: Vec::new(),
            purify: false,
            update_only: false,
        }
    }

    pub fn source_file(mut self, file: impl Into<String>) -> Self {
        self.source_file = Some(file.into());
        self
    }

    pub fn delete_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.delete_params.push((key.into(), value.into()));
        self
    }

    /// Ask GeoServer to delete everything below the object too.
    pub fn recurse_on_delete(self) -> Self {
        self.delete_param("recurse", "true")
    }

    pub fn purified(mut self) -> Self {
        self.purify = true;
        self
    }

    pub fn update_only(mut self) -> Self {
        self.update_only = true;
        self
    }

    /// Name of the file that will be uploaded.
    pub fn file_name(&self) -> &str {
        self.source_file.as_deref().unwrap_or(&self.object_name)
    }

    pub fn source_path(&self) -> BackupPath {
        self.source_dir.join(self.file_name())
    }
}

/// How a push ended. Only structural problems are `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PushOutcome {
    /// POST accepted
    Created,
    /// PUT accepted by the update-only protocol
    Updated,
    /// POST refused, replacement PUT accepted
    FallbackUpdated,
    /// Final request refused or never answered
    Failed {
        /// `None` when the request got no response
        status: Option<u16>,
    },
}

impl PushOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    fn failed(status: Option<StatusCode>) -> Self {
        Self::Failed {
            status: status.map(|s| s.as_u16()),
        }
    }
}

/// Pushes backup files to a GeoServer REST endpoint.
pub struct Pusher<C> {
    client: C,
    admin_url: String,
}

impl<C: RestClient> Pusher<C> {
    /// `admin_url` is the REST root without trailing slash.
    pub fn new(client: C, admin_url: impl Into<String>) -> Self {
        Self {
            client,
            admin_url: admin_url.into(),
        }
    }

    pub fn admin_url(&self) -> &str {
        &self.admin_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Push one object.
    ///
    /// # Errors
    ///
    /// Returns an error if the source file cannot be read or, with
    /// purification requested, is not well-formed UTF-8 XML. REST failures
    /// are logged and reported as [`PushOutcome::Failed`].
    pub fn push(&self, request: &PushRequest) -> Result<PushOutcome> {
        let file_name = request.file_name();
        let body = self.load_body(request)?;
        let content_type = content_type_for(file_name);

        let collection_url = format!("{}{}", self.admin_url, request.relative_url);
        let object_url = format!("{}/{}", collection_url, request.object_name);

        info!(
            "Pushing object '{}' file '{}' from '{}' to endpoint '{}'",
            request.object_name, file_name, request.source_dir, collection_url
        );

        let outcome = if request.update_only {
            self.update(&object_url, &body, content_type)
        } else {
            self.create_or_replace(
                &collection_url,
                &object_url,
                &request.delete_params,
                &body,
                content_type,
            )
        };
        Ok(outcome)
    }

    fn load_body(&self, request: &PushRequest) -> Result<Vec<u8>> {
        let bytes = io::read_bytes(&request.source_path())?;
        if !request.purify {
            return Ok(bytes);
        }
        gspump_xml::purify_bytes(&bytes).map_err(|source| Error::Xml {
            file: request.source_path().to_string(),
            source,
        })
    }

    fn update(&self, object_url: &str, body: &[u8], content_type: &str) -> PushOutcome {
        match self.client.get(object_url) {
            Ok(response) if response.status == StatusCode::OK => {
                debug!("Existing object found, updating...");
            }
            Ok(response) if response.status == StatusCode::NOT_FOUND => {
                info!("No existing object found, attempting PUT regardless");
            }
            Ok(response) => {
                error!(
                    "Unexpected error retrieving existing data: {}, {}",
                    response.status, response.body
                );
            }
            Err(e) => {
                error!("Failed to retrieve existing data from {}: {}", object_url, e);
            }
        }

        match self.client.put(object_url, body, content_type) {
            Ok(response) if is_ok_or_created(&response) => {
                debug!("PUT successful");
                PushOutcome::Updated
            }
            other => report_failure(other),
        }
    }

    fn create_or_replace(
        &self,
        collection_url: &str,
        object_url: &str,
        delete_params: &[(String, String)],
        body: &[u8],
        content_type: &str,
    ) -> PushOutcome {
        match self.client.get(object_url) {
            Ok(response) if response.status == StatusCode::OK => {
                debug!("Existing object found, removing...");
                match self.client.delete(object_url, delete_params) {
                    Ok(response) => debug!("Delete response code: {}", response.status),
                    Err(e) => debug!("Delete of {} failed: {}", object_url, e),
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!("Failed to check for existing object at {}: {}", object_url, e);
            }
        }

        debug!("Pushing new data");
        let response = match self.client.post(collection_url, body, content_type) {
            Ok(response) => response,
            Err(e) => return report_failure(Err(e)),
        };

        match response.status {
            StatusCode::CREATED => {
                debug!(
                    "Response header location: '{}'",
                    response.location.as_deref().unwrap_or_default()
                );
                PushOutcome::Created
            }
            StatusCode::OK => PushOutcome::Created,
            StatusCode::FORBIDDEN | StatusCode::INTERNAL_SERVER_ERROR => {
                debug!("Unable to POST, assuming existing un-deleted, attempting to PUT");
                self.fallback_update(object_url, body, content_type)
            }
            _ => report_failure(Ok(response)),
        }
    }

    fn fallback_update(&self, object_url: &str, body: &[u8], content_type: &str) -> PushOutcome {
        match self.client.put(object_url, body, content_type) {
            Ok(response) if response.status == StatusCode::CREATED => {
                debug!(
                    "PUT successful, response header location: '{}'",
                    response.location.as_deref().unwrap_or_default()
                );
                PushOutcome::FallbackUpdated
            }
            Ok(response) if response.status == StatusCode::OK => {
                debug!("PUT successful");
                PushOutcome::FallbackUpdated
            }
            other => report_failure(other),
        }
    }
}

fn is_ok_or_created(response: &RestResponse) -> bool {
    response.status == StatusCode::OK || response.status == StatusCode::CREATED
}

fn report_failure(result: std::result::Result<RestResponse, TransportError>) -> PushOutcome {
    match result {
        Ok(response) => {
            error!("Error pushing data: {}, {}", response.status, response.body);
            PushOutcome::failed(Some(response.status))
        }
        Err(e) => {
            error!("Error pushing data: {}", e);
            PushOutcome::failed(None)
        }
    }
}
