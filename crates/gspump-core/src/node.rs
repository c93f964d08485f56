//! Pushable units of a backup tree

use gspump_fs::{BackupPath, DescriptorFile, FileKind};
use gspump_rest::PushRequest;
use serde::{Deserialize, Serialize};

use crate::routes;

/// Kind of GeoServer object a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Workspace,
    Namespace,
    Datastore,
    FeatureType,
    Layer,
    Style,
    Template,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Namespace => "namespace",
            Self::Datastore => "datastore",
            Self::FeatureType => "featuretype",
            Self::Layer => "layer",
            Self::Style => "style",
            Self::Template => "template",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One object to restore: where it goes and which file holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNode {
    pub kind: NodeKind,
    /// Collection path relative to the admin URL
    pub relative_url: String,
    /// Identifier inside the collection
    pub object_name: String,
    pub source_dir: BackupPath,
    pub source_file: String,
}

impl ConfigNode {
    /// Descriptor-backed node; the object is addressed as `{name}.xml`.
    fn descriptor(
        kind: NodeKind,
        relative_url: String,
        name: &str,
        dir: &BackupPath,
        file: DescriptorFile,
    ) -> Self {
        Self {
            kind,
            relative_url,
            object_name: format!("{}.xml", name),
            source_dir: dir.clone(),
            source_file: file.as_str().to_string(),
        }
    }

    /// Node whose file name doubles as object name.
    fn loose_file(kind: NodeKind, relative_url: String, dir: &BackupPath, file: &str) -> Self {
        Self {
            kind,
            relative_url,
            object_name: file.to_string(),
            source_dir: dir.clone(),
            source_file: file.to_string(),
        }
    }

    pub fn workspace(ws: &str, dir: &BackupPath) -> Self {
        Self::descriptor(
            NodeKind::Workspace,
            routes::WORKSPACES.to_string(),
            ws,
            dir,
            DescriptorFile::Workspace,
        )
    }

    pub fn namespace(ws: &str, dir: &BackupPath) -> Self {
        Self::descriptor(
            NodeKind::Namespace,
            routes::NAMESPACES.to_string(),
            ws,
            dir,
            DescriptorFile::Namespace,
        )
    }

    pub fn datastore(ds: &str, ws: &str, dir: &BackupPath) -> Self {
        Self::descriptor(
            NodeKind::Datastore,
            routes::datastores(ws),
            ds,
            dir,
            DescriptorFile::Datastore,
        )
    }

    pub fn featuretype(ft: &str, ds: &str, ws: &str, dir: &BackupPath) -> Self {
        Self::descriptor(
            NodeKind::FeatureType,
            routes::featuretypes(ws, ds),
            ft,
            dir,
            DescriptorFile::FeatureType,
        )
    }

    pub fn layer(ft: &str, dir: &BackupPath) -> Self {
        Self::descriptor(
            NodeKind::Layer,
            routes::LAYERS.to_string(),
            ft,
            dir,
            DescriptorFile::Layer,
        )
    }

    pub fn style(relative_url: String, dir: &BackupPath, file: &str) -> Self {
        Self::loose_file(NodeKind::Style, relative_url, dir, file)
    }

    pub fn template(relative_url: String, dir: &BackupPath, file: &str) -> Self {
        Self::loose_file(NodeKind::Template, relative_url, dir, file)
    }

    pub fn source_path(&self) -> BackupPath {
        self.source_dir.join(&self.source_file)
    }

    /// Whether the node must be updated in place rather than recreated.
    pub fn is_update_only(&self) -> bool {
        match self.kind {
            NodeKind::Layer | NodeKind::Template => true,
            NodeKind::Style => FileKind::of(&self.source_file) == FileKind::StyleDescriptor,
            _ => false,
        }
    }

    /// Build the push request with the per-kind protocol flags.
    pub fn to_request(&self) -> PushRequest {
        let request = PushRequest::new(
            self.relative_url.clone(),
            self.object_name.clone(),
            self.source_dir.clone(),
        )
        .source_file(self.source_file.clone());

        let request = match self.kind {
            NodeKind::Workspace | NodeKind::Datastore => request.recurse_on_delete().purified(),
            NodeKind::Namespace => request.purified(),
            _ => request,
        };

        if self.is_update_only() {
            request.update_only()
        } else {
            request
        }
    }
}
