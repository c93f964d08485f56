//! Fixed names of the backup tree layout.

/// Extension of FreeMarker template files.
pub const TEMPLATE_EXTENSION: &str = "ftl";

/// Extension of Styled Layer Descriptor files.
pub const SLD_EXTENSION: &str = "sld";

/// Directories named after the plural of the object kind they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupDir {
    /// `styles/` (global or per workspace)
    Styles,
    /// `workspaces/` at the backup root
    Workspaces,
    /// `datastores/` inside a workspace
    Datastores,
    /// `featuretypes/` inside a datastore
    FeatureTypes,
}

impl BackupDir {
    /// Get the directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Styles => "styles",
            Self::Workspaces => "workspaces",
            Self::Datastores => "datastores",
            Self::FeatureTypes => "featuretypes",
        }
    }
}

impl std::fmt::Display for BackupDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// XML descriptors written by the dump side, one per object directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFile {
    Workspace,
    Namespace,
    Datastore,
    FeatureType,
    Layer,
}

impl DescriptorFile {
    /// Get the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workspace => "workspace.xml",
            Self::Namespace => "namespace.xml",
            Self::Datastore => "datastore.xml",
            Self::FeatureType => "featuretype.xml",
            Self::Layer => "layer.xml",
        }
    }
}

impl std::fmt::Display for DescriptorFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of loose files found next to descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `*.ftl`
    Template,
    /// `*.sld`
    StyleDescriptor,
    Other,
}

impl FileKind {
    /// Classify a file by its name.
    ///
    /// Matching is on the literal suffix, so `x.SLD` is `Other`.
    pub fn of(file_name: &str) -> Self {
        if has_extension(file_name, TEMPLATE_EXTENSION) {
            Self::Template
        } else if has_extension(file_name, SLD_EXTENSION) {
            Self::StyleDescriptor
        } else {
            Self::Other
        }
    }
}

fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name
        .strip_suffix(extension)
        .is_some_and(|stem| stem.ends_with('.'))
}
