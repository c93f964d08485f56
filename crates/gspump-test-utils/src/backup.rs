//! [`TestBackup`] builder for backup tree scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use gspump_fs::BackupPath;
use tempfile::TempDir;

/// A temporary backup tree laid out the way the dump side writes it.
///
/// # Example
///
/// ```rust,no_run
/// use gspump_test_utils::TestBackup;
///
/// let backup = TestBackup::new()
///     .workspace("sf")
///     .datastore("sf", "sf_store")
///     .featuretype("sf", "sf_store", "sf_ft");
/// assert!(backup.root().join("workspaces/sf/workspace.xml").exists());
/// ```
pub struct TestBackup {
    temp_dir: TempDir,
}

impl Default for TestBackup {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBackup {
    /// Create an empty backup root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self) -> BackupPath {
        BackupPath::new(self.root())
    }

    fn workspace_dir(&self, ws: &str) -> PathBuf {
        self.root().join("workspaces").join(ws)
    }

    fn datastore_dir(&self, ws: &str, ds: &str) -> PathBuf {
        self.workspace_dir(ws).join("datastores").join(ds)
    }

    fn featuretype_dir(&self, ws: &str, ds: &str, ft: &str) -> PathBuf {
        self.datastore_dir(ws, ds).join("featuretypes").join(ft)
    }

    /// Write `content` to `relative` (from the root), creating parents.
    pub fn write(self, relative: &str, content: &str) -> Self {
        write_file(&self.root().join(relative), content);
        self
    }

    /// Create an empty directory at `relative`.
    pub fn mkdir(self, relative: &str) -> Self {
        fs::create_dir_all(self.root().join(relative)).unwrap();
        self
    }

    pub fn global_style(self, file: &str, content: &str) -> Self {
        write_file(&self.root().join("styles").join(file), content);
        self
    }

    /// Template sitting directly in `workspaces/`.
    pub fn global_template(self, file: &str) -> Self {
        write_file(&self.root().join("workspaces").join(file), TEMPLATE);
        self
    }

    /// Workspace directory with `workspace.xml` and `namespace.xml`.
    pub fn workspace(self, ws: &str) -> Self {
        let dir = self.workspace_dir(ws);
        write_file(&dir.join("workspace.xml"), &workspace_xml(ws));
        write_file(&dir.join("namespace.xml"), &namespace_xml(ws));
        self
    }

    pub fn workspace_style(self, ws: &str, file: &str, content: &str) -> Self {
        write_file(&self.workspace_dir(ws).join("styles").join(file), content);
        self
    }

    pub fn workspace_template(self, ws: &str, file: &str) -> Self {
        write_file(&self.workspace_dir(ws).join(file), TEMPLATE);
        self
    }

    /// Datastore directory with `datastore.xml`.
    pub fn datastore(self, ws: &str, ds: &str) -> Self {
        write_file(
            &self.datastore_dir(ws, ds).join("datastore.xml"),
            &datastore_xml(ws, ds),
        );
        self
    }

    pub fn datastore_template(self, ws: &str, ds: &str, file: &str) -> Self {
        write_file(&self.datastore_dir(ws, ds).join(file), TEMPLATE);
        self
    }

    /// Feature type directory with `featuretype.xml` and `layer.xml`.
    pub fn featuretype(self, ws: &str, ds: &str, ft: &str) -> Self {
        let dir = self.featuretype_dir(ws, ds, ft);
        write_file(&dir.join("featuretype.xml"), &featuretype_xml(ws, ds, ft));
        write_file(&dir.join("layer.xml"), &layer_xml(ft));
        self
    }

    pub fn featuretype_template(self, ws: &str, ds: &str, ft: &str, file: &str) -> Self {
        write_file(&self.featuretype_dir(ws, ds, ft).join(file), TEMPLATE);
        self
    }

    /// Read a file back, relative to the root.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.root().join(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

const TEMPLATE: &str = "<#list features as feature>${feature.fid}</#list>\n";

const ATOM: &str = "xmlns:atom=\"http://www.w3.org/2005/Atom\"";

/// `workspace.xml` as exported, with an Atom-linked `dataStores` wrapper.
pub fn workspace_xml(ws: &str) -> String {
    format!(
        "<workspace>\n  <name>{ws}</name>\n  <dataStores>\n    <atom:link {ATOM} rel=\"alternate\" href=\"http://localhost:8080/geoserver/rest/workspaces/{ws}/datastores.xml\" type=\"application/xml\"/>\n  </dataStores>\n</workspace>\n"
    )
}

pub fn namespace_xml(ws: &str) -> String {
    format!(
        "<namespace>\n  <prefix>{ws}</prefix>\n  <uri>http://example.com/{ws}</uri>\n</namespace>\n"
    )
}

/// `datastore.xml` as exported, with `workspace` and `featureTypes` links.
pub fn datastore_xml(ws: &str, ds: &str) -> String {
    format!(
        "<dataStore>\n  <name>{ds}</name>\n  <enabled>true</enabled>\n  <workspace>\n    <name>{ws}</name>\n    <atom:link {ATOM} rel=\"alternate\" href=\"http://localhost:8080/geoserver/rest/workspaces/{ws}.xml\" type=\"application/xml\"/>\n  </workspace>\n  <featureTypes>\n    <atom:link {ATOM} rel=\"alternate\" href=\"http://localhost:8080/geoserver/rest/workspaces/{ws}/datastores/{ds}/featuretypes.xml\" type=\"application/xml\"/>\n  </featureTypes>\n</dataStore>\n"
    )
}

pub fn featuretype_xml(ws: &str, ds: &str, ft: &str) -> String {
    format!(
        "<featureType>\n  <name>{ft}</name>\n  <namespace>\n    <name>{ws}</name>\n  </namespace>\n  <store class=\"dataStore\">\n    <name>{ds}</name>\n  </store>\n</featureType>\n"
    )
}

pub fn layer_xml(ft: &str) -> String {
    format!(
        "<layer>\n  <name>{ft}</name>\n  <type>VECTOR</type>\n  <defaultStyle>\n    <name>point</name>\n  </defaultStyle>\n</layer>\n"
    )
}
