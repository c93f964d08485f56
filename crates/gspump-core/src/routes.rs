//! REST collection paths, relative to the admin URL.

pub const STYLES: &str = "/styles";
pub const TEMPLATES: &str = "/templates";
pub const WORKSPACES: &str = "/workspaces";
pub const NAMESPACES: &str = "/namespaces";
pub const LAYERS: &str = "/layers";

pub fn workspace(ws: &str) -> String {
    format!("{}/{}", WORKSPACES, ws)
}

pub fn workspace_styles(ws: &str) -> String {
    format!("{}/styles", workspace(ws))
}

pub fn workspace_templates(ws: &str) -> String {
    format!("{}/templates", workspace(ws))
}

pub fn datastores(ws: &str) -> String {
    format!("{}/datastores", workspace(ws))
}

pub fn datastore_templates(ws: &str, ds: &str) -> String {
    format!("{}/{}/templates", datastores(ws), ds)
}

pub fn featuretypes(ws: &str, ds: &str) -> String {
    format!("{}/{}/featuretypes", datastores(ws), ds)
}

pub fn featuretype_templates(ws: &str, ds: &str, ft: &str) -> String {
    format!("{}/{}/templates", featuretypes(ws, ds), ft)
}
