//! Content-Type resolution for uploaded files

/// Registrations checked before the system table.
const REGISTERED: &[(&str, &str)] = &[
    ("sld", "application/vnd.ogc.sld+xml"),
    ("ftl", "application/html"),
];

const FALLBACK: &str = "application/octet-stream";

/// Content type for a file, derived from its extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();

    REGISTERED
        .iter()
        .find(|(registered, _)| *registered == extension)
        .map(|(_, content_type)| *content_type)
        .or_else(|| mime_guess::from_path(file_name).first_raw())
        .unwrap_or(FALLBACK)
}
