// src/server/static_files.rs

use crate::errors::{ResultResp, ServerError};
use crate::server::responses::file_response;
use mime::Mime;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Maps a request path onto a file under `root`.
///
/// Only plain path segments are accepted, so `..` and friends never escape
/// the root.
pub fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

pub fn serve_file(root: &Path, request_path: &str) -> ResultResp {
    let path = resolve(root, request_path).ok_or(ServerError::NotFound)?;

    match std::fs::read(&path) {
        Ok(bytes) => file_response(bytes, &content_type_for(&path)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ServerError::NotFound),
        Err(e) => {
            tracing::error!("Failed to read {}: {e}", path.display());
            Err(ServerError::Io(e.kind().to_string()))
        }
    }
}

pub fn content_type_for(path: &Path) -> Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "html" => mime::TEXT_HTML,
        "css" => mime::TEXT_CSS,
        "js" => mime::APPLICATION_JAVASCRIPT,
        "json" => mime::APPLICATION_JSON,
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "svg" => mime::IMAGE_SVG,
        "ico" => "image/x-icon"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
