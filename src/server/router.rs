use crate::errors::{ResultResp, ServerError};
use crate::server::responses::json_response;
use crate::server::static_files::serve_file;
use astra::Request;
use serde::Serialize;
use std::path::PathBuf;

/// What every request handler can see.
#[derive(Clone)]
pub struct ServerState {
    pub root_dir: PathBuf,
    pub config_key: String,
}

#[derive(Serialize)]
struct ConfigKeyBody<'a> {
    key: &'a str,
}

pub fn handle(req: Request, state: &ServerState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    tracing::info!("{method} {}", req.uri());

    match (method, path) {
        ("GET", "/api/config-key") => json_response(&ConfigKeyBody {
            key: &state.config_key,
        }),
        ("GET", "/") => serve_file(&state.root_dir, "index.html"),
        ("GET", _) => serve_file(&state.root_dir, path),
        _ => Err(ServerError::MethodNotAllowed),
    }
}
