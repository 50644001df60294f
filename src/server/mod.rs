pub mod responses;
pub mod router;
pub mod static_files;

pub use router::{handle, ServerState};

use crate::config::ServerConfig;
use astra::Server;

/// Serves `config.root_dir` until the process is stopped.
pub fn serve(config: &ServerConfig) -> std::io::Result<()> {
    let addr = config.addr();
    let state = ServerState {
        root_dir: config.root_dir.clone(),
        config_key: config.config_key.clone(),
    };

    tracing::info!("Static server running at http://{addr}/");
    tracing::info!("Serving files from: {}", state.root_dir.display());

    Server::bind(&addr)
        .max_workers(8)
        .serve(move |req, _info| match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => responses::html_error_response(&err),
        })
}
