use astra::Response;
use thiserror::Error;

/// Errors a static file request can end in; each maps to one status code.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Server Error: {0}")]
    Io(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::Io(_) | ServerError::InternalError => 500,
        }
    }
}

/// What `server::handle` returns; errors become HTML pages in `serve`.
pub type ResultResp = Result<Response, ServerError>;
