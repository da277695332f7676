use axum::http::StatusCode;
use axum::response::IntoResponse;

#[derive(Debug, Clone)]
pub enum ExportError {
    Storage,
    NothingToExport,
    RenderFailed(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage => write!(f, "Storage failure, try again"),
            Self::NothingToExport => write!(f, "Nothing to export"),
            Self::RenderFailed(msg) => write!(f, "Export failed: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl IntoResponse for ExportError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::NothingToExport => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage | Self::RenderFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
