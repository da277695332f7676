use axum::http::StatusCode;
use axum::response::IntoResponse;

#[derive(Debug, Clone)]
pub enum ActivityError {
    Storage,
    NotFound,
    ItemNotFound,
    InvalidInput(String),
}

impl std::fmt::Display for ActivityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage => write!(f, "Storage failure, try again"),
            Self::NotFound => write!(f, "Activity not found"),
            Self::ItemNotFound => write!(f, "Checklist item not found"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
        }
    }
}

impl std::error::Error for ActivityError {}

impl IntoResponse for ActivityError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::NotFound | Self::ItemNotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
