use axum::http::StatusCode;
use axum::response::IntoResponse;

#[derive(Debug, Clone)]
pub enum OrganizationError {
    Storage,
    NotFound,
    BranchNotFound,
    InvalidInput(String),
    PasswordHash,
}

impl std::fmt::Display for OrganizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage => write!(f, "Storage failure, try again"),
            Self::NotFound => write!(f, "Organization not found"),
            Self::BranchNotFound => write!(f, "Branch not found"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::PasswordHash => write!(f, "Failed to process password"),
        }
    }
}

impl std::error::Error for OrganizationError {}

impl IntoResponse for OrganizationError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::NotFound | Self::BranchNotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Storage | Self::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
