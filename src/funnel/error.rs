use axum::http::StatusCode;
use axum::response::IntoResponse;

#[derive(Debug, Clone)]
pub enum FunnelError {
    Storage,
    NotFound,
    StageNotFound,
    InvalidInput(String),
    StageFloor,
    StageInUse,
}

impl std::fmt::Display for FunnelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage => write!(f, "Storage failure, try again"),
            Self::NotFound => write!(f, "Funnel not found"),
            Self::StageNotFound => write!(f, "Stage not found"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::StageFloor => write!(f, "A funnel must keep at least 2 stages"),
            Self::StageInUse => write!(f, "Stage still has leads; move them first"),
        }
    }
}

impl std::error::Error for FunnelError {}

impl IntoResponse for FunnelError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::NotFound | Self::StageNotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) | Self::StageFloor => StatusCode::BAD_REQUEST,
            Self::StageInUse => StatusCode::CONFLICT,
            Self::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
