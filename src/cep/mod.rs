//! Postal-code (CEP) lookup against ViaCEP. Best effort: one attempt, no
//! retry; callers apply the result or continue without it.

use crate::shared::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_CEP_BASE_URL: &str = "https://viacep.com.br";

#[derive(Debug, Clone)]
pub enum CepError {
    InvalidCep,
    LookupFailed,
    NotFound,
}

impl std::fmt::Display for CepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCep => write!(f, "CEP must have 8 digits"),
            Self::LookupFailed => write!(f, "CEP lookup failed, try again"),
            Self::NotFound => write!(f, "CEP not found"),
        }
    }
}

impl std::error::Error for CepError {}

impl IntoResponse for CepError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::InvalidCep => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::LookupFailed => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CepAddress {
    pub cep: String,
    pub address: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    cep: Option<String>,
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct CepClient {
    http: reqwest::Client,
    base_url: String,
}

impl CepClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn lookup(&self, cep: &str) -> Result<CepAddress, CepError> {
        let digits: String = cep.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != 8 {
            return Err(CepError::InvalidCep);
        }

        let url = format!("{}/ws/{digits}/json/", self.base_url);
        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!("CEP lookup request failed: {e}");
            CepError::LookupFailed
        })?;
        if !response.status().is_success() {
            warn!("CEP lookup returned status {}", response.status());
            return Err(CepError::LookupFailed);
        }

        let body: ViaCepResponse = response.json().await.map_err(|e| {
            warn!("CEP lookup returned malformed payload: {e}");
            CepError::LookupFailed
        })?;
        if body.erro.is_some() {
            return Err(CepError::NotFound);
        }

        Ok(CepAddress {
            cep: body.cep.unwrap_or(digits),
            address: body.logradouro.unwrap_or_default(),
            neighborhood: body.bairro.unwrap_or_default(),
            city: body.localidade.unwrap_or_default(),
            state: body.uf.unwrap_or_default(),
        })
    }
}

pub async fn lookup_cep(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<CepAddress>, CepError> {
    state.cep.lookup(&code).await.map(Json)
}

pub fn configure_cep_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/cep/:code", get(lookup_cep))
}
