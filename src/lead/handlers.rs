use super::board::FunnelBoard;
use super::error::LeadError;
use super::service::LeadService;
use super::transition::{DropEvent, DropTarget, MoveOutcome};
use super::types::*;
use crate::shared::state::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct MoveLeadRequest {
    pub source_stage_id: Uuid,
    pub destination: Option<DropTarget>,
}

pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateLeadRequest>,
) -> Result<Json<Lead>, LeadError> {
    let service = LeadService::new(state.store.clone());
    service.create(req).map(Json)
}

pub async fn list_leads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeadListQuery>,
) -> Result<Json<Vec<Lead>>, LeadError> {
    let service = LeadService::new(state.store.clone());
    service.list(&query).map(Json)
}

pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lead>, LeadError> {
    let service = LeadService::new(state.store.clone());
    service.get(id).map(Json)
}

pub async fn update_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateLeadRequest>,
) -> Result<Json<Lead>, LeadError> {
    let service = LeadService::new(state.store.clone());
    service.update(id, req).map(Json)
}

pub async fn set_lead_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<Lead>, LeadError> {
    let service = LeadService::new(state.store.clone());
    service.set_status(id, req.status).map(Json)
}

pub async fn move_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveLeadRequest>,
) -> Result<Json<MoveOutcome>, LeadError> {
    let service = LeadService::new(state.store.clone());
    service
        .move_lead(DropEvent {
            lead_id: id,
            source_stage_id: req.source_stage_id,
            destination: req.destination,
        })
        .map(Json)
}

pub async fn funnel_board(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FunnelBoard>, LeadError> {
    let service = LeadService::new(state.store.clone());
    service.board(id).map(Json)
}

pub fn configure_lead_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/crm/leads", get(list_leads).post(create_lead))
        .route("/api/crm/leads/:id", get(get_lead).put(update_lead))
        .route("/api/crm/leads/:id/status", post(set_lead_status))
        .route("/api/crm/leads/:id/move", post(move_lead))
        .route("/api/crm/funnels/:id/board", get(funnel_board))
}
