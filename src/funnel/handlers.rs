use super::error::FunnelError;
use super::service::FunnelService;
use super::types::{CreateFunnelRequest, Funnel, UpdateFunnelRequest};
use crate::shared::state::AppState;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

pub async fn create_funnel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateFunnelRequest>,
) -> Result<Json<Funnel>, FunnelError> {
    let service = FunnelService::new(state.store.clone());
    service.create(req).map(Json)
}

pub async fn list_funnels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Funnel>>, FunnelError> {
    let service = FunnelService::new(state.store.clone());
    service.list().map(Json)
}

pub async fn get_funnel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Funnel>, FunnelError> {
    let service = FunnelService::new(state.store.clone());
    service.get(id).map(Json)
}

pub async fn update_funnel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFunnelRequest>,
) -> Result<Json<Funnel>, FunnelError> {
    let service = FunnelService::new(state.store.clone());
    service.update(id, req).map(Json)
}

pub async fn add_stage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Funnel>, FunnelError> {
    let service = FunnelService::new(state.store.clone());
    service.add_stage(id).map(Json)
}

pub async fn remove_stage(
    State(state): State<Arc<AppState>>,
    Path((id, stage_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Funnel>, FunnelError> {
    let service = FunnelService::new(state.store.clone());
    service.remove_stage(id, stage_id).map(Json)
}

pub fn configure_funnel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/crm/funnels", get(list_funnels).post(create_funnel))
        .route("/api/crm/funnels/:id", get(get_funnel).put(update_funnel))
        .route("/api/crm/funnels/:id/stages", post(add_stage))
        .route(
            "/api/crm/funnels/:id/stages/:stage_id",
            axum::routing::delete(remove_stage),
        )
}
