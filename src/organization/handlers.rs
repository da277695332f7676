use super::error::OrganizationError;
use super::service::OrganizationService;
use super::types::*;
use crate::shared::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

pub async fn create_organization(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<Json<OrganizationResponse>, OrganizationError> {
    let service = OrganizationService::new(state.store.clone());
    service.create(req).map(Json)
}

pub async fn list_organizations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<OrganizationResponse>>, OrganizationError> {
    let service = OrganizationService::new(state.store.clone());
    service.list().map(Json)
}

pub async fn get_organization(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizationResponse>, OrganizationError> {
    let service = OrganizationService::new(state.store.clone());
    service.get(id).map(Json)
}

pub async fn update_organization(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> Result<Json<OrganizationResponse>, OrganizationError> {
    let service = OrganizationService::new(state.store.clone());
    service.update(id, req).map(Json)
}

pub async fn delete_organization(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, OrganizationError> {
    let service = OrganizationService::new(state.store.clone());
    service.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_branch(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateBranchRequest>,
) -> Result<Json<Branch>, OrganizationError> {
    let service = OrganizationService::new(state.store.clone());
    service.create_branch(id, req).map(Json)
}

pub async fn list_branches(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Branch>>, OrganizationError> {
    let service = OrganizationService::new(state.store.clone());
    service.list_branches(id).map(Json)
}

pub async fn delete_branch(
    State(state): State<Arc<AppState>>,
    Path((id, branch_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, OrganizationError> {
    let service = OrganizationService::new(state.store.clone());
    service.delete_branch(id, branch_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure_organization_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/crm/organizations",
            get(list_organizations).post(create_organization),
        )
        .route(
            "/api/crm/organizations/:id",
            get(get_organization)
                .put(update_organization)
                .delete(delete_organization),
        )
        .route(
            "/api/crm/organizations/:id/branches",
            get(list_branches).post(create_branch),
        )
        .route(
            "/api/crm/organizations/:id/branches/:branch_id",
            delete(delete_branch),
        )
}
