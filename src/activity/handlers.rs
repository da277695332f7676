use super::error::ActivityError;
use super::service::ActivityService;
use super::types::*;
use crate::shared::state::AppState;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

pub async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateActivityRequest>,
) -> Result<Json<Activity>, ActivityError> {
    let service = ActivityService::new(state.store.clone());
    service.create(req).map(Json)
}

pub async fn list_activities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActivityListQuery>,
) -> Result<Json<Vec<Activity>>, ActivityError> {
    let service = ActivityService::new(state.store.clone());
    service.list(&query).map(Json)
}

pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Activity>, ActivityError> {
    let service = ActivityService::new(state.store.clone());
    service.get(id).map(Json)
}

pub async fn update_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateActivityRequest>,
) -> Result<Json<Activity>, ActivityError> {
    let service = ActivityService::new(state.store.clone());
    service.update(id, req).map(Json)
}

pub async fn complete_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Activity>, ActivityError> {
    let service = ActivityService::new(state.store.clone());
    service.complete(id).map(Json)
}

pub async fn add_checklist_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddChecklistItemRequest>,
) -> Result<Json<Activity>, ActivityError> {
    let service = ActivityService::new(state.store.clone());
    service.add_checklist_item(id, req.text).map(Json)
}

pub async fn toggle_checklist_item(
    State(state): State<Arc<AppState>>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Activity>, ActivityError> {
    let service = ActivityService::new(state.store.clone());
    service.toggle_checklist_item(id, item_id).map(Json)
}

pub async fn remove_checklist_item(
    State(state): State<Arc<AppState>>,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Activity>, ActivityError> {
    let service = ActivityService::new(state.store.clone());
    service.remove_checklist_item(id, item_id).map(Json)
}

pub fn configure_activity_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/crm/activities",
            get(list_activities).post(create_activity),
        )
        .route(
            "/api/crm/activities/:id",
            get(get_activity).put(update_activity),
        )
        .route("/api/crm/activities/:id/complete", post(complete_activity))
        .route("/api/crm/activities/:id/checklist", post(add_checklist_item))
        .route(
            "/api/crm/activities/:id/checklist/:item_id",
            put(toggle_checklist_item).delete(remove_checklist_item),
        )
}
