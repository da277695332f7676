use super::error::ContactError;
use super::service::ContactService;
use super::types::{Contact, CreateContactRequest, UpdateContactRequest};
use crate::shared::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use uuid::Uuid;

pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateContactRequest>,
) -> Result<Json<Contact>, ContactError> {
    let service = ContactService::new(state.store.clone());
    service.create(req).map(Json)
}

pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Contact>>, ContactError> {
    let service = ContactService::new(state.store.clone());
    service.list().map(Json)
}

pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Contact>, ContactError> {
    let service = ContactService::new(state.store.clone());
    service.get(id).map(Json)
}

pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<Json<Contact>, ContactError> {
    let service = ContactService::new(state.store.clone());
    service.update(id, req).map(Json)
}

pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ContactError> {
    let service = ContactService::new(state.store.clone());
    service.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn configure_contact_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/crm/contacts", get(list_contacts).post(create_contact))
        .route(
            "/api/crm/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}
