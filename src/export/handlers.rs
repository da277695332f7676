use super::error::ExportError;
use super::records::{activity_records, contact_records, lead_records, ExportTable};
use super::render::{render, ExportFile, ExportFormat};
use crate::activity::Activity;
use crate::contact::Contact;
use crate::funnel::Funnel;
use crate::lead::Lead;
use crate::shared::state::AppState;
use crate::shared::storage::{
    self, StoragePort, ACTIVITIES_KEY, CONTACTS_KEY, FUNNELS_KEY, LEADS_KEY,
};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::error;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
    pub format: Option<ExportFormat>,
}

fn load<T: serde::de::DeserializeOwned>(
    store: &dyn StoragePort,
    key: &str,
) -> Result<Vec<T>, ExportError> {
    storage::load(store, key).map_err(|e| {
        error!("Failed to read {key} for export: {e}");
        ExportError::Storage
    })
}

fn download(table: ExportTable, query: ExportQuery, basename: &str) -> Result<Response, ExportError> {
    let file = render(&table, query.format.unwrap_or_default(), basename)?;
    Ok(attachment(file))
}

fn attachment(file: ExportFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.data,
    )
        .into_response()
}

pub async fn export_leads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ExportError> {
    let store = state.store.as_ref();
    let leads: Vec<Lead> = load(store, LEADS_KEY)?;
    let funnels: Vec<Funnel> = load(store, FUNNELS_KEY)?;
    let contacts: Vec<Contact> = load(store, CONTACTS_KEY)?;
    download(lead_records(&leads, &funnels, &contacts)?, query, "leads")
}

pub async fn export_contacts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ExportError> {
    let contacts: Vec<Contact> = load(state.store.as_ref(), CONTACTS_KEY)?;
    download(contact_records(&contacts)?, query, "contatos")
}

pub async fn export_activities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ExportError> {
    let store = state.store.as_ref();
    let activities: Vec<Activity> = load(store, ACTIVITIES_KEY)?;
    let leads: Vec<Lead> = load(store, LEADS_KEY)?;
    let contacts: Vec<Contact> = load(store, CONTACTS_KEY)?;
    download(
        activity_records(&activities, &leads, &contacts)?,
        query,
        "atividades",
    )
}

pub fn configure_export_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/crm/export/leads", get(export_leads))
        .route("/api/crm/export/contacts", get(export_contacts))
        .route("/api/crm/export/activities", get(export_activities))
}
