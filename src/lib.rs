pub mod activity;
pub mod cep;
pub mod config;
pub mod contact;
pub mod export;
pub mod funnel;
pub mod lead;
pub mod organization;
pub mod shared;

use crate::shared::state::AppState;
use axum::Router;
use std::sync::Arc;

/// Assembles the full API router from the per-app route sets.
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(funnel::configure_funnel_routes())
        .merge(lead::configure_lead_routes())
        .merge(contact::configure_contact_routes())
        .merge(organization::configure_organization_routes())
        .merge(activity::configure_activity_routes())
        .merge(export::configure_export_routes())
        .merge(cep::configure_cep_routes())
}
