use crmserver::build_router;
use crmserver::cep::CepClient;
use crmserver::config::AppConfig;
use crmserver::shared::state::AppState;
use crmserver::shared::storage::{JsonFileStorage, StoragePort};
use log::info;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .write_style(env_logger::WriteStyle::Always)
        .init();

    let config = AppConfig::from_env();
    let store: Arc<dyn StoragePort> = Arc::new(JsonFileStorage::new(&config.data_dir));
    let cep = CepClient::new(config.cep_base_url.clone());
    let state = Arc::new(AppState::new(store, cep));

    let app = build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.bind_addr();
    info!("CRM server listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
