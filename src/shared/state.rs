use crate::cep::CepClient;
use crate::shared::storage::StoragePort;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<dyn StoragePort>,
    pub cep: CepClient,
}

impl AppState {
    pub fn new(store: Arc<dyn StoragePort>, cep: CepClient) -> Self {
        Self { store, cep }
    }
}
