use crate::cep::DEFAULT_CEP_BASE_URL;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data_dir: PathBuf,
    pub cep_base_url: String,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let host = std::env::var("CRM_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("CRM_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let data_dir = std::env::var("CRM_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let cep_base_url =
            std::env::var("CRM_CEP_URL").unwrap_or_else(|_| DEFAULT_CEP_BASE_URL.to_string());

        Self {
            server: ServerConfig { host, port },
            data_dir,
            cep_base_url,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
