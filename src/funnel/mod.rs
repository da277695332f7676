//! Funnel store: named pipelines of ordered, colored stages.

pub mod error;
pub mod handlers;
pub mod service;
pub mod types;

pub use error::FunnelError;
pub use handlers::configure_funnel_routes;
pub use service::FunnelService;
pub use types::{Funnel, Stage, StageInput};
