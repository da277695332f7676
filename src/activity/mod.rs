//! CRM activities (tasks) with per-item checklists.

pub mod error;
pub mod handlers;
pub mod service;
pub mod types;

pub use error::ActivityError;
pub use handlers::configure_activity_routes;
pub use service::ActivityService;
pub use types::{Activity, ActivityStatus, ActivityType, ChecklistItem};
