//! Lead store, kanban board and drag-and-drop stage transitions.

pub mod board;
pub mod error;
pub mod handlers;
pub mod service;
pub mod transition;
pub mod types;

pub use error::LeadError;
pub use handlers::configure_lead_routes;
pub use service::LeadService;
pub use transition::{DropEvent, DropTarget, MoveOutcome};
pub use types::{Lead, LeadPriority, LeadSource, LeadStatus, LeadType};
