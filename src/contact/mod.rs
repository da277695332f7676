//! Contact reference store with write-time email uniqueness.

pub mod error;
pub mod handlers;
pub mod service;
pub mod types;

pub use error::ContactError;
pub use handlers::configure_contact_routes;
pub use service::ContactService;
pub use types::{Contact, ContactSource, ContactType};
