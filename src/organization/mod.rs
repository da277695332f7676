//! Organizations with sequential master codes and exclusively-owned branches.

pub mod error;
pub mod handlers;
pub mod sequence;
pub mod service;
pub mod types;

pub use error::OrganizationError;
pub use handlers::configure_organization_routes;
pub use sequence::SequenceAllocator;
pub use service::OrganizationService;
pub use types::{Branch, Organization, OrganizationResponse};
