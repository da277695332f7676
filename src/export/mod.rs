//! Tabular export of CRM collections with foreign keys resolved to labels.

pub mod error;
pub mod handlers;
pub mod records;
pub mod render;

pub use error::ExportError;
pub use handlers::configure_export_routes;
pub use records::{activity_records, contact_records, lead_records, ExportTable};
pub use render::{render, ExportFile, ExportFormat};
