//! Derivation of render-ready label records from validated rows.

pub mod charges;
pub mod derive;

pub use charges::{collect_charges, sort_charges, truncate_name};
pub use derive::{acp_enabled, derive_record, derive_records, monthly_price, service_type};
