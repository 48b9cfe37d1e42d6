//! Broadband Facts data model.

pub mod columns;
pub mod error;
pub mod options;
pub mod record;
pub mod report;

pub use error::{ErrorKind, FieldError, Result, RowError};
pub use options::{DEFAULT_CHARGE_NAME_LIMIT, DEFAULT_LABEL_TITLE, LabelOptions};
pub use record::{
    AdditionalCharge, ChargeColumns, ChargeKind, ContractTerms, FIRST_DATA_ROW, LabelRecord, Mbps,
    PlanFields, RawRow, ServiceType,
};
pub use report::ErrorReport;
