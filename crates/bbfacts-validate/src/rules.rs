//! Row-level validation rules.
//!
//! Rules run in a fixed order and stop at the first failure.

use std::time::Instant;

use tracing::{debug, info, trace};

use bbfacts_ingest::CsvTable;
use bbfacts_model::columns::{
    DATA_SERVICE_PRICE, DL_SPEED_IN_KBPS, INTRODUCTORY_PERIOD_IN_MONTHS,
    INTRODUCTORY_PRICE_PER_MONTH, UL_SPEED_IN_KBPS,
};
use bbfacts_model::{FieldError, PlanFields, RawRow, RowError};

use crate::parse::{
    check_field_length, parse_data_service_price, parse_monthly_intro_price, parse_speed,
};

/// Outcome of a successful table validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub rows_checked: usize,
}

/// Validate every data row, returning the first failure.
pub fn validate_table(table: &CsvTable) -> Result<ValidationSummary, RowError> {
    let start = Instant::now();
    let mut summary = ValidationSummary::default();
    for raw in table.raw_rows() {
        validate_row(&raw)?;
        summary.rows_checked += 1;
    }
    info!(
        rows = summary.rows_checked,
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    Ok(summary)
}

/// Validate a single row.
pub fn validate_row(raw: &RawRow) -> Result<(), RowError> {
    trace!(row = raw.row, "validating row");
    PlanFields::from_raw(raw)
        .and_then(|fields| check_row(raw, &fields))
        .map_err(|error| {
            debug!(row = raw.row, kind = %error.kind(), %error, "row failed validation");
            error.at_row(raw.row)
        })
}

fn check_row(raw: &RawRow, fields: &PlanFields) -> Result<(), FieldError> {
    check_introductory(fields)?;
    if let Some(price) = fields.data_service_price.as_deref() {
        parse_data_service_price(price, DATA_SERVICE_PRICE)?;
    }
    parse_speed(&fields.dl_speed_in_kbps, DL_SPEED_IN_KBPS)?;
    parse_speed(&fields.ul_speed_in_kbps, UL_SPEED_IN_KBPS)?;
    for (key, value) in raw.iter() {
        check_field_length(key, value)?;
    }
    Ok(())
}

fn check_introductory(fields: &PlanFields) -> Result<(), FieldError> {
    let period = fields.introductory_period_in_months.as_str();
    let price = fields.introductory_price_per_month.as_str();
    if period.is_empty() && price.is_empty() {
        return Ok(());
    }
    if period.is_empty() || price.is_empty() {
        return Err(FieldError::Symmetry {
            first: INTRODUCTORY_PERIOD_IN_MONTHS.to_string(),
            second: INTRODUCTORY_PRICE_PER_MONTH.to_string(),
        });
    }
    if period.parse::<u32>().is_err() {
        return Err(FieldError::format(
            INTRODUCTORY_PERIOD_IN_MONTHS,
            "introductory period must be a valid integer",
        ));
    }
    parse_monthly_intro_price(price, INTRODUCTORY_PRICE_PER_MONTH)?;
    Ok(())
}
