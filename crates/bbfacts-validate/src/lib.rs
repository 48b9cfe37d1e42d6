//! Field parsing and row validation for Broadband Facts input tables.

pub mod parse;
pub mod rules;

pub use parse::{
    MAX_FIELD_LEN, MAX_PRICE_LEN, MAX_SPEED_KBPS, MAX_SPEED_MBPS, MAX_URL_LEN,
    check_field_length, mills_to_cents, parse_data_service_price, parse_monthly_intro_price,
    parse_speed, strip_currency,
};
pub use rules::{ValidationSummary, validate_row, validate_table};
