//! Row and label record types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::columns::{
    self, FEE_COLUMN_PREFIXES, MAX_CHARGE_INDEX, MONTHLY_FEE_NAME_PREFIX,
    MONTHLY_FEE_PRICE_PREFIX, ONE_TIME_FEE_NAME_PREFIX, ONE_TIME_FEE_PRICE_PREFIX,
};
use crate::error::FieldError;

/// Display row number of the first data row (the header is row 1).
pub const FIRST_DATA_ROW: usize = 2;

/// One data row of the input table, keyed by header name.
///
/// `row` is the CSV display row number: the header is row 1, so the first
/// data row is row 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row: usize,
    fields: Vec<(String, String)>,
}

impl RawRow {
    /// Pair header names with cell values. Cells beyond the header are dropped.
    pub fn new(row: usize, headers: &[String], cells: &[String]) -> Self {
        let fields = headers
            .iter()
            .zip(cells)
            .map(|(header, cell)| (header.clone(), cell.clone()))
            .collect();
        Self { row, fields }
    }

    /// Value of a column, or `None` when the column is not in the header.
    ///
    /// With duplicate headers the last column wins.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a column, treating an absent column as empty.
    pub fn text(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Columns in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Which charge list an indexed fee pair feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeKind {
    Monthly,
    OneTime,
}

impl ChargeKind {
    pub fn name_prefix(self) -> &'static str {
        match self {
            Self::Monthly => MONTHLY_FEE_NAME_PREFIX,
            Self::OneTime => ONE_TIME_FEE_NAME_PREFIX,
        }
    }

    pub fn price_prefix(self) -> &'static str {
        match self {
            Self::Monthly => MONTHLY_FEE_PRICE_PREFIX,
            Self::OneTime => ONE_TIME_FEE_PRICE_PREFIX,
        }
    }
}

/// The name/price columns sharing one fee index.
///
/// A `None` value means the column is missing from the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeColumns {
    pub kind: ChargeKind,
    pub index: usize,
    pub name_column: String,
    pub price_column: String,
    pub name: Option<String>,
    pub price: Option<String>,
}

/// Typed view of a [`RawRow`], extracted once at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFields {
    pub row: usize,
    pub company_name: String,
    pub discounts_and_bundles_url: String,
    pub acp: String,
    pub customer_support_url: String,
    pub customer_support_phone: String,
    pub network_management_url: String,
    pub privacy_policy_url: String,
    pub fcc_id: String,
    pub data_service_id: String,
    pub data_service_name: String,
    pub fixed_or_mobile: String,
    /// `None` when the column is absent; the price rule only applies when present.
    pub data_service_price: Option<String>,
    pub billing_frequency_in_months: String,
    pub introductory_period_in_months: String,
    pub introductory_price_per_month: String,
    pub contract_duration: String,
    pub contract_url: String,
    pub early_termination_fee: String,
    pub dl_speed_in_kbps: String,
    pub ul_speed_in_kbps: String,
    pub latency_in_ms: String,
    pub data_included_in_monthly_price: String,
    pub overage_fee: String,
    pub overage_data_amount: String,
    /// Indexed fee pairs in index order, monthly before one-time.
    pub charges: Vec<ChargeColumns>,
}

impl PlanFields {
    /// Extract typed fields from a row.
    ///
    /// Fails when a fee column carries an index outside
    /// `0..=MAX_CHARGE_INDEX`, since such a column would never be read.
    pub fn from_raw(raw: &RawRow) -> Result<Self, FieldError> {
        for (column, _) in raw.iter() {
            check_fee_column(column)?;
        }
        let text = |column: &str| raw.text(column).to_string();
        let mut charges = Vec::new();
        for kind in [ChargeKind::Monthly, ChargeKind::OneTime] {
            for index in 0..=MAX_CHARGE_INDEX {
                let name_column = columns::indexed(kind.name_prefix(), index);
                let price_column = columns::indexed(kind.price_prefix(), index);
                let name = raw.get(&name_column).map(str::to_string);
                let price = raw.get(&price_column).map(str::to_string);
                if name.is_none() && price.is_none() {
                    continue;
                }
                charges.push(ChargeColumns {
                    kind,
                    index,
                    name_column,
                    price_column,
                    name,
                    price,
                });
            }
        }
        Ok(Self {
            row: raw.row,
            company_name: text(columns::COMPANY_NAME),
            discounts_and_bundles_url: text(columns::DISCOUNTS_AND_BUNDLES_URL),
            acp: text(columns::ACP),
            customer_support_url: text(columns::CUSTOMER_SUPPORT_URL),
            customer_support_phone: text(columns::CUSTOMER_SUPPORT_PHONE),
            network_management_url: text(columns::NETWORK_MANAGEMENT_URL),
            privacy_policy_url: text(columns::PRIVACY_POLICY_URL),
            fcc_id: text(columns::FCC_ID),
            data_service_id: text(columns::DATA_SERVICE_ID),
            data_service_name: text(columns::DATA_SERVICE_NAME),
            fixed_or_mobile: text(columns::FIXED_OR_MOBILE),
            data_service_price: raw.get(columns::DATA_SERVICE_PRICE).map(str::to_string),
            billing_frequency_in_months: text(columns::BILLING_FREQUENCY_IN_MONTHS),
            introductory_period_in_months: text(columns::INTRODUCTORY_PERIOD_IN_MONTHS),
            introductory_price_per_month: text(columns::INTRODUCTORY_PRICE_PER_MONTH),
            contract_duration: text(columns::CONTRACT_DURATION),
            contract_url: text(columns::CONTRACT_URL),
            early_termination_fee: text(columns::EARLY_TERMINATION_FEE),
            dl_speed_in_kbps: text(columns::DL_SPEED_IN_KBPS),
            ul_speed_in_kbps: text(columns::UL_SPEED_IN_KBPS),
            latency_in_ms: text(columns::LATENCY_IN_MS),
            data_included_in_monthly_price: text(columns::DATA_INCLUDED_IN_MONTHLY_PRICE),
            overage_fee: text(columns::OVERAGE_FEE),
            overage_data_amount: text(columns::OVERAGE_DATA_AMOUNT),
            charges,
        })
    }

    /// True when either introductory column has a value.
    pub fn has_introductory_rate(&self) -> bool {
        !self.introductory_period_in_months.is_empty()
            || !self.introductory_price_per_month.is_empty()
    }
}

/// Reject fee columns whose suffix is not a canonical index in range.
fn check_fee_column(column: &str) -> Result<(), FieldError> {
    let Some(suffix) = FEE_COLUMN_PREFIXES
        .iter()
        .find_map(|prefix| column.strip_prefix(prefix))
    else {
        return Ok(());
    };
    let in_range = suffix
        .parse::<usize>()
        .is_ok_and(|index| index <= MAX_CHARGE_INDEX && index.to_string() == suffix);
    if in_range {
        Ok(())
    } else {
        Err(FieldError::format(
            column,
            format!("fee columns must end in an index from 0 to {MAX_CHARGE_INDEX}"),
        ))
    }
}

/// A named fee shown on the label. `value` carries no currency symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalCharge {
    pub name: String,
    pub value: String,
}

/// Fixed broadband or mobile broadband.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceType {
    #[default]
    Fixed,
    Mobile,
}

impl ServiceType {
    /// Single-letter code used in the unique plan identifier.
    pub fn code(self) -> char {
        match self {
            Self::Fixed => 'F',
            Self::Mobile => 'M',
        }
    }

    pub fn disclosure_title(self) -> &'static str {
        match self {
            Self::Fixed => "Fixed Broadband Consumer Disclosure",
            Self::Mobile => "Mobile Broadband Consumer Disclosure",
        }
    }
}

/// A speed in megabits per second.
///
/// Displays without a decimal point when whole, otherwise with one decimal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Mbps(f64);

impl Mbps {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Mbps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}

/// Contract requirement attached to an introductory rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub months: u32,
    pub url: String,
}

/// Render-ready values for one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRecord {
    pub row: usize,
    pub company_name: String,
    pub plan_name: String,
    pub service_type: ServiceType,
    pub fcc_id: String,
    pub data_service_id: String,
    /// Billing-period price, two decimals, no currency symbol.
    pub monthly_price: String,
    /// Standard price as entered, no currency symbol.
    pub data_service_price: String,
    pub introductory_rate: bool,
    pub introductory_period_months: Option<u32>,
    pub contract: Option<ContractTerms>,
    pub early_termination_fee: Option<String>,
    pub download_speed: Mbps,
    pub upload_speed: Mbps,
    pub latency_ms: String,
    /// `None` means unlimited data.
    pub data_included_gb: Option<String>,
    pub overage_fee: String,
    pub overage_data_amount: String,
    pub acp: bool,
    pub discounts_and_bundles_url: String,
    pub network_management_url: String,
    pub privacy_policy_url: String,
    pub customer_support_url: String,
    pub customer_support_phone: String,
    pub monthly_charges: Vec<AdditionalCharge>,
    pub one_time_charges: Vec<AdditionalCharge>,
}

impl LabelRecord {
    /// 0-based data row index, counting blank rows in the file.
    pub fn data_index(&self) -> usize {
        self.row.saturating_sub(FIRST_DATA_ROW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        let headers: Vec<String> = pairs.iter().map(|(h, _)| h.to_string()).collect();
        let cells: Vec<String> = pairs.iter().map(|(_, v)| v.to_string()).collect();
        RawRow::new(2, &headers, &cells)
    }

    #[test]
    fn raw_row_distinguishes_absent_and_empty() {
        let raw = row(&[("company_name", "Acme"), ("data_service_price", "")]);
        assert_eq!(raw.get("company_name"), Some("Acme"));
        assert_eq!(raw.get("data_service_price"), Some(""));
        assert_eq!(raw.get("fcc_id"), None);
        assert_eq!(raw.text("fcc_id"), "");
    }

    #[test]
    fn plan_fields_collects_indexed_charges_in_index_order() {
        let raw = row(&[
            ("one_time_fee_name_2", "Install"),
            ("one_time_fee_price_2", "$99"),
            ("monthly_fee_name_1", "Modem"),
            ("one_time_fee_name_0", "Activation"),
            ("one_time_fee_price_0", "10"),
        ]);
        let fields = PlanFields::from_raw(&raw).unwrap();
        let summary: Vec<(ChargeKind, usize, Option<&str>)> = fields
            .charges
            .iter()
            .map(|c| (c.kind, c.index, c.price.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (ChargeKind::Monthly, 1, None),
                (ChargeKind::OneTime, 0, Some("10")),
                (ChargeKind::OneTime, 2, Some("$99")),
            ]
        );
    }

    #[test]
    fn plan_fields_keeps_absent_price_column_as_none() {
        let fields = PlanFields::from_raw(&row(&[("company_name", "Acme")])).unwrap();
        assert_eq!(fields.data_service_price, None);
        assert!(!fields.has_introductory_rate());
    }

    #[test]
    fn fee_columns_beyond_the_scanned_range_are_rejected() {
        for column in [
            "monthly_fee_name_100",
            "one_time_fee_price_250",
            "monthly_fee_price_01",
            "one_time_fee_name_x",
            "monthly_fee_name_",
        ] {
            let error = PlanFields::from_raw(&row(&[(column, "Modem")])).unwrap_err();
            assert_eq!(error.kind(), crate::ErrorKind::Format, "{column}");
            assert!(error.to_string().starts_with(column), "{column}");
        }
    }

    #[test]
    fn fee_columns_at_the_range_edges_are_read() {
        let raw = row(&[
            ("monthly_fee_name_0", "Modem"),
            ("monthly_fee_price_0", "$5"),
            ("one_time_fee_name_99", "Install"),
            ("one_time_fee_price_99", "$50"),
        ]);
        let fields = PlanFields::from_raw(&raw).unwrap();
        let indexes: Vec<usize> = fields.charges.iter().map(|c| c.index).collect();
        assert_eq!(indexes, vec![0, 99]);
    }

    #[test]
    fn mbps_display_drops_trailing_zeros() {
        assert_eq!(Mbps::new(10.0).to_string(), "10");
        assert_eq!(Mbps::new(1.5).to_string(), "1.5");
        assert_eq!(Mbps::new(0.0).to_string(), "0");
        assert_eq!(Mbps::new(10000.0).to_string(), "10000");
    }

    #[test]
    fn fractional_mbps_always_keeps_one_decimal() {
        assert_eq!(Mbps::new(1.999).to_string(), "2.0");
        assert_eq!(Mbps::new(9999.95).to_string(), "10000.0");
    }

    #[test]
    fn service_type_codes() {
        assert_eq!(ServiceType::Fixed.code(), 'F');
        assert_eq!(ServiceType::Mobile.code(), 'M');
    }
}
