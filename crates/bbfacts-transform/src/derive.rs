//! Row derivation: one validated row to one [`LabelRecord`].

use std::time::Instant;

use tracing::{debug, info, info_span};

use bbfacts_ingest::CsvTable;
use bbfacts_model::columns::{
    BILLING_FREQUENCY_IN_MONTHS, CONTRACT_DURATION, DATA_SERVICE_PRICE, DL_SPEED_IN_KBPS,
    INTRODUCTORY_PERIOD_IN_MONTHS, INTRODUCTORY_PRICE_PER_MONTH, UL_SPEED_IN_KBPS,
};
use bbfacts_model::{
    ContractTerms, FieldError, LabelOptions, LabelRecord, PlanFields, RawRow, RowError,
    ServiceType,
};
use bbfacts_validate::{
    mills_to_cents, parse_data_service_price, parse_monthly_intro_price, parse_speed,
    strip_currency,
};

use crate::charges::collect_charges;

/// Derive records for every data row, stopping at the first failure.
pub fn derive_records(
    table: &CsvTable,
    options: &LabelOptions,
) -> Result<Vec<LabelRecord>, RowError> {
    let span = info_span!("derive", rows = table.rows.len());
    let _guard = span.enter();
    let start = Instant::now();
    let records = table
        .raw_rows()
        .map(|raw| derive_record(&raw, options))
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        records = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "derivation complete"
    );
    Ok(records)
}

/// Derive the label record for one row.
pub fn derive_record(raw: &RawRow, options: &LabelOptions) -> Result<LabelRecord, RowError> {
    let record = PlanFields::from_raw(raw)
        .and_then(|fields| derive_fields(&fields, options))
        .map_err(|error| error.at_row(raw.row))?;
    debug!(
        row = record.row,
        company = %record.company_name,
        plan = %record.plan_name,
        monthly_price = %record.monthly_price,
        "derived label record"
    );
    Ok(record)
}

fn derive_fields(fields: &PlanFields, options: &LabelOptions) -> Result<LabelRecord, FieldError> {
    let introductory_rate = fields.has_introductory_rate();
    let monthly_price = monthly_price(fields)?;
    let introductory_period_months = if introductory_rate {
        Some(parse_months(
            &fields.introductory_period_in_months,
            INTRODUCTORY_PERIOD_IN_MONTHS,
        )?)
    } else {
        None
    };
    let contract = if introductory_rate && !fields.contract_duration.is_empty() {
        Some(ContractTerms {
            months: parse_months(&fields.contract_duration, CONTRACT_DURATION)?,
            url: fields.contract_url.clone(),
        })
    } else {
        None
    };
    let download_speed = parse_speed(&fields.dl_speed_in_kbps, DL_SPEED_IN_KBPS)?;
    let upload_speed = parse_speed(&fields.ul_speed_in_kbps, UL_SPEED_IN_KBPS)?;
    let charges = collect_charges(fields, options.charge_name_limit)?;

    Ok(LabelRecord {
        row: fields.row,
        company_name: fields.company_name.clone(),
        plan_name: fields.data_service_name.clone(),
        service_type: service_type(&fields.fixed_or_mobile),
        fcc_id: fields.fcc_id.clone(),
        data_service_id: fields.data_service_id.clone(),
        monthly_price,
        data_service_price: fields
            .data_service_price
            .as_deref()
            .map(strip_currency)
            .unwrap_or_default()
            .to_string(),
        introductory_rate,
        introductory_period_months,
        contract,
        early_termination_fee: non_empty(strip_currency(&fields.early_termination_fee)),
        download_speed,
        upload_speed,
        latency_ms: fields.latency_in_ms.clone(),
        data_included_gb: non_empty(&fields.data_included_in_monthly_price),
        overage_fee: strip_currency(&fields.overage_fee).to_string(),
        overage_data_amount: fields.overage_data_amount.clone(),
        acp: acp_enabled(&fields.acp),
        discounts_and_bundles_url: fields.discounts_and_bundles_url.clone(),
        network_management_url: fields.network_management_url.clone(),
        privacy_policy_url: fields.privacy_policy_url.clone(),
        customer_support_url: fields.customer_support_url.clone(),
        customer_support_phone: fields.customer_support_phone.clone(),
        monthly_charges: charges.monthly,
        one_time_charges: charges.one_time,
    })
}

/// Price for one billing period, formatted with two decimals.
///
/// The introductory price is used when the row has an introductory rate,
/// otherwise the data service price rounded to cents.
pub fn monthly_price(fields: &PlanFields) -> Result<String, FieldError> {
    let billing = parse_months(&fields.billing_frequency_in_months, BILLING_FREQUENCY_IN_MONTHS)?;
    let cents = if fields.has_introductory_rate() {
        parse_monthly_intro_price(
            &fields.introductory_price_per_month,
            INTRODUCTORY_PRICE_PER_MONTH,
        )?
    } else {
        let price = fields.data_service_price.as_deref().unwrap_or_default();
        mills_to_cents(parse_data_service_price(price, DATA_SERVICE_PRICE)?)
    };
    let total = cents * u64::from(billing);
    Ok(format!("{}.{:02}", total / 100, total % 100))
}

/// `fixed` (any case) or an empty value is fixed broadband; anything else is mobile.
pub fn service_type(text: &str) -> ServiceType {
    if text.is_empty() || text.eq_ignore_ascii_case("fixed") {
        ServiceType::Fixed
    } else {
        ServiceType::Mobile
    }
}

pub fn acp_enabled(text: &str) -> bool {
    ["yes", "1", "true"]
        .iter()
        .any(|accepted| text.eq_ignore_ascii_case(accepted))
}

fn parse_months(text: &str, field: &str) -> Result<u32, FieldError> {
    text.parse()
        .map_err(|_| FieldError::format(field, "value must be a whole number of months"))
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbfacts_model::ErrorKind;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        let headers: Vec<String> = pairs.iter().map(|(h, _)| h.to_string()).collect();
        let cells: Vec<String> = pairs.iter().map(|(_, v)| v.to_string()).collect();
        RawRow::new(3, &headers, &cells)
    }

    fn plan(extra: &[(&'static str, &'static str)]) -> RawRow {
        let mut pairs = vec![
            ("company_name", "Acme Broadband"),
            ("data_service_name", "Gigabit Home"),
            ("fcc_id", "F0001"),
            ("data_service_id", "42"),
            ("data_service_price", "$49.99"),
            ("billing_frequency_in_months", "12"),
            ("dl_speed_in_kbps", "1000000"),
            ("ul_speed_in_kbps", "1500"),
            ("latency_in_ms", "20"),
        ];
        pairs.extend_from_slice(extra);
        raw(&pairs)
    }

    fn derive(raw: &RawRow) -> Result<LabelRecord, RowError> {
        derive_record(raw, &LabelOptions::default())
    }

    #[test]
    fn yearly_billing_multiplies_rounded_price() {
        let record = derive(&plan(&[])).unwrap();
        assert_eq!(record.monthly_price, "599.88");
        assert_eq!(record.data_service_price, "49.99");
        assert!(!record.introductory_rate);
        assert_eq!(record.introductory_period_months, None);
    }

    #[test]
    fn introductory_price_replaces_standard_price() {
        let record = derive(&plan(&[
            ("introductory_period_in_months", "6"),
            ("introductory_price_per_month", "$19.99"),
            ("contract_duration", "11"),
            ("contract_url", "https://example.com/contract"),
        ]))
        .unwrap();
        assert_eq!(record.monthly_price, "239.88");
        assert!(record.introductory_rate);
        assert_eq!(record.introductory_period_months, Some(6));
        assert_eq!(
            record.contract,
            Some(ContractTerms {
                months: 11,
                url: "https://example.com/contract".to_string(),
            })
        );
    }

    #[test]
    fn contract_is_ignored_without_introductory_rate() {
        let record = derive(&plan(&[("contract_duration", "12")])).unwrap();
        assert_eq!(record.contract, None);
    }

    #[test]
    fn non_numeric_contract_duration_is_rejected() {
        let error = derive(&plan(&[
            ("introductory_period_in_months", "6"),
            ("introductory_price_per_month", "$19.99"),
            ("contract_duration", "two years"),
        ]))
        .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Format);
        assert_eq!(error.row, 3);
    }

    #[test]
    fn billing_frequency_must_be_integer() {
        let error = derive(&plan(&[("billing_frequency_in_months", "1.5")])).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Format);
        assert!(error.to_string().contains(BILLING_FREQUENCY_IN_MONTHS));
    }

    #[test]
    fn mills_round_to_cents_before_multiplying() {
        let record = derive(&plan(&[
            ("data_service_price", "$10.005"),
            ("billing_frequency_in_months", "1"),
        ]))
        .unwrap();
        assert_eq!(record.monthly_price, "10.01");
    }

    #[test]
    fn speeds_are_converted() {
        let record = derive(&plan(&[])).unwrap();
        assert_eq!(record.download_speed.to_string(), "1000");
        assert_eq!(record.upload_speed.to_string(), "1.5");
    }

    #[test]
    fn service_type_defaults_to_fixed() {
        assert_eq!(service_type(""), ServiceType::Fixed);
        assert_eq!(service_type("FIXED"), ServiceType::Fixed);
        assert_eq!(service_type("mobile"), ServiceType::Mobile);
        assert_eq!(service_type("M"), ServiceType::Mobile);
    }

    #[test]
    fn acp_accepts_common_truthy_values() {
        for text in ["yes", "YES", "1", "True"] {
            assert!(acp_enabled(text), "{text}");
        }
        for text in ["", "no", "0", "y"] {
            assert!(!acp_enabled(text), "{text}");
        }
    }

    #[test]
    fn optional_values_strip_currency() {
        let record = derive(&plan(&[
            ("early_termination_fee", "$150"),
            ("overage_fee", "$10"),
            ("overage_data_amount", "50"),
            ("data_included_in_monthly_price", "1024"),
        ]))
        .unwrap();
        assert_eq!(record.early_termination_fee.as_deref(), Some("150"));
        assert_eq!(record.overage_fee, "10");
        assert_eq!(record.data_included_gb.as_deref(), Some("1024"));

        let unlimited = derive(&plan(&[])).unwrap();
        assert_eq!(unlimited.early_termination_fee, None);
        assert_eq!(unlimited.data_included_gb, None);
    }

    #[test]
    fn charge_errors_carry_the_row() {
        let error = derive(&plan(&[("monthly_fee_name_1", "Modem")])).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingPair);
        assert_eq!(error.row, 3);
    }
}
