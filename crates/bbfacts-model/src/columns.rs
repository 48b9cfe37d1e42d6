//! CSV column names understood by the label generator.

pub const COMPANY_NAME: &str = "company_name";
pub const DISCOUNTS_AND_BUNDLES_URL: &str = "discounts_and_bundles_url";
pub const ACP: &str = "acp";
pub const CUSTOMER_SUPPORT_URL: &str = "customer_support_url";
pub const CUSTOMER_SUPPORT_PHONE: &str = "customer_support_phone";
pub const NETWORK_MANAGEMENT_URL: &str = "network_management_url";
pub const PRIVACY_POLICY_URL: &str = "privacy_policy_url";
pub const FCC_ID: &str = "fcc_id";
pub const DATA_SERVICE_ID: &str = "data_service_id";
pub const DATA_SERVICE_NAME: &str = "data_service_name";
pub const FIXED_OR_MOBILE: &str = "fixed_or_mobile";
pub const DATA_SERVICE_PRICE: &str = "data_service_price";
pub const BILLING_FREQUENCY_IN_MONTHS: &str = "billing_frequency_in_months";
pub const INTRODUCTORY_PERIOD_IN_MONTHS: &str = "introductory_period_in_months";
pub const INTRODUCTORY_PRICE_PER_MONTH: &str = "introductory_price_per_month";
pub const CONTRACT_DURATION: &str = "contract_duration";
pub const CONTRACT_URL: &str = "contract_url";
pub const EARLY_TERMINATION_FEE: &str = "early_termination_fee";
pub const DL_SPEED_IN_KBPS: &str = "dl_speed_in_kbps";
pub const UL_SPEED_IN_KBPS: &str = "ul_speed_in_kbps";
pub const LATENCY_IN_MS: &str = "latency_in_ms";
pub const DATA_INCLUDED_IN_MONTHLY_PRICE: &str = "data_included_in_monthly_price";
pub const OVERAGE_FEE: &str = "overage_fee";
pub const OVERAGE_DATA_AMOUNT: &str = "overage_data_amount";

/// Prefix of one-time fee name columns (`one_time_fee_name_<n>`).
pub const ONE_TIME_FEE_NAME_PREFIX: &str = "one_time_fee_name_";
/// Prefix of one-time fee price columns (`one_time_fee_price_<n>`).
pub const ONE_TIME_FEE_PRICE_PREFIX: &str = "one_time_fee_price_";
/// Prefix of monthly fee name columns (`monthly_fee_name_<n>`).
pub const MONTHLY_FEE_NAME_PREFIX: &str = "monthly_fee_name_";
/// Prefix of monthly fee price columns (`monthly_fee_price_<n>`).
pub const MONTHLY_FEE_PRICE_PREFIX: &str = "monthly_fee_price_";

/// Every indexed fee column prefix.
pub const FEE_COLUMN_PREFIXES: [&str; 4] = [
    MONTHLY_FEE_NAME_PREFIX,
    MONTHLY_FEE_PRICE_PREFIX,
    ONE_TIME_FEE_NAME_PREFIX,
    ONE_TIME_FEE_PRICE_PREFIX,
];

/// Highest fee index scanned for `*_fee_name_<n>` / `*_fee_price_<n>` pairs.
pub const MAX_CHARGE_INDEX: usize = 99;

/// Column name for an indexed fee column.
pub fn indexed(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}")
}
