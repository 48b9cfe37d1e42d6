//! Field value parsers.
//!
//! Prices are returned as integers in their smallest unit (cents or mills)
//! so precision checks are exact.

use std::sync::LazyLock;

use regex::Regex;

use bbfacts_model::{FieldError, Mbps, Result};

/// Longest accepted price text, currency symbol included.
pub const MAX_PRICE_LEN: usize = 8;

/// Upper bound for speeds entered as decimal Mbps.
pub const MAX_SPEED_MBPS: f64 = 10_000.0;

/// Upper bound for speeds entered as integer Kbps.
pub const MAX_SPEED_KBPS: u64 = 10_000_000;

/// Length limit for columns whose name contains `url`.
pub const MAX_URL_LEN: usize = 256;

/// Length limit for every other column.
pub const MAX_FIELD_LEN: usize = 36;

static INTRO_PRICE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}(\.\d{1,2})?$").expect("valid introductory price regex")
});

static DATA_SERVICE_PRICE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}(\.\d{3})*(\.\d{1,3})?$").expect("valid data service price regex")
});

/// A decimal number with any number of fraction digits.
static DECIMAL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(\.\d+)?$").expect("valid decimal regex"));

/// Parse an introductory monthly price into cents.
pub fn parse_monthly_intro_price(text: &str, field: &str) -> Result<u64> {
    parse_price(
        text,
        field,
        2,
        &INTRO_PRICE_FORMAT,
        "format should be [$]###.##",
    )
}

/// Parse a data service price into mills (thousandths of a dollar).
pub fn parse_data_service_price(text: &str, field: &str) -> Result<u64> {
    parse_price(
        text,
        field,
        3,
        &DATA_SERVICE_PRICE_FORMAT,
        "format should be [$]###.###",
    )
}

/// Convert mills to cents, rounding half up.
pub fn mills_to_cents(mills: u64) -> u64 {
    (mills + 5) / 10
}

/// Strip a single leading `$`.
pub fn strip_currency(text: &str) -> &str {
    text.strip_prefix('$').unwrap_or(text)
}

fn parse_price(
    text: &str,
    field: &str,
    places: u32,
    format: &Regex,
    hint: &str,
) -> Result<u64> {
    let body = strip_currency(text);
    if text.chars().count() > MAX_PRICE_LEN {
        return Err(FieldError::format(field, hint));
    }
    let scaled = parse_scaled(body, places);
    if format.is_match(body) {
        return match scaled {
            Some((value, true)) => Ok(value),
            _ => Err(FieldError::format(
                field,
                "value could not be converted to a number",
            )),
        };
    }
    match scaled {
        Some((_, false)) if DECIMAL_SHAPE.is_match(body) => Err(FieldError::Precision {
            field: field.to_string(),
            max_decimals: places,
        }),
        _ => Err(FieldError::format(field, hint)),
    }
}

/// Scale a plain decimal by `10^places`.
///
/// Returns the truncated value and whether the dropped digits were all zero.
/// `None` when the text is not a plain decimal or does not fit in a `u64`.
fn parse_scaled(text: &str, places: u32) -> Option<(u64, bool)> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty()
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let places = places as usize;
    let kept = &fraction[..fraction.len().min(places)];
    let exact = fraction[kept.len()..].bytes().all(|b| b == b'0');
    let mut value = whole.parse::<u64>().ok()?;
    for position in 0..places {
        let digit = kept.as_bytes().get(position).map_or(0, |b| u64::from(b - b'0'));
        value = value.checked_mul(10)?.checked_add(digit)?;
    }
    Some((value, exact))
}

/// Parse a speed. Decimal text is Mbps; integer text is Kbps.
pub fn parse_speed(text: &str, field: &str) -> Result<Mbps> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(FieldError::format(
            field,
            "value must be an integer (Kbps) or a decimal (Mbps)",
        ));
    }
    if text.contains('.') {
        let mbps: f64 = text.parse().map_err(|_| {
            FieldError::format(field, "value must be a valid decimal to be read as Mbps")
        })?;
        if !(0.0..=MAX_SPEED_MBPS).contains(&mbps) {
            return Err(FieldError::Range {
                field: field.to_string(),
                min: "0.00".to_string(),
                max: "10000.00".to_string(),
            });
        }
        return Ok(Mbps::new(mbps));
    }
    let out_of_range = || FieldError::Range {
        field: field.to_string(),
        min: "0".to_string(),
        max: MAX_SPEED_KBPS.to_string(),
    };
    // Only digits remain, so a parse failure is overflow.
    let kbps: u64 = text.parse().map_err(|_| out_of_range())?;
    if kbps > MAX_SPEED_KBPS {
        return Err(out_of_range());
    }
    let kbps = u32::try_from(kbps).map_err(|_| out_of_range())?;
    Ok(Mbps::new(f64::from(kbps) / 1000.0))
}

/// Enforce the per-column length limit.
pub fn check_field_length(key: &str, value: &str) -> Result<()> {
    let limit = if key.contains("url") {
        MAX_URL_LEN
    } else {
        MAX_FIELD_LEN
    };
    let actual = value.chars().count();
    if actual > limit {
        return Err(FieldError::Length {
            field: key.to_string(),
            limit,
            actual,
        });
    }
    Ok(())
}
