//! Additional charge collection from indexed fee columns.

use bbfacts_model::{AdditionalCharge, ChargeColumns, ChargeKind, FieldError, PlanFields};
use bbfacts_validate::strip_currency;

/// Monthly and one-time charges, each sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Charges {
    pub monthly: Vec<AdditionalCharge>,
    pub one_time: Vec<AdditionalCharge>,
}

/// Build the charge lists from every indexed name/price pair.
///
/// A pair contributes a charge only when both values are non-empty; a value
/// without its partner is an error.
pub fn collect_charges(fields: &PlanFields, name_limit: usize) -> Result<Charges, FieldError> {
    let mut charges = Charges::default();
    for columns in &fields.charges {
        let Some(charge) = pair_charge(columns, name_limit)? else {
            continue;
        };
        match columns.kind {
            ChargeKind::Monthly => charges.monthly.push(charge),
            ChargeKind::OneTime => charges.one_time.push(charge),
        }
    }
    sort_charges(&mut charges.monthly);
    sort_charges(&mut charges.one_time);
    Ok(charges)
}

fn pair_charge(
    columns: &ChargeColumns,
    name_limit: usize,
) -> Result<Option<AdditionalCharge>, FieldError> {
    let name = columns.name.as_deref();
    let price = columns.price.as_deref();
    match (name, price) {
        (Some(name), Some(price)) if !name.is_empty() && !price.is_empty() => {
            Ok(Some(AdditionalCharge {
                name: truncate_name(name, name_limit),
                value: strip_currency(price).to_string(),
            }))
        }
        (Some(name), None) if !name.is_empty() => Err(FieldError::MissingPair {
            field: columns.name_column.clone(),
            partner: columns.price_column.clone(),
        }),
        (Some(name), Some(_)) if !name.is_empty() => Err(FieldError::EmptyPair {
            field: columns.name_column.clone(),
            partner: columns.price_column.clone(),
        }),
        (None, Some(price)) if !price.is_empty() => Err(FieldError::MissingPair {
            field: columns.price_column.clone(),
            partner: columns.name_column.clone(),
        }),
        (Some(_), Some(price)) if !price.is_empty() => Err(FieldError::EmptyPair {
            field: columns.price_column.clone(),
            partner: columns.name_column.clone(),
        }),
        _ => Ok(None),
    }
}

/// Shorten a name to `limit` characters, ending in `...` when cut.
pub fn truncate_name(name: &str, limit: usize) -> String {
    if name.chars().count() <= limit {
        return name.to_string();
    }
    let mut short: String = name.chars().take(limit.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

/// Stable, case-insensitive sort by charge name.
pub fn sort_charges(charges: &mut [AdditionalCharge]) {
    charges.sort_by_cached_key(|charge| charge.name.to_lowercase());
}
