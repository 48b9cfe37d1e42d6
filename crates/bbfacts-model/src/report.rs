//! Serializable error report handed to the CLI.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, RowError};

/// Key-value error report: `{"isError":"true","Message":"...","row":3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    #[serde(rename = "isError")]
    pub is_error: String,
    #[serde(rename = "Message")]
    pub message: String,
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<ErrorKind>,
}

impl ErrorReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&RowError> for ErrorReport {
    fn from(error: &RowError) -> Self {
        Self {
            is_error: "true".to_string(),
            message: format!("CSV: {}", error.source),
            row: error.row,
            kind: Some(error.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;

    #[test]
    fn report_serializes_to_key_value_json() {
        let error = FieldError::Symmetry {
            first: "introductory_period_in_months".to_string(),
            second: "introductory_price_per_month".to_string(),
        }
        .at_row(3);
        let json = ErrorReport::from(&error).to_json().unwrap();
        insta::assert_snapshot!(json, @r#"{"isError":"true","Message":"CSV: introductory_period_in_months and introductory_price_per_month must both be present if either is set","row":3,"kind":"Symmetry"}"#);
    }

    #[test]
    fn report_round_trips_without_kind() {
        let json = r#"{"isError":"true","Message":"bad","row":2}"#;
        let report: ErrorReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.kind, None);
        assert_eq!(report.row, 2);
    }
}
