//! Options controlling label derivation and rendering.

use serde::{Deserialize, Serialize};

/// Longest fee name shown on a label before it is shortened with `...`.
pub const DEFAULT_CHARGE_NAME_LIMIT: usize = 36;

/// Heading drawn at the top of every label.
pub const DEFAULT_LABEL_TITLE: &str = "Broadband Facts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelOptions {
    /// Maximum displayed characters of an additional charge name.
    pub charge_name_limit: usize,
    /// Title text of the label.
    pub title: String,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            charge_name_limit: DEFAULT_CHARGE_NAME_LIMIT,
            title: DEFAULT_LABEL_TITLE.to_string(),
        }
    }
}

impl LabelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_charge_name_limit(mut self, limit: usize) -> Self {
        self.charge_name_limit = limit;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
