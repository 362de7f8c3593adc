use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Product-status scope of an extract set.
///
/// `Marketed` is the default scope and has no filename suffix; every other
/// scope lives in `{root}_{suffix}/{stem}_{suffix}.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Marketed,
    Approved,
    Inactive,
    Dormant,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 4] = [
        ProductStatus::Marketed,
        ProductStatus::Approved,
        ProductStatus::Inactive,
        ProductStatus::Dormant,
    ];

    pub fn suffix(self) -> Option<&'static str> {
        match self {
            ProductStatus::Marketed => None,
            ProductStatus::Approved => Some("ap"),
            ProductStatus::Inactive => Some("ia"),
            ProductStatus::Dormant => Some("dr"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Marketed => "MARKETED",
            ProductStatus::Approved => "APPROVED",
            ProductStatus::Inactive => "INACTIVE",
            ProductStatus::Dormant => "DORMANT",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        let key = value.trim();
        ProductStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ModelError::UnknownStatus(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_match_extract_layout() {
        assert_eq!(ProductStatus::Marketed.suffix(), None);
        assert_eq!(ProductStatus::Approved.suffix(), Some("ap"));
        assert_eq!(ProductStatus::Inactive.suffix(), Some("ia"));
        assert_eq!(ProductStatus::Dormant.suffix(), Some("dr"));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "dormant".parse::<ProductStatus>().unwrap(),
            ProductStatus::Dormant
        );
        assert!(matches!(
            "cancelled".parse::<ProductStatus>(),
            Err(ModelError::UnknownStatus(_))
        ));
    }
}
