//! Output categories and the text markers the classifier looks for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Regulatory category selected for an output run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Human, non-CAT IV, over-the-counter products outside the excluded forms.
    Otc,
    /// Human prescription products.
    Prescription,
    /// Anything that qualifies as either OTC or prescription.
    OtcPrescription,
    /// No filtering.
    All,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::OtcPrescription,
        Category::Otc,
        Category::Prescription,
        Category::All,
    ];

    /// Prefix of the relational and lookup output filenames.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Category::Otc => "otc",
            Category::Prescription => "prs",
            Category::OtcPrescription => "drugs",
            Category::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Otc => "OTC",
            Category::Prescription => "PRS",
            Category::OtcPrescription => "OTC+PRS",
            Category::All => "ALL",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "OTC" => Ok(Category::Otc),
            "PRS" | "PRESCRIPTION" => Ok(Category::Prescription),
            "OTC+PRS" | "OTC+PRESCRIPTION" | "DRUGS" => Ok(Category::OtcPrescription),
            "ALL" => Ok(Category::All),
            _ => Err(ModelError::UnknownCategory(value.to_string())),
        }
    }
}

/// Markers and exclusion lists used by the category classifier.
///
/// All matching is case-sensitive substring matching on the comma-joined
/// text of list fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub human_marker: String,
    pub excluded_categorization: String,
    pub otc_excluded_forms: Vec<String>,
    pub otc_schedule_marker: String,
    pub prescription_schedule_marker: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            human_marker: "Human".to_string(),
            excluded_categorization: "CAT IV".to_string(),
            otc_excluded_forms: ["TEA (HERBAL)", "SHAMPOO", "SOAP", "STICK", "TOOTHPASTE", "WIPE"]
                .into_iter()
                .map(String::from)
                .collect(),
            otc_schedule_marker: "OTC".to_string(),
            prescription_schedule_marker: "Prescription".to_string(),
        }
    }
}
