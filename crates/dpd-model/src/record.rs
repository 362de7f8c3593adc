use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Join key shared by every extract table.
pub const DRUG_CODE: &str = "drug_code";

/// Fields later stages expect on every row even though no extract supplies them.
pub const PLACEHOLDER_FIELDS: [&str; 4] = ["upc", "packaging", "packaging_f", "pharmaceutical_std"];

/// One row of one extract, keyed by the table's field names.
///
/// All values are kept as text, including `Y`/`N` flags and numeric codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record by pairing field names with row values in order.
    ///
    /// Pairs stop at the shorter of the two sequences; callers check the
    /// row length against the schema before calling.
    pub fn from_row<N, V>(names: N, values: V) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let fields = names
            .into_iter()
            .zip(values)
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self { fields }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Returns the value of `name`, or an empty string when absent.
    pub fn field(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn drug_code(&self) -> &str {
        self.field(DRUG_CODE)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Adds empty placeholder fields that are not already present.
    pub fn with_placeholders(mut self) -> Self {
        for name in PLACEHOLDER_FIELDS {
            self.fields.entry(name.to_string()).or_default();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_row_pairs_positionally() {
        let record = RawRecord::from_row(["drug_code", "schedule"], ["100", "OTC"]);
        assert_eq!(record.drug_code(), "100");
        assert_eq!(record.get("schedule"), Some("OTC"));
        assert_eq!(record.get("schedule_f"), None);
        assert_eq!(record.field("schedule_f"), "");
    }

    #[test]
    fn placeholders_do_not_overwrite() {
        let mut record = RawRecord::from_row(["drug_code", "upc"], ["1", "0623"]);
        record = record.with_placeholders();
        assert_eq!(record.field("upc"), "0623");
        assert_eq!(record.get("packaging"), Some(""));
        assert_eq!(record.get("pharmaceutical_std"), Some(""));
        assert_eq!(record.len(), 5);
    }
}
