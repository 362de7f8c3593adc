//! Category classification of joined drug records.
//!
//! Every check is a case-sensitive substring test on the comma-joined text
//! of the list field, so a dosage form of `EFFERVESCENT STICK` is caught by
//! the `STICK` exclusion.

use dpd_model::{Category, ClassifierConfig, JoinedDrugRecord, flatten};

fn contains_marker(text: &str, marker: &str) -> bool {
    !marker.is_empty() && text.contains(marker)
}

/// Decides category membership using a [`ClassifierConfig`].
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    config: ClassifierConfig,
}

impl CategoryClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn is_human(&self, record: &JoinedDrugRecord) -> bool {
        contains_marker(&record.class, &self.config.human_marker)
    }

    /// Human, not CAT IV, no excluded dosage form, scheduled OTC.
    pub fn is_otc(&self, record: &JoinedDrugRecord) -> bool {
        let forms = flatten(&record.dosage_form);
        let schedule = flatten(&record.schedule);
        self.is_human(record)
            && !contains_marker(
                &record.product_categorization,
                &self.config.excluded_categorization,
            )
            && !self
                .config
                .otc_excluded_forms
                .iter()
                .any(|form| contains_marker(&forms, form))
            && contains_marker(&schedule, &self.config.otc_schedule_marker)
    }

    /// Human and scheduled as prescription.
    pub fn is_prescription(&self, record: &JoinedDrugRecord) -> bool {
        self.is_human(record)
            && contains_marker(
                &flatten(&record.schedule),
                &self.config.prescription_schedule_marker,
            )
    }

    pub fn includes(&self, record: &JoinedDrugRecord, category: Category) -> bool {
        match category {
            Category::Otc => self.is_otc(record),
            Category::Prescription => self.is_prescription(record),
            Category::OtcPrescription => self.is_otc(record) || self.is_prescription(record),
            Category::All => true,
        }
    }
}
