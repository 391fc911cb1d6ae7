//! Localised advice text per disease.

use super::catalogue::DiseaseCatalogue;
use super::parse_yaml;
use crate::{TriageError, TriageResult};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdviceBook {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl AdviceBook {
    /// Parse `advice.yaml`, rejecting advice for diseases the catalogue does not know.
    pub fn parse(yaml_text: &str, catalogue: &DiseaseCatalogue) -> TriageResult<Self> {
        let entries: BTreeMap<String, BTreeMap<String, String>> = parse_yaml("advice", yaml_text)?;
        Self::new(entries, catalogue)
    }

    pub fn new(
        entries: BTreeMap<String, BTreeMap<String, String>>,
        catalogue: &DiseaseCatalogue,
    ) -> TriageResult<Self> {
        if let Some(unknown) = entries.keys().find(|d| !catalogue.contains(d)) {
            return Err(TriageError::UnknownDisease(unknown.clone()));
        }

        for disease in catalogue.diseases() {
            if !entries.contains_key(disease.name()) {
                tracing::warn!("no advice defined for '{}'", disease.name());
            }
        }

        Ok(Self { entries })
    }

    /// Advice for `disease` in `language`; empty when either is missing.
    pub fn lookup(&self, disease: &str, language: &str) -> &str {
        self.entries
            .get(disease)
            .and_then(|by_language| by_language.get(language))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::DiseaseProfile;

    fn catalogue() -> DiseaseCatalogue {
        DiseaseCatalogue::new(vec![
            DiseaseProfile::new("Malaria", ["fever"]),
            DiseaseProfile::new("Dengue", ["rash"]),
        ])
        .expect("valid catalogue")
    }

    #[test]
    fn missing_language_or_disease_yields_empty_advice() {
        let book = AdviceBook::parse("Malaria:\n  en: See a doctor.\n", &catalogue())
            .expect("valid advice");

        assert_eq!(book.lookup("Malaria", "en"), "See a doctor.");
        assert_eq!(book.lookup("Malaria", "fr"), "");
        assert_eq!(book.lookup("Dengue", "en"), "");
    }

    #[test]
    fn rejects_advice_for_unknown_disease() {
        let err = AdviceBook::parse("Ebola:\n  en: Isolate.\n", &catalogue())
            .expect_err("unknown disease");
        assert!(matches!(err, TriageError::UnknownDisease(name) if name == "Ebola"));
    }
}
