//! Disease catalogue: the ordered disease list and each disease's typical symptoms.
//!
//! Catalogue order is significant. It is the enumeration order the scorer walks and the
//! tie-break order for equal probabilities.

use super::parse_yaml;
use crate::{TriageError, TriageResult};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use triage_types::NonEmptyText;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogueWire {
    diseases: Vec<DiseaseWire>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiseaseWire {
    name: NonEmptyText,
    #[serde(default)]
    symptoms: Vec<NonEmptyText>,
}

/// A disease and the set of canonical symptoms typical of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiseaseProfile {
    name: String,
    symptoms: BTreeSet<String>,
}

impl DiseaseProfile {
    /// Profile symptoms are case-folded; repeats collapse into one set member.
    pub fn new<I, S>(name: impl Into<String>, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            symptoms: symptoms
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `|P(d)|`, the denominator of the coverage fraction.
    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn contains(&self, normalized_symptom: &str) -> bool {
        self.symptoms.contains(normalized_symptom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiseaseCatalogue {
    diseases: Vec<DiseaseProfile>,
}

impl DiseaseCatalogue {
    /// Parse and validate the `diseases.yaml` table.
    pub fn parse(yaml_text: &str) -> TriageResult<Self> {
        let wire: CatalogueWire = parse_yaml("diseases", yaml_text)?;
        Self::new(
            wire.diseases
                .into_iter()
                .map(|d| DiseaseProfile::new(d.name.into_inner(), d.symptoms))
                .collect(),
        )
    }

    /// # Errors
    ///
    /// Returns `DuplicateDisease` if two profiles share a name.
    pub fn new(diseases: Vec<DiseaseProfile>) -> TriageResult<Self> {
        let mut seen = HashSet::with_capacity(diseases.len());
        for disease in &diseases {
            if !seen.insert(disease.name()) {
                return Err(TriageError::DuplicateDisease(disease.name().to_string()));
            }
            if disease.is_empty() {
                tracing::warn!("disease '{}' has no typical symptoms", disease.name());
            }
        }

        Ok(Self { diseases })
    }

    /// Profiles in enumeration order.
    pub fn diseases(&self) -> &[DiseaseProfile] {
        &self.diseases
    }

    pub fn names(&self) -> Vec<String> {
        self.diseases.iter().map(|d| d.name().to_string()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&DiseaseProfile> {
        self.diseases.iter().find(|d| d.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profiles_in_listed_order() {
        let catalogue = DiseaseCatalogue::parse(
            r#"diseases:
  - name: Cholera
    symptoms: [Diarrhea, vomiting, dehydration]
  - name: Malaria
    symptoms: [fever, chills]
  - name: Unprofiled
"#,
        )
        .expect("valid catalogue");

        assert_eq!(catalogue.names(), vec!["Cholera", "Malaria", "Unprofiled"]);
        let cholera = catalogue.get("Cholera").expect("cholera present");
        assert!(cholera.contains("diarrhea"));
        assert!(!cholera.contains("Diarrhea"));
        assert_eq!(cholera.len(), 3);
        assert!(catalogue.get("Unprofiled").expect("present").is_empty());
    }

    #[test]
    fn profile_is_a_set() {
        let profile = DiseaseProfile::new("Flu", ["fever", "Fever", "cough"]);
        assert_eq!(profile.len(), 2);
    }

    #[test]
    fn rejects_duplicate_disease_names() {
        let err = DiseaseCatalogue::new(vec![
            DiseaseProfile::new("Flu", ["fever"]),
            DiseaseProfile::new("Flu", ["cough"]),
        ])
        .expect_err("duplicate");
        assert!(matches!(err, TriageError::DuplicateDisease(name) if name == "Flu"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = DiseaseCatalogue::parse(
            "diseases:\n  - name: Flu\n    symptoms: [fever]\n    severity: high\n",
        )
        .expect_err("unknown key");
        assert!(matches!(err, TriageError::TableSchema(msg) if msg.contains("severity")));
    }
}
