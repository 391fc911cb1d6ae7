//! Prediction service: normalise, score, rank and attach advice.

use crate::normalizer::SymptomNormalizer;
use crate::scorer::{DiseaseScorer, ScoreSheet};
use crate::tables::ReferenceTables;
use crate::wire::{PredictRes, PredictionEntry};
use std::sync::Arc;
use triage_types::NonEmptyText;

/// Pure prediction operations over shared, immutable reference tables.
#[derive(Clone, Debug)]
pub struct PredictionService {
    tables: Arc<ReferenceTables>,
}

impl PredictionService {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Resolve an optional request language: missing or blank tags mean the canonical language.
    ///
    /// Unknown tags are kept as-is; the normaliser passes their symptoms through and advice
    /// lookup yields empty text.
    pub fn resolve_language<'a>(&'a self, language: Option<&'a str>) -> &'a str {
        language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.tables.vocabularies().canonical_language())
    }

    /// Rank every disease against `symptoms` entered in `language`.
    ///
    /// Blank entries are dropped before normalisation.
    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S], language: Option<&str>) -> PredictRes {
        let language = self.resolve_language(language);
        let submitted = NonEmptyText::collect_non_blank(symptoms);
        let normalized =
            SymptomNormalizer::new(self.tables.vocabularies()).normalize(&submitted, language);
        let sheet = DiseaseScorer::new(self.tables.catalogue()).score(&normalized);

        let unrecognized_symptoms = unmatched_symptoms(&normalized, &sheet);
        if !unrecognized_symptoms.is_empty() {
            tracing::debug!(
                "symptoms matched no disease profile ({}): {:?}",
                language,
                unrecognized_symptoms
            );
        }

        let results: Vec<PredictionEntry> = sheet
            .into_ranked()
            .into_iter()
            .map(|score| PredictionEntry {
                advice: self
                    .tables
                    .advice()
                    .lookup(&score.disease, language)
                    .to_string(),
                disease: score.disease,
                probability: score.probability,
                matched_symptoms: score.matched,
            })
            .collect();
        let highest = results.first().cloned();

        PredictRes {
            results,
            highest,
            unrecognized_symptoms,
        }
    }

    /// Symptom labels offered for `language`, or the canonical labels when it is unknown.
    pub fn symptoms_for(&self, language: Option<&str>) -> Vec<String> {
        let language = self.resolve_language(language);
        self.tables
            .vocabularies()
            .get_or_canonical(language)
            .labels()
            .to_vec()
    }

    pub fn languages(&self) -> Vec<String> {
        self.tables.vocabularies().languages()
    }

    pub fn diseases(&self) -> Vec<String> {
        self.tables.catalogue().names()
    }
}

/// Normalised entries that no disease profile contains, first occurrence only.
fn unmatched_symptoms(normalized: &[String], sheet: &ScoreSheet) -> Vec<String> {
    let mut unmatched: Vec<String> = Vec::new();
    for symptom in normalized {
        let matched_somewhere = sheet
            .scores()
            .iter()
            .any(|score| score.matched.contains(symptom));
        if !matched_somewhere && !unmatched.contains(symptom) {
            unmatched.push(symptom.clone());
        }
    }
    unmatched
}
