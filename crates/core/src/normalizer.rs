//! Symptom normalisation.
//!
//! Maps user-entered labels, in any supported language, onto lower-cased canonical symptom
//! labels. Labels that match nothing pass through lower-cased, so free text and labels that are
//! already canonical can still match a disease profile.

use crate::tables::{SymptomVocabularies, Vocabulary};

#[derive(Clone, Copy, Debug)]
pub struct SymptomNormalizer<'a> {
    vocabularies: &'a SymptomVocabularies,
}

impl<'a> SymptomNormalizer<'a> {
    pub fn new(vocabularies: &'a SymptomVocabularies) -> Self {
        Self { vocabularies }
    }

    /// Normalise `raw_symptoms` entered in `language`.
    ///
    /// Output order matches input order and duplicates are kept.
    ///
    /// - Canonical language: each entry is lower-cased and trimmed.
    /// - Other languages: each trimmed entry is looked up exactly (case-sensitive) in that
    ///   language's vocabulary and replaced by the canonical label at the same position.
    ///   Misses pass through lower-cased.
    /// - Unknown languages behave like an empty vocabulary: everything passes through.
    pub fn normalize<S: AsRef<str>>(&self, raw_symptoms: &[S], language: &str) -> Vec<String> {
        if language == self.vocabularies.canonical_language() {
            return raw_symptoms
                .iter()
                .map(|entry| entry.as_ref().to_lowercase().trim().to_string())
                .collect();
        }

        let vocabulary = self.vocabularies.get(language);
        if vocabulary.is_none() {
            tracing::debug!("no vocabulary for language '{}', passing symptoms through", language);
        }

        raw_symptoms
            .iter()
            .map(|entry| self.to_canonical(entry.as_ref().trim(), vocabulary))
            .collect()
    }

    fn to_canonical(&self, entry: &str, vocabulary: Option<&Vocabulary>) -> String {
        let canonical = vocabulary
            .and_then(|v| v.position(entry))
            .and_then(|position| self.vocabularies.canonical().labels().get(position));

        match canonical {
            Some(label) => label.to_lowercase(),
            None => entry.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;

    fn tables() -> ReferenceTables {
        ReferenceTables::embedded().expect("embedded tables load")
    }

    #[test]
    fn empty_input_yields_empty_output_for_any_language() {
        let tables = tables();
        let normalizer = SymptomNormalizer::new(tables.vocabularies());
        let empty: [&str; 0] = [];

        for language in ["en", "hi", "mr", "xx"] {
            assert!(normalizer.normalize(&empty, language).is_empty());
        }
    }

    #[test]
    fn canonical_language_folds_case_and_trims() {
        let tables = tables();
        let normalizer = SymptomNormalizer::new(tables.vocabularies());

        assert_eq!(
            normalizer.normalize(&["FEVER", " cough "], "en"),
            vec!["fever", "cough"]
        );
    }

    #[test]
    fn localised_label_maps_to_canonical_label_at_same_position() {
        let tables = tables();
        let vocabularies = tables.vocabularies();
        let normalizer = SymptomNormalizer::new(vocabularies);

        for language in ["hi", "mr"] {
            let localized = vocabularies.get(language).expect("language present");
            for (position, label) in localized.labels().iter().enumerate() {
                let expected = vocabularies.canonical().labels()[position].to_lowercase();
                assert_eq!(normalizer.normalize(&[label.as_str()], language), vec![expected]);
            }
        }
    }

    #[test]
    fn localised_lookup_trims_and_keeps_order_and_duplicates() {
        let tables = tables();
        let normalizer = SymptomNormalizer::new(tables.vocabularies());

        assert_eq!(
            normalizer.normalize(&[" बुखार ", "छींक", "बुखार"], "hi"),
            vec!["fever", "sneezing", "fever"]
        );
    }

    #[test]
    fn localised_miss_passes_through_lower_cased() {
        let tables = tables();
        let normalizer = SymptomNormalizer::new(tables.vocabularies());

        assert_eq!(
            normalizer.normalize(&["  Dehydration ", "Fever"], "mr"),
            vec!["dehydration", "fever"]
        );
    }

    #[test]
    fn unknown_language_passes_everything_through() {
        let tables = tables();
        let normalizer = SymptomNormalizer::new(tables.vocabularies());

        assert_eq!(
            normalizer.normalize(&["बुखार", " Body Ache"], "fr"),
            vec!["बुखार", "body ache"]
        );
    }

    #[test]
    fn position_beyond_canonical_vocabulary_falls_back_to_raw_label() {
        let vocabularies = SymptomVocabularies::from_lists_unchecked(
            "en",
            vec!["fever".into()],
            vec![("de", vec!["Fieber".into(), "Husten".into()])],
        );
        let normalizer = SymptomNormalizer::new(&vocabularies);

        assert_eq!(
            normalizer.normalize(&["Fieber", "Husten"], "de"),
            vec!["fever", "husten"]
        );
    }
}
