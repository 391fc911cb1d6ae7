//! Per-language symptom vocabularies.
//!
//! The YAML table keeps the historical layout: one ordered list per language, positionally
//! aligned with the canonical list. On load every list is turned into an explicit
//! `label -> canonical position` index and checked for alignment, so a localised label can only
//! ever resolve to a position that exists in the canonical vocabulary.

use super::parse_yaml;
use crate::{TriageError, TriageResult};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use triage_types::NonEmptyText;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VocabulariesWire {
    canonical: NonEmptyText,
    vocabularies: BTreeMap<String, Vec<String>>,
}

/// The symptom labels of a single language.
#[derive(Clone, Debug, PartialEq)]
pub struct Vocabulary {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Vocabulary {
    fn build(language: &str, raw_labels: Vec<String>) -> TriageResult<Self> {
        let mut labels = Vec::with_capacity(raw_labels.len());
        let mut positions = HashMap::with_capacity(raw_labels.len());

        for (position, raw) in raw_labels.into_iter().enumerate() {
            let label = NonEmptyText::new(&raw)
                .map_err(|_| {
                    TriageError::TableSchema(format!(
                        "vocabulary '{language}' has a blank label at position {position}"
                    ))
                })?
                .into_inner();

            if positions.insert(label.clone(), position).is_some() {
                return Err(TriageError::DuplicateLabel {
                    language: language.to_string(),
                    label,
                });
            }
            labels.push(label);
        }

        Ok(Self { labels, positions })
    }

    /// Labels in vocabulary order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of an exact (case-sensitive) label match.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }
}

/// All symptom vocabularies, keyed by language tag.
#[derive(Clone, Debug)]
pub struct SymptomVocabularies {
    canonical_language: String,
    canonical: Vocabulary,
    localized: BTreeMap<String, Vocabulary>,
}

impl SymptomVocabularies {
    /// Parse and validate the `symptoms.yaml` table.
    pub fn parse(yaml_text: &str) -> TriageResult<Self> {
        let wire: VocabulariesWire = parse_yaml("symptoms", yaml_text)?;
        Self::new(wire.canonical.into_inner(), wire.vocabularies)
    }

    /// Build validated vocabularies from positional lists.
    ///
    /// # Errors
    ///
    /// - `MissingCanonicalVocabulary` if `lists` has no entry for `canonical_language`
    /// - `VocabularyLengthMismatch` if any localised list differs in length from the canonical one
    /// - `DuplicateLabel` if a label repeats within one language
    pub fn new(
        canonical_language: impl Into<String>,
        mut lists: BTreeMap<String, Vec<String>>,
    ) -> TriageResult<Self> {
        let canonical_language = canonical_language.into();
        let canonical_labels = lists
            .remove(&canonical_language)
            .ok_or_else(|| TriageError::MissingCanonicalVocabulary(canonical_language.clone()))?;
        let canonical = Vocabulary::build(&canonical_language, canonical_labels)?;

        let mut localized = BTreeMap::new();
        for (language, labels) in lists {
            if labels.len() != canonical.len() {
                return Err(TriageError::VocabularyLengthMismatch {
                    language,
                    expected: canonical.len(),
                    found: labels.len(),
                });
            }
            let vocabulary = Vocabulary::build(&language, labels)?;
            localized.insert(language, vocabulary);
        }

        tracing::debug!(
            "loaded {} canonical symptoms and {} localised vocabularies",
            canonical.len(),
            localized.len()
        );

        Ok(Self {
            canonical_language,
            canonical,
            localized,
        })
    }

    /// Build vocabularies without the alignment check, to exercise the normaliser's
    /// out-of-range fallback.
    #[cfg(test)]
    pub(crate) fn from_lists_unchecked(
        canonical_language: &str,
        canonical: Vec<String>,
        localized: Vec<(&str, Vec<String>)>,
    ) -> Self {
        let build = |labels: Vec<String>| Vocabulary {
            positions: labels
                .iter()
                .enumerate()
                .map(|(position, label)| (label.clone(), position))
                .collect(),
            labels,
        };

        let canonical = build(canonical);
        let localized = localized
            .into_iter()
            .map(|(language, labels)| (language.to_string(), build(labels)))
            .collect();

        Self {
            canonical_language: canonical_language.to_string(),
            canonical,
            localized,
        }
    }

    pub fn canonical_language(&self) -> &str {
        &self.canonical_language
    }

    pub fn canonical(&self) -> &Vocabulary {
        &self.canonical
    }

    /// Vocabulary for `language`, canonical included.
    pub fn get(&self, language: &str) -> Option<&Vocabulary> {
        if language == self.canonical_language {
            Some(&self.canonical)
        } else {
            self.localized.get(language)
        }
    }

    /// Vocabulary for `language`, or the canonical one when the tag is unknown.
    pub fn get_or_canonical(&self, language: &str) -> &Vocabulary {
        self.get(language).unwrap_or(&self.canonical)
    }

    /// Supported language tags, canonical first.
    pub fn languages(&self) -> Vec<String> {
        std::iter::once(self.canonical_language.clone())
            .chain(self.localized.keys().cloned())
            .collect()
    }
}
