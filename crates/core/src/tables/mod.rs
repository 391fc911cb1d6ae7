//! Static reference tables.
//!
//! The tables are plain YAML files. Copies are embedded in the binary; a `TRIAGE_DATA_DIR`
//! override can replace any of them at startup (see [`crate::config::CoreConfig`]). Everything
//! is validated once on load and immutable afterwards.

pub mod advice;
pub mod catalogue;
pub mod vocabulary;

pub use advice::AdviceBook;
pub use catalogue::{DiseaseCatalogue, DiseaseProfile};
pub use vocabulary::{SymptomVocabularies, Vocabulary};

use crate::config::CoreConfig;
use crate::constants::{ADVICE_TABLE_FILENAME, DISEASES_TABLE_FILENAME, SYMPTOMS_TABLE_FILENAME};
use crate::{TriageError, TriageResult};
use serde::de::DeserializeOwned;

pub(crate) const EMBEDDED_SYMPTOMS: &str = include_str!("../../data/symptoms.yaml");
pub(crate) const EMBEDDED_DISEASES: &str = include_str!("../../data/diseases.yaml");
pub(crate) const EMBEDDED_ADVICE: &str = include_str!("../../data/advice.yaml");

/// Deserialize a YAML table, reporting the failing path on schema mismatch.
pub(crate) fn parse_yaml<T: DeserializeOwned>(table: &str, yaml_text: &str) -> TriageResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>"
        } else {
            path.as_str()
        };
        TriageError::TableSchema(format!("{table} table schema mismatch at {path}: {source}"))
    })
}

/// The immutable tables the normaliser, scorer and advice lookup consume.
#[derive(Clone, Debug)]
pub struct ReferenceTables {
    vocabularies: SymptomVocabularies,
    catalogue: DiseaseCatalogue,
    advice: AdviceBook,
}

impl ReferenceTables {
    pub fn new(
        vocabularies: SymptomVocabularies,
        catalogue: DiseaseCatalogue,
        advice: AdviceBook,
    ) -> Self {
        Self {
            vocabularies,
            catalogue,
            advice,
        }
    }

    /// Load every table, honouring the data-directory override.
    pub fn load(cfg: &CoreConfig) -> TriageResult<Self> {
        let symptoms = cfg.read_table(SYMPTOMS_TABLE_FILENAME, EMBEDDED_SYMPTOMS)?;
        let diseases = cfg.read_table(DISEASES_TABLE_FILENAME, EMBEDDED_DISEASES)?;
        let advice = cfg.read_table(ADVICE_TABLE_FILENAME, EMBEDDED_ADVICE)?;

        let tables = Self::from_yaml(&symptoms, &diseases, &advice)?;
        tracing::info!(
            "reference tables ready: {} diseases, languages {:?}",
            tables.catalogue.len(),
            tables.vocabularies.languages()
        );
        Ok(tables)
    }

    /// Tables compiled into the binary.
    pub fn embedded() -> TriageResult<Self> {
        Self::from_yaml(EMBEDDED_SYMPTOMS, EMBEDDED_DISEASES, EMBEDDED_ADVICE)
    }

    pub fn from_yaml(symptoms: &str, diseases: &str, advice: &str) -> TriageResult<Self> {
        let vocabularies = SymptomVocabularies::parse(symptoms)?;
        let catalogue = DiseaseCatalogue::parse(diseases)?;
        let advice = AdviceBook::parse(advice, &catalogue)?;

        Ok(Self::new(vocabularies, catalogue, advice))
    }

    pub fn vocabularies(&self) -> &SymptomVocabularies {
        &self.vocabularies
    }

    pub fn catalogue(&self) -> &DiseaseCatalogue {
        &self.catalogue
    }

    pub fn advice(&self) -> &AdviceBook {
        &self.advice
    }
}
