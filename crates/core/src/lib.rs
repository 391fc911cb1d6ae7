//! # Triage Core
//!
//! Core logic for the symptom triage service:
//! - Reference tables (vocabularies, disease profiles, advice) loaded and validated at startup
//! - Symptom normalisation across languages
//! - Coverage-based disease scoring and ranking
//! - Regional case counts behind a single-writer store
//! - Plain-text report export
//!
//! **No API concerns**: HTTP servers and CLI parsing belong in `api-rest` and `triage-cli`.

pub mod cases;
pub mod config;
pub mod constants;
pub mod error;
pub mod normalizer;
pub mod prediction;
pub mod report;
pub mod scorer;
pub mod tables;

// Wire types shared with the API crates.
pub use api_shared::wire;

pub use cases::{CaseCountStore, CaseCounts};
pub use config::CoreConfig;
pub use constants::DEFAULT_REST_ADDR;
pub use error::{TriageError, TriageResult};
pub use normalizer::SymptomNormalizer;
pub use prediction::PredictionService;
pub use scorer::{DiseaseScore, DiseaseScorer, ScoreSheet};
pub use tables::ReferenceTables;
pub use triage_types::NonEmptyText;
