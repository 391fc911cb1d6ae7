//! Constants used throughout the triage core crate.
//!
//! Table file names are shared between the embedded defaults and the optional
//! `TRIAGE_DATA_DIR` override so both sources stay interchangeable.

/// Filename for the per-language symptom vocabularies.
pub const SYMPTOMS_TABLE_FILENAME: &str = "symptoms.yaml";

/// Filename for the disease list and typical-symptom profiles.
pub const DISEASES_TABLE_FILENAME: &str = "diseases.yaml";

/// Filename for the localised advice table.
pub const ADVICE_TABLE_FILENAME: &str = "advice.yaml";

/// Filename for the regional yearly case counts.
pub const CASE_COUNTS_TABLE_FILENAME: &str = "case_counts.yaml";

/// Default REST bind address when `TRIAGE_REST_ADDR` is not set.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Advice lines in exported reports are chunked to this many characters.
pub const REPORT_ADVICE_WIDTH: usize = 90;
