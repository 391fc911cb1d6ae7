#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read reference table: {0}")]
    FileRead(std::io::Error),
    #[error("reference table error: {0}")]
    TableSchema(String),

    #[error("no vocabulary found for canonical language '{0}'")]
    MissingCanonicalVocabulary(String),
    #[error(
        "vocabulary '{language}' has {found} labels but the canonical vocabulary has {expected}"
    )]
    VocabularyLengthMismatch {
        language: String,
        expected: usize,
        found: usize,
    },
    #[error("vocabulary '{language}' lists '{label}' more than once")]
    DuplicateLabel { language: String, label: String },

    #[error("disease '{0}' is listed more than once")]
    DuplicateDisease(String),
    #[error("unknown disease '{0}'")]
    UnknownDisease(String),

    #[error("case series for {disease}/{region} has {found} values but {expected} years are defined")]
    CaseSeriesLength {
        disease: String,
        region: String,
        expected: usize,
        found: usize,
    },
    #[error("case series for {disease} names unknown region '{region}'")]
    UnknownRegion { disease: String, region: String },
    #[error("Invalid disease/state/year selection")]
    InvalidSelection,
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
