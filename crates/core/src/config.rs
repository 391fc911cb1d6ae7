//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read process-wide environment variables;
//! they only see the tables and stores built from a `CoreConfig`.

use crate::{TriageError, TriageResult};
use std::borrow::Cow;
use std::path::PathBuf;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    data_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// When `data_dir` is given it must be an existing directory. Tables it does not contain
    /// fall back to the copies embedded in the binary.
    pub fn new(data_dir: Option<PathBuf>) -> TriageResult<Self> {
        if let Some(dir) = &data_dir {
            if !dir.is_dir() {
                return Err(TriageError::InvalidInput(format!(
                    "reference data directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        Ok(Self { data_dir })
    }

    /// Configuration that only uses the embedded reference tables.
    pub fn embedded() -> Self {
        Self::default()
    }

    /// Read a reference table by file name.
    ///
    /// Returns the override from the data directory when present, otherwise `embedded`.
    pub fn read_table(
        &self,
        file_name: &str,
        embedded: &'static str,
    ) -> TriageResult<Cow<'static, str>> {
        let Some(dir) = &self.data_dir else {
            return Ok(Cow::Borrowed(embedded));
        };

        let path = dir.join(file_name);
        if !path.is_file() {
            tracing::debug!("{} not found in data dir, using embedded table", file_name);
            return Ok(Cow::Borrowed(embedded));
        }

        tracing::info!("loading reference table from {}", path.display());
        std::fs::read_to_string(&path)
            .map(Cow::Owned)
            .map_err(TriageError::FileRead)
    }
}

/// Parse the data directory from an optional environment value.
///
/// `None` or an empty/whitespace value means "use embedded tables".
pub fn data_dir_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_env_value_means_embedded() {
        assert_eq!(data_dir_from_env_value(None), None);
        assert_eq!(data_dir_from_env_value(Some("   ".into())), None);
        assert_eq!(
            data_dir_from_env_value(Some(" /srv/triage ".into())),
            Some(PathBuf::from("/srv/triage"))
        );
    }

    #[test]
    fn rejects_missing_data_dir() {
        let err = CoreConfig::new(Some(PathBuf::from("/definitely/not/here")))
            .expect_err("missing dir rejected");
        assert!(matches!(err, TriageError::InvalidInput(msg) if msg.contains("does not exist")));
    }

    #[test]
    fn reads_override_and_falls_back_per_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("advice.yaml"), "override").expect("write");

        let cfg = CoreConfig::new(Some(dir.path().to_path_buf())).expect("valid dir");
        let advice = cfg.read_table("advice.yaml", "embedded").expect("read");
        let symptoms = cfg.read_table("symptoms.yaml", "embedded").expect("read");

        assert_eq!(advice, "override");
        assert_eq!(symptoms, "embedded");
        assert!(matches!(symptoms, Cow::Borrowed(_)));
    }
}
