//! Regional yearly case counts.
//!
//! This is the only mutable reference data in the system. It lives behind an explicitly owned
//! [`CaseCountStore`] handle: any number of concurrent readers, one writer at a time. The
//! scoring path never touches it.

use crate::config::CoreConfig;
use crate::constants::CASE_COUNTS_TABLE_FILENAME;
use crate::tables::{parse_yaml, DiseaseCatalogue};
use crate::wire::{StatewiseCounts, StatsOptionsRes};
use crate::{TriageError, TriageResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use triage_types::NonEmptyText;

pub(crate) const EMBEDDED_CASE_COUNTS: &str = include_str!("../data/case_counts.yaml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaseCountsWire {
    years: Vec<NonEmptyText>,
    regions: Vec<NonEmptyText>,
    cases: BTreeMap<String, BTreeMap<String, Vec<u32>>>,
}

/// Case counts per disease and region, one value per year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseCounts {
    years: Vec<String>,
    regions: Vec<String>,
    series: BTreeMap<String, BTreeMap<String, Vec<u32>>>,
}

impl CaseCounts {
    /// Parse and validate `case_counts.yaml` against the disease catalogue.
    pub fn parse(yaml_text: &str, catalogue: &DiseaseCatalogue) -> TriageResult<Self> {
        let wire: CaseCountsWire = parse_yaml("case counts", yaml_text)?;
        Self::new(
            wire.years.into_iter().map(NonEmptyText::into_inner).collect(),
            wire.regions.into_iter().map(NonEmptyText::into_inner).collect(),
            wire.cases,
            catalogue,
        )
    }

    /// # Errors
    ///
    /// - `UnknownDisease` for a series keyed by a disease outside the catalogue
    /// - `UnknownRegion` for a series keyed by a region outside `regions`
    /// - `CaseSeriesLength` when a series does not hold exactly one value per year
    pub fn new(
        years: Vec<String>,
        regions: Vec<String>,
        series: BTreeMap<String, BTreeMap<String, Vec<u32>>>,
        catalogue: &DiseaseCatalogue,
    ) -> TriageResult<Self> {
        for (disease, by_region) in &series {
            if !catalogue.contains(disease) {
                return Err(TriageError::UnknownDisease(disease.clone()));
            }
            for (region, counts) in by_region {
                if !regions.contains(region) {
                    return Err(TriageError::UnknownRegion {
                        disease: disease.clone(),
                        region: region.clone(),
                    });
                }
                if counts.len() != years.len() {
                    return Err(TriageError::CaseSeriesLength {
                        disease: disease.clone(),
                        region: region.clone(),
                        expected: years.len(),
                        found: counts.len(),
                    });
                }
            }
        }

        Ok(Self {
            years,
            regions,
            series,
        })
    }

    pub fn years(&self) -> &[String] {
        &self.years
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn count(&self, disease: &str, region: &str, year: &str) -> Option<u32> {
        let year_index = self.year_index(year)?;
        self.series
            .get(disease)?
            .get(region)?
            .get(year_index)
            .copied()
    }

    fn year_index(&self, year: &str) -> Option<usize> {
        self.years.iter().position(|y| y == year)
    }

    fn set(&mut self, disease: &str, region: &str, year: &str, cases: u32) -> TriageResult<()> {
        let year_index = self.year_index(year).ok_or(TriageError::InvalidSelection)?;
        let slot = self
            .series
            .get_mut(disease)
            .and_then(|by_region| by_region.get_mut(region))
            .and_then(|counts| counts.get_mut(year_index))
            .ok_or(TriageError::InvalidSelection)?;

        *slot = cases;
        Ok(())
    }

    /// Nested disease → region → year → count view.
    pub fn statewise(&self) -> StatewiseCounts {
        self.series
            .iter()
            .map(|(disease, by_region)| {
                let by_region: BTreeMap<String, BTreeMap<String, u32>> = by_region
                    .iter()
                    .map(|(region, counts)| {
                        let by_year = self.years.iter().cloned().zip(counts.iter().copied());
                        (region.clone(), by_year.collect())
                    })
                    .collect();
                (disease.clone(), by_region)
            })
            .collect()
    }
}

/// Shared handle to the case counts, cheap to clone.
#[derive(Clone, Debug)]
pub struct CaseCountStore {
    inner: Arc<RwLock<CaseCounts>>,
}

impl CaseCountStore {
    pub fn new(counts: CaseCounts) -> Self {
        Self {
            inner: Arc::new(RwLock::new(counts)),
        }
    }

    /// Load case counts, honouring the data-directory override.
    pub fn load(cfg: &CoreConfig, catalogue: &DiseaseCatalogue) -> TriageResult<Self> {
        let text = cfg.read_table(CASE_COUNTS_TABLE_FILENAME, EMBEDDED_CASE_COUNTS)?;
        Ok(Self::new(CaseCounts::parse(&text, catalogue)?))
    }

    /// Owned copy of the current counts.
    pub fn snapshot(&self) -> CaseCounts {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn statewise(&self) -> StatewiseCounts {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .statewise()
    }

    /// Selections accepted by [`CaseCountStore::update`].
    pub fn options(&self, catalogue: &DiseaseCatalogue) -> StatsOptionsRes {
        let counts = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        StatsOptionsRes {
            diseases: catalogue.names(),
            states: counts.regions().to_vec(),
            years: counts.years().to_vec(),
        }
    }

    /// Replace one yearly count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSelection` unless the disease has a series for `region` and `year` is a
    /// defined year. The stored counts are unchanged on error.
    pub fn update(&self, disease: &str, region: &str, year: &str, cases: u32) -> TriageResult<String> {
        let mut counts = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        counts.set(disease, region, year, cases)?;

        tracing::info!("updated {} cases in {} for {} to {}", disease, region, year, cases);
        Ok(format!("Updated {disease} cases in {region} for {year} to {cases}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;

    fn catalogue() -> DiseaseCatalogue {
        ReferenceTables::embedded()
            .expect("embedded tables load")
            .catalogue()
            .clone()
    }

    fn store() -> CaseCountStore {
        let catalogue = catalogue();
        CaseCountStore::load(&CoreConfig::embedded(), &catalogue).expect("embedded counts load")
    }

    #[test]
    fn embedded_counts_load() {
        let counts = store().snapshot();

        assert_eq!(counts.years().len(), 6);
        assert_eq!(counts.regions().len(), 13);
        assert_eq!(counts.count("Malaria", "Maharashtra", "2020"), Some(450));
        assert_eq!(counts.count("Common Cold", "Assam", "2025"), Some(350));
        assert_eq!(counts.count("Common Cold", "Bihar", "2025"), None);
    }

    #[test]
    fn statewise_view_is_keyed_by_year() {
        let statewise = store().statewise();
        assert_eq!(statewise.len(), 10);
        assert_eq!(statewise["Dengue"]["Goa"]["2023"], 30);
        assert_eq!(statewise["Common Cold"].len(), 9);
    }

    #[test]
    fn update_replaces_a_single_count() {
        let store = store();
        let message = store
            .update("Malaria", "Goa", "2024", 99)
            .expect("valid selection");

        assert_eq!(message, "Updated Malaria cases in Goa for 2024 to 99");
        let counts = store.snapshot();
        assert_eq!(counts.count("Malaria", "Goa", "2024"), Some(99));
        assert_eq!(counts.count("Malaria", "Goa", "2023"), Some(22));
    }

    #[test]
    fn update_rejects_unknown_selection_without_changes() {
        let store = store();
        let before = store.snapshot();

        for (disease, region, year) in [
            ("Ebola", "Goa", "2024"),
            ("Malaria", "Atlantis", "2024"),
            ("Malaria", "Goa", "1999"),
            ("Common Cold", "Bihar", "2024"),
        ] {
            let err = store
                .update(disease, region, year, 1)
                .expect_err("invalid selection");
            assert!(matches!(err, TriageError::InvalidSelection));
        }

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn clones_share_the_same_counts() {
        let store = store();
        let handle = store.clone();
        handle.update("Cholera", "UP", "2020", 7).expect("valid");
        assert_eq!(store.snapshot().count("Cholera", "UP", "2020"), Some(7));
    }

    #[test]
    fn concurrent_readers_see_old_or_new_value() {
        let store = store();
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let value = store.snapshot().count("Typhoid", "Goa", "2020");
                        assert!(matches!(value, Some(8) | Some(80)));
                    }
                })
            })
            .collect();

        store.update("Typhoid", "Goa", "2020", 80).expect("valid");
        for reader in readers {
            reader.join().expect("reader thread");
        }
        assert_eq!(store.snapshot().count("Typhoid", "Goa", "2020"), Some(80));
    }

    #[test]
    fn rejects_series_with_wrong_length() {
        let err = CaseCounts::parse(
            "years: [\"2020\", \"2021\"]\nregions: [Goa]\ncases:\n  Malaria:\n    Goa: [1]\n",
            &catalogue(),
        )
        .expect_err("short series");
        assert!(matches!(
            err,
            TriageError::CaseSeriesLength { expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn rejects_unknown_region_and_disease() {
        let err = CaseCounts::parse(
            "years: [\"2020\"]\nregions: [Goa]\ncases:\n  Malaria:\n    Kerala: [1]\n",
            &catalogue(),
        )
        .expect_err("unknown region");
        assert!(matches!(err, TriageError::UnknownRegion { ref region, .. } if region == "Kerala"));

        let err = CaseCounts::parse(
            "years: [\"2020\"]\nregions: [Goa]\ncases:\n  Ebola:\n    Goa: [1]\n",
            &catalogue(),
        )
        .expect_err("unknown disease");
        assert!(matches!(err, TriageError::UnknownDisease(name) if name == "Ebola"));
    }

    #[test]
    fn options_follow_catalogue_and_table_order() {
        let catalogue = catalogue();
        let options = store().options(&catalogue);

        assert_eq!(options.diseases[0], "Malaria");
        assert_eq!(options.states[0], "Maharashtra");
        assert_eq!(options.years, vec!["2020", "2021", "2022", "2023", "2024", "2025"]);
    }
}
