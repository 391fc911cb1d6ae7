//! Wire types exchanged over the REST API and printed by the CLI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

/// Disease → region → year → case count.
pub type StatewiseCounts = BTreeMap<String, BTreeMap<String, BTreeMap<String, u32>>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// A prediction request: raw symptom labels in the given language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PredictReq {
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Language tag of the symptom labels; defaults to the canonical language.
    #[serde(default)]
    pub lang: Option<String>,
}

/// One ranked disease.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionEntry {
    pub disease: String,
    /// Percentage in `0..=100`, one decimal place.
    pub probability: f64,
    /// Canonical labels of the submitted symptoms that are typical of this disease.
    #[serde(default)]
    pub matched_symptoms: Vec<String>,
    #[serde(default)]
    pub advice: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictRes {
    /// All diseases, highest probability first.
    pub results: Vec<PredictionEntry>,
    /// The first entry of `results`, if any.
    pub highest: Option<PredictionEntry>,
    /// Normalised symptoms that matched no disease profile.
    pub unrecognized_symptoms: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LanguageQuery {
    /// Language tag; unknown or missing tags fall back to the canonical language.
    pub lang: Option<String>,
}

/// A request to export prediction results as a text report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportReq {
    #[serde(default)]
    pub results: Vec<PredictionEntry>,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatsRes {
    #[schema(value_type = Object)]
    pub statewise: StatewiseCounts,
}

/// Valid selections for a case-count update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatsOptionsRes {
    pub diseases: Vec<String>,
    pub states: Vec<String>,
    pub years: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateCasesReq {
    pub disease: String,
    pub state: String,
    pub year: String,
    pub cases: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateCasesRes {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_req_defaults_missing_fields() {
        let req: PredictReq = serde_json::from_str("{}").expect("empty object is valid");
        assert!(req.symptoms.is_empty());
        assert_eq!(req.lang, None);

        let req: PredictReq =
            serde_json::from_str(r#"{"symptoms":["fever"],"lang":"hi"}"#).expect("valid");
        assert_eq!(req.symptoms, vec!["fever"]);
        assert_eq!(req.lang.as_deref(), Some("hi"));
    }

    #[test]
    fn predict_res_serialises_missing_highest_as_null() {
        let res = PredictRes {
            results: vec![],
            highest: None,
            unrecognized_symptoms: vec![],
        };
        let json = serde_json::to_value(&res).expect("serialise");
        assert!(json["highest"].is_null());
    }

    #[test]
    fn update_cases_req_rejects_negative_counts() {
        let err = serde_json::from_str::<UpdateCasesReq>(
            r#"{"disease":"Malaria","state":"Goa","year":"2020","cases":-1}"#,
        )
        .expect_err("negative count");
        assert!(err.to_string().contains("invalid value"));
    }
}
