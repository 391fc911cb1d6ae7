//! Disease scoring and ranking.
//!
//! Each disease is scored by how much of its typical-symptom profile the normalised input
//! covers (`matches / |profile|`). Coverage values are then normalised into percentages that sum
//! to roughly 100, each rounded to one decimal place. Rounding drift is not corrected.

use crate::tables::DiseaseCatalogue;

/// Score of one disease for one request.
#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseScore {
    pub disease: String,
    /// Input entries found in the profile, duplicates included.
    pub match_count: usize,
    /// `match_count / |profile|`, or `0.0` for an empty profile.
    pub coverage: f64,
    /// Share of the total coverage, in percent, rounded to one decimal place.
    pub probability: f64,
    /// Matching input entries in input order, duplicates included.
    pub matched: Vec<String>,
}

/// Scores for every catalogue disease, in catalogue order.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSheet {
    scores: Vec<DiseaseScore>,
}

impl ScoreSheet {
    pub fn scores(&self) -> &[DiseaseScore] {
        &self.scores
    }

    /// Scores sorted by probability, highest first.
    ///
    /// The sort is stable, so equal probabilities keep catalogue order.
    pub fn into_ranked(self) -> Vec<DiseaseScore> {
        let mut ranked = self.scores;
        ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        ranked
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DiseaseScorer<'a> {
    catalogue: &'a DiseaseCatalogue,
}

impl<'a> DiseaseScorer<'a> {
    pub fn new(catalogue: &'a DiseaseCatalogue) -> Self {
        Self { catalogue }
    }

    /// Score every catalogue disease against already-normalised symptoms.
    pub fn score<S: AsRef<str>>(&self, normalized_symptoms: &[S]) -> ScoreSheet {
        let mut scores: Vec<DiseaseScore> = self
            .catalogue
            .diseases()
            .iter()
            .map(|profile| {
                let matched: Vec<String> = normalized_symptoms
                    .iter()
                    .map(|symptom| symptom.as_ref())
                    .filter(|symptom| profile.contains(symptom))
                    .map(str::to_string)
                    .collect();

                let coverage = if profile.is_empty() {
                    0.0
                } else {
                    matched.len() as f64 / profile.len() as f64
                };

                DiseaseScore {
                    disease: profile.name().to_string(),
                    match_count: matched.len(),
                    coverage,
                    probability: 0.0,
                    matched,
                }
            })
            .collect();

        let total: f64 = scores.iter().map(|s| s.coverage).sum();
        if total > 0.0 {
            for score in &mut scores {
                score.probability = round_to_tenth(score.coverage / total * 100.0);
            }
        }

        ScoreSheet { scores }
    }
}

/// Ties go to the even tenth, so 31.25 becomes 31.2.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
