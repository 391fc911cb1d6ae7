//! Plain-text export of prediction results.

use crate::constants::REPORT_ADVICE_WIDTH;
use crate::wire::PredictionEntry;
use chrono::NaiveDateTime;

/// Download name for a report, e.g. `prediction_en_20250101_093000.txt`.
pub fn report_file_name(language: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "prediction_{}_{}.txt",
        language,
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Render `results` as a text report.
///
/// Each entry gets a summary line followed by its advice, indented and split into chunks of
/// at most [`REPORT_ADVICE_WIDTH`] characters, then a blank line.
pub fn render_report(
    results: &[PredictionEntry],
    language: &str,
    generated_at: NaiveDateTime,
) -> String {
    let mut out = format!(
        "Prediction Results ({}) - {}\n\n",
        language,
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    for entry in results {
        out.push_str(&format!(
            "{} - {:.1}% - Matched: {}\n",
            entry.disease,
            entry.probability,
            entry.matched_symptoms.join(", ")
        ));
        for chunk in advice_chunks(&entry.advice, REPORT_ADVICE_WIDTH) {
            out.push_str(&format!("    {chunk}\n"));
        }
        out.push('\n');
    }

    out
}

fn advice_chunks(advice: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = advice.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}
