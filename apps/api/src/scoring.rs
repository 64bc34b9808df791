//! Score Blender — maps raw model-reported scores onto a redistributed
//! 0–100 range and optionally blends in a keyword-overlap signal.
//!
//! The raw model clusters scores in 70–89, so the piecewise curve shifts the
//! "good" and "average" bands down by 5 to spread the exposed range.

use std::collections::HashSet;

use serde_json::Value;

/// Neutral fallback when the model's score field is unparseable. Deliberately
/// "average-good" rather than 0 so broken-but-probably-fine output is not
/// punished. Returned as-is, without the curve.
const SCORE_FALLBACK: f64 = 75.0;

/// Weight of the rescaled model score vs the keyword-overlap score.
const MODEL_WEIGHT: f64 = 0.85;
const KEYWORD_WEIGHT: f64 = 0.15;

/// Coerces an untrusted score value and applies the rescale curve:
/// - `r ≥ 90` → `min(100, r)`
/// - `80 ≤ r < 90` → `75 + (r − 80)`
/// - `70 ≤ r < 80` → `65 + (r − 70)`
/// - `r < 70` → `r`
pub fn rescale(raw: &Value) -> f64 {
    let r = match coerce_number(raw) {
        Some(r) => r,
        None => return SCORE_FALLBACK,
    };

    if r >= 90.0 {
        r.min(100.0)
    } else if r >= 80.0 {
        75.0 + (r - 80.0)
    } else if r >= 70.0 {
        65.0 + (r - 70.0)
    } else {
        r
    }
}

/// Fraction of the job description's vocabulary also present in the resume,
/// as a percentage rounded to 2 decimals. Bag-of-words: case-insensitive,
/// whitespace-tokenized, order and frequency ignored. Empty job text → 0.
pub fn keyword_match_score(resume_text: &str, job_description: &str) -> f64 {
    let resume_lower = resume_text.to_lowercase();
    let job_lower = job_description.to_lowercase();

    let resume_words: HashSet<&str> = resume_lower.split_whitespace().collect();
    let job_words: HashSet<&str> = job_lower.split_whitespace().collect();

    if job_words.is_empty() {
        return 0.0;
    }

    let matches = resume_words.intersection(&job_words).count();
    round2(matches as f64 / job_words.len() as f64 * 100.0)
}

/// Blends a rescaled model score with a keyword-overlap percentage using
/// fixed 0.85 / 0.15 weights. Job-description analysis only.
pub fn blend(rescaled: f64, keyword_score: f64) -> f64 {
    round2(rescaled * MODEL_WEIGHT + keyword_score * KEYWORD_WEIGHT)
}

fn coerce_number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_rescale_exceptional_band_is_capped_not_expanded() {
        assert_close(rescale(&json!(90)), 90.0);
        assert_close(rescale(&json!(100)), 100.0);
        assert_close(rescale(&json!(104.5)), 100.0);
    }

    #[test]
    fn test_rescale_good_band_shifts_down_by_five() {
        assert_close(rescale(&json!(80)), 75.0);
        assert_close(rescale(&json!(85)), 80.0);
        assert_close(rescale(&json!(89.999)), 84.999);
    }

    #[test]
    fn test_rescale_average_band_shifts_down_by_five() {
        assert_close(rescale(&json!(70)), 65.0);
        assert_close(rescale(&json!(79.999)), 74.999);
    }

    #[test]
    fn test_rescale_below_seventy_is_unchanged() {
        assert_close(rescale(&json!(69)), 69.0);
        assert_close(rescale(&json!(0)), 0.0);
        assert_close(rescale(&json!(-3.0)), -3.0);
    }

    #[test]
    fn test_rescale_parses_numeric_strings() {
        assert_close(rescale(&json!("95")), 95.0);
        assert_close(rescale(&json!(" 82.5 ")), 77.5);
    }

    #[test]
    fn test_rescale_non_numeric_falls_back_to_75_without_curve() {
        // 75 through the curve would be 70; the fallback skips the curve.
        assert_close(rescale(&json!("N/A")), 75.0);
        assert_close(rescale(&Value::Null), 75.0);
        assert_close(rescale(&json!(["90"])), 75.0);
    }

    #[test]
    fn test_keyword_overlap_is_job_vocabulary_fraction() {
        let score = keyword_match_score("Python Go Rust", "Python Java");
        assert_close(score, 50.0);
    }

    #[test]
    fn test_keyword_overlap_empty_job_description_is_zero() {
        assert_close(keyword_match_score("Python Go Rust", ""), 0.0);
        assert_close(keyword_match_score("Python", "   \n "), 0.0);
    }

    #[test]
    fn test_keyword_overlap_is_case_insensitive_and_set_based() {
        // Repetition on either side does not change the result.
        let score = keyword_match_score("rust RUST rust tokio", "Rust Tokio");
        assert_close(score, 100.0);
    }

    #[test]
    fn test_keyword_overlap_is_asymmetric() {
        // Padding the resume with unrelated words does not hurt the score.
        let padded = keyword_match_score("rust and many unrelated words here", "rust");
        assert_close(padded, 100.0);
    }

    #[test]
    fn test_blend_uses_fixed_weights() {
        // raw 85 → rescaled 80; 80*0.85 + 50*0.15 = 75.5
        let rescaled = rescale(&json!(85));
        assert_close(blend(rescaled, 50.0), 75.5);
    }

    #[test]
    fn test_blend_rounds_to_two_decimals() {
        assert_close(blend(77.777, 33.333), 71.11);
    }
}
