use log::warn;

use super::{sanitize, window_count, Scores};
use crate::error::AnalysisError;
use crate::progress::RunContext;
use crate::stats::{nearly_zero, window_stats};

/// Normalized cross-correlation:
/// `sum(w_zm * t_zm) / (M * std_w * std_t)`, both sides zero-meaned
/// against their own means. A flat template zeroes everything and sets
/// `flat_reference`; a flat window only zeroes its own offset.
pub fn score(readings: &[f64], template: &[f64], ctx: &RunContext) -> Result<Scores, AnalysisError> {
    let windows = window_count(readings.len(), template.len());
    if windows == 0 {
        return Ok(Scores::plain(Vec::new()));
    }

    let m = template.len();
    let (t_mean, t_std) = window_stats(template);
    if nearly_zero(t_std, t_mean) {
        warn!("Reference signal standard deviation is zero (flat reference)");
        return Ok(Scores { values: vec![0.0; windows], flat_reference: true, dtw_mode: None });
    }

    let template_zm: Vec<f64> = template.iter().map(|v| v - t_mean).collect();
    let mut values = Vec::with_capacity(windows);

    for i in 0..windows {
        if ctx.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        let window = &readings[i..i + m];
        let (w_mean, w_std) = window_stats(window);
        if nearly_zero(w_std, w_mean) {
            values.push(0.0);
            continue;
        }

        let correlation: f64 = window
            .iter()
            .zip(&template_zm)
            .map(|(w, t)| (w - w_mean) * t)
            .sum();
        let norm_factor = m as f64 * w_std * t_std;
        if nearly_zero(norm_factor, 1.0) {
            values.push(0.0);
        } else {
            values.push(sanitize(correlation / norm_factor, -1.0, 1.0));
        }
    }

    Ok(Scores::plain(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_sequence_length() {
        let readings = vec![0.0; 10];
        let template = vec![1.0, 2.0, 3.0];
        let scores = score(&readings, &template, &RunContext::new()).unwrap();
        assert_eq!(scores.values.len(), 8);
    }

    #[test]
    fn test_oversized_template_yields_empty() {
        let scores = score(&[1.0, 2.0], &[1.0, 2.0, 3.0], &RunContext::new()).unwrap();
        assert!(scores.values.is_empty());
        assert!(!scores.flat_reference);
    }

    #[test]
    fn test_exact_embedding_scores_one() {
        let template = vec![1.0, 2.0, 3.0];
        let readings = vec![0.0, 0.0, 1.0, 2.0, 3.0, 0.0, 0.0];
        let scores = score(&readings, &template, &RunContext::new()).unwrap();
        assert!((scores.values[2] - 1.0).abs() < 1e-9, "got {}", scores.values[2]);
    }

    #[test]
    fn test_flat_template_flags_and_zeroes() {
        let template = vec![5.0, 5.0, 5.0];
        let readings = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let scores = score(&readings, &template, &RunContext::new()).unwrap();
        assert!(scores.flat_reference);
        assert_eq!(scores.values, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_flat_window_scores_zero_but_keeps_index() {
        let template = vec![1.0, 2.0, 3.0];
        let readings = vec![4.0, 4.0, 4.0, 1.0, 2.0, 3.0];
        let scores = score(&readings, &template, &RunContext::new()).unwrap();
        assert_eq!(scores.values.len(), 4);
        assert_eq!(scores.values[0], 0.0);
        assert!((scores.values[3] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let template = vec![1.0, -2.0, 4.0, 0.5];
        let readings = vec![3.0, -8.0, 2.5, 1.0, -2.0, 4.0, 0.5, -100.0, 50.0, 0.0];
        let scores = score(&readings, &template, &RunContext::new()).unwrap();
        for v in &scores.values {
            assert!(v.is_finite());
            assert!((-1.0..=1.0).contains(v), "score {v} out of range");
        }
    }

    #[test]
    fn test_anticorrelated_window_scores_minus_one() {
        let template = vec![1.0, 2.0, 3.0];
        let readings = vec![3.0, 2.0, 1.0];
        let scores = score(&readings, &template, &RunContext::new()).unwrap();
        assert!((scores.values[0] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancellation_wins_over_result() {
        let token = crate::progress::CancelToken::new();
        token.cancel();
        let ctx = RunContext::new().with_cancel_token(token);
        let err = score(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0], &ctx).unwrap_err();
        assert_eq!(err, AnalysisError::Cancelled);
    }
}
