use super::{sanitize, window_count, Scores};
use crate::error::AnalysisError;
use crate::progress::RunContext;

/// Cosine similarity over the raw (non-zero-meaned) vectors; a zero
/// vector scores 0, not NaN.
pub fn score(readings: &[f64], template: &[f64], ctx: &RunContext) -> Result<Scores, AnalysisError> {
    let windows = window_count(readings.len(), template.len());
    if windows == 0 {
        return Ok(Scores::plain(Vec::new()));
    }

    let m = template.len();
    let template_norm = template.iter().map(|v| v * v).sum::<f64>().sqrt();
    let mut values = Vec::with_capacity(windows);

    for i in 0..windows {
        if ctx.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }
        let window = &readings[i..i + m];
        let dot: f64 = window.iter().zip(template).map(|(w, t)| w * t).sum();
        let window_norm = window.iter().map(|v| v * v).sum::<f64>().sqrt();
        let denom = window_norm * template_norm;
        if denom == 0.0 {
            values.push(0.0);
        } else {
            values.push(sanitize(dot / denom, -1.0, 1.0));
        }
    }

    Ok(Scores::plain(values))
}
