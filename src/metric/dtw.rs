use log::{debug, info};

use super::{window_count, DtwMode, Scores};
use crate::error::AnalysisError;
use crate::progress::RunContext;
use crate::stats::nearly_zero;

/// DTW-derived similarity over equal-length window/template pairs,
/// |a - b| element distance. Exact O(M^2) dynamic program while the
/// inputs stay small, coarsened-resolution approximation past the size
/// bounds; the selected strategy is reported back.
pub fn score(
    readings: &[f64],
    template: &[f64],
    max_dtw_size: usize,
    ctx: &RunContext,
) -> Result<Scores, AnalysisError> {
    let windows = window_count(readings.len(), template.len());
    if windows == 0 {
        return Ok(Scores { values: Vec::new(), flat_reference: false, dtw_mode: Some(DtwMode::Exact) });
    }

    let m = template.len();
    let max_size = max_dtw_size.max(1);
    let mode = if m <= max_size && readings.len() <= 10 * max_size {
        DtwMode::Exact
    } else {
        info!(
            "Input too large for exact DTW (template {}, readings {}), switching to coarsened approximation",
            m,
            readings.len()
        );
        DtwMode::Approximate
    };

    // Per-template normalization heuristic: the Euclidean distance from a
    // zero vector to a vector filled with the template's max |sample|.
    // Not a tight bound on the DTW distance, kept for compatibility.
    let max_abs = template.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let norm = max_abs * (m as f64).sqrt();

    let shrink = match mode {
        DtwMode::Exact => 1,
        DtwMode::Approximate => m.div_ceil(max_size).max(1),
    };
    let coarse_template = coarsen(template, shrink);

    let mut values = Vec::with_capacity(windows);
    let mut last_percent = 0u8;
    for i in 0..windows {
        if ctx.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        let window = &readings[i..i + m];
        let distance = match mode {
            DtwMode::Exact => dtw_distance(window, template),
            DtwMode::Approximate => dtw_distance(&coarsen(window, shrink), &coarse_template) * shrink as f64,
        };
        values.push(similarity(distance, norm, i));

        let percent = (((i + 1) * 100) / windows) as u8;
        if percent > last_percent {
            last_percent = percent;
            ctx.report(percent);
        }
    }

    Ok(Scores { values, flat_reference: false, dtw_mode: Some(mode) })
}

// two rolling rows of the cost matrix
fn dtw_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return f64::INFINITY;
    }
    let cols = b.len();
    let mut prev = vec![f64::INFINITY; cols + 1];
    let mut cur = vec![f64::INFINITY; cols + 1];
    prev[0] = 0.0;

    for &av in a {
        cur[0] = f64::INFINITY;
        for j in 1..=cols {
            let cost = (av - b[j - 1]).abs();
            cur[j] = cost + prev[j].min(cur[j - 1]).min(prev[j - 1]);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[cols]
}

// A numerically failed window (non-finite distance) scores 0 and the
// run continues.
fn similarity(distance: f64, norm: f64, offset: usize) -> f64 {
    if !distance.is_finite() {
        debug!("DTW distance at offset {offset} is not finite, scoring 0");
        return 0.0;
    }
    if nearly_zero(norm, 1.0) {
        // Degenerate all-zero template: only an exact match counts.
        return if nearly_zero(distance, 1.0) { 1.0 } else { 0.0 };
    }
    let normalized = (distance / norm).min(1.0);
    (1.0 - normalized).max(0.0)
}

fn coarsen(x: &[f64], factor: usize) -> Vec<f64> {
    if factor <= 1 {
        return x.to_vec();
    }
    x.chunks(factor)
        .map(|c| c.iter().sum::<f64>() / c.len() as f64)
        .collect()
}
