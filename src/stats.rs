/// Mean and population standard deviation of one window. Recomputed
/// fresh per window rather than slid incrementally, to keep the scoring
/// numerics stable across offsets.
pub fn window_stats(window: &[f64]) -> (f64, f64) {
    if window.is_empty() {
        return (0.0, 0.0);
    }
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let var = window.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

// 1e-9 relative to `scale` (typically the window mean)
pub fn nearly_zero(value: f64, scale: f64) -> bool {
    value.abs() <= 1e-9 * scale.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_stats_basic() {
        let (mean, std) = window_stats(&[1.0, 2.0, 3.0, 4.0]);
        assert!((mean - 2.5).abs() < 1e-12);
        // population std of 1..4 is sqrt(1.25)
        assert!((std - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_flat_window() {
        let (mean, std) = window_stats(&[7.0, 7.0, 7.0]);
        assert_eq!(mean, 7.0);
        assert!(nearly_zero(std, mean));
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(window_stats(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_nearly_zero_scaling() {
        assert!(nearly_zero(1e-10, 0.0));
        assert!(!nearly_zero(1e-3, 0.0));
        // large scale loosens the absolute tolerance
        assert!(nearly_zero(1e-4, 1e6));
    }
}
