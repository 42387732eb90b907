pub mod cosine;
pub mod dtw;
pub mod ncc;

use serde::{Deserialize, Serialize};

/// The closed set of interchangeable window scorers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Ncc,
    Cosine,
    Dtw,
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ncc" => Ok(Self::Ncc),
            "cosine" => Ok(Self::Cosine),
            "dtw" => Ok(Self::Dtw),
            other => Err(format!("Unknown method '{other}', expected ncc, cosine or dtw")),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ncc => write!(f, "ncc"),
            Self::Cosine => write!(f, "cosine"),
            Self::Dtw => write!(f, "dtw"),
        }
    }
}

/// Which DTW strategy actually ran, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DtwMode {
    Exact,
    Approximate,
}

/// One similarity score per valid window offset, plus the non-fatal
/// conditions a scorer can surface alongside the numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub values: Vec<f64>,
    /// NCC only: the reference was flat, every score forced to zero.
    pub flat_reference: bool,
    pub dtw_mode: Option<DtwMode>,
}

impl Scores {
    pub(crate) fn plain(values: Vec<f64>) -> Self {
        Self { values, flat_reference: false, dtw_mode: None }
    }
}

pub(crate) fn window_count(readings_len: usize, template_len: usize) -> usize {
    if template_len == 0 || readings_len < template_len {
        0
    } else {
        readings_len - template_len + 1
    }
}

// clamp into the metric's range, flush NaN/Inf residue to zero
pub(crate) fn sanitize(score: f64, lo: f64, hi: f64) -> f64 {
    if score.is_finite() {
        score.clamp(lo, hi)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!("ncc".parse::<Method>(), Ok(Method::Ncc));
        assert_eq!(" DTW ".parse::<Method>(), Ok(Method::Dtw));
        assert_eq!("Cosine".parse::<Method>(), Ok(Method::Cosine));
        assert!("pearson".parse::<Method>().is_err());
    }

    #[test]
    fn test_window_count() {
        assert_eq!(window_count(7, 3), 5);
        assert_eq!(window_count(3, 3), 1);
        assert_eq!(window_count(2, 3), 0);
        assert_eq!(window_count(5, 0), 0);
    }

    #[test]
    fn test_sanitize_flushes_non_finite() {
        assert_eq!(sanitize(f64::NAN, -1.0, 1.0), 0.0);
        assert_eq!(sanitize(f64::INFINITY, -1.0, 1.0), 0.0);
        assert_eq!(sanitize(1.5, -1.0, 1.0), 1.0);
        assert_eq!(sanitize(-0.25, -1.0, 1.0), -0.25);
    }
}
