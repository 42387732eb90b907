use thiserror::Error;

/// Terminal outcomes that are not results. "No pulses found" is not
/// represented here because it is an ordinary result.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("reference signal is empty")]
    EmptyReference,
    #[error("readings signal is empty")]
    EmptyReadings,
    #[error("reference signal ({reference} samples) is longer than readings signal ({readings} samples)")]
    ReferenceTooLong { reference: usize, readings: usize },
    #[error("threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),
    #[error("separation factor {0} must be finite and positive")]
    BadSeparationFactor(f64),
    #[error("{0} signal contains NaN or Inf samples")]
    NonFiniteSamples(&'static str),
    #[error("analysis cancelled")]
    Cancelled,
}
