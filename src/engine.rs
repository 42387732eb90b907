use std::time::SystemTime;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::metric::{cosine, dtw, ncc, DtwMode, Method, Scores};
use crate::peaks::{self, minimum_distance};
use crate::progress::RunContext;
use crate::pulse::{assemble, Pulse};
use crate::signal::Signal;

pub const DEFAULT_SEPARATION_FACTOR: f64 = 0.75;
pub const DEFAULT_MAX_DTW_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub method: Method,
    pub threshold: f64,
    pub separation_factor: f64,
    pub max_dtw_size: usize,
}

impl AnalysisConfig {
    pub fn new(method: Method, threshold: f64) -> Self {
        Self {
            method,
            threshold,
            separation_factor: DEFAULT_SEPARATION_FACTOR,
            max_dtw_size: DEFAULT_MAX_DTW_SIZE,
        }
    }
}

/// The complete outcome of one analysis run, superseded wholesale by the
/// next run; the engine keeps nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Ascending offset order; empty is a normal outcome.
    pub pulses: Vec<Pulse>,
    /// Readings-length signal, zero outside pulse spans.
    pub noise_zeroed: Signal,
    pub method: Method,
    pub threshold: f64,
    pub flat_reference: bool,
    pub dtw_mode: Option<DtwMode>,
    pub timestamp: SystemTime,
}

fn validate(reference: &Signal, readings: &Signal, cfg: &AnalysisConfig) -> Result<(), AnalysisError> {
    if reference.is_empty() {
        return Err(AnalysisError::EmptyReference);
    }
    if readings.is_empty() {
        return Err(AnalysisError::EmptyReadings);
    }
    if reference.len() > readings.len() {
        return Err(AnalysisError::ReferenceTooLong {
            reference: reference.len(),
            readings: readings.len(),
        });
    }
    if !(0.0..=1.0).contains(&cfg.threshold) {
        return Err(AnalysisError::ThresholdOutOfRange(cfg.threshold));
    }
    if !cfg.separation_factor.is_finite() || cfg.separation_factor <= 0.0 {
        return Err(AnalysisError::BadSeparationFactor(cfg.separation_factor));
    }
    if !reference.is_finite() {
        return Err(AnalysisError::NonFiniteSamples("reference"));
    }
    if !readings.is_finite() {
        return Err(AnalysisError::NonFiniteSamples("readings"));
    }
    Ok(())
}

/// Scoring phase alone, exposed so callers can persist the expensive
/// part and re-run detection against it.
pub fn score(
    reference: &Signal,
    readings: &Signal,
    cfg: &AnalysisConfig,
    ctx: &RunContext,
) -> Result<Scores, AnalysisError> {
    validate(reference, readings, cfg)?;
    info!(
        "Scoring {} windows with {} (template {} samples, readings {} samples)",
        readings.len() - reference.len() + 1,
        cfg.method,
        reference.len(),
        readings.len()
    );
    match cfg.method {
        Method::Ncc => ncc::score(&readings.samples, &reference.samples, ctx),
        Method::Cosine => cosine::score(&readings.samples, &reference.samples, ctx),
        Method::Dtw => dtw::score(&readings.samples, &reference.samples, cfg.max_dtw_size, ctx),
    }
}

/// Peak extraction and pulse assembly over an already computed score
/// sequence.
pub fn detect(
    scores: &Scores,
    reference: &Signal,
    readings: &Signal,
    cfg: &AnalysisConfig,
    ctx: &RunContext,
) -> Result<AnalysisResult, AnalysisError> {
    validate(reference, readings, cfg)?;
    if ctx.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }

    let min_distance = minimum_distance(reference.len(), cfg.separation_factor);
    let peaks = peaks::find_peaks(&scores.values, cfg.threshold, min_distance);
    if ctx.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }

    let (pulses, noise_zeroed) = assemble(&peaks, readings, reference.len());
    if pulses.is_empty() {
        info!("No pulses found above threshold {:.2}", cfg.threshold);
    } else {
        info!("Found {} pulses above threshold {:.2}", pulses.len(), cfg.threshold);
    }

    Ok(AnalysisResult {
        pulses,
        noise_zeroed,
        method: cfg.method,
        threshold: cfg.threshold,
        flat_reference: scores.flat_reference,
        dtw_mode: scores.dtw_mode,
        timestamp: SystemTime::now(),
    })
}

/// Validate, score, extract peaks, assemble pulses.
pub fn analyze(
    reference: &Signal,
    readings: &Signal,
    cfg: &AnalysisConfig,
    ctx: &RunContext,
) -> Result<AnalysisResult, AnalysisError> {
    let scores = score(reference, readings, cfg, ctx)?;
    detect(&scores, reference, readings, cfg, ctx)
}
