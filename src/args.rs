use clap::Parser;

use crate::metric::Method;

pub fn threshold_parser(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("Invalid threshold '{s}': {e}"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("Threshold must be within [0, 1], got {v}"))
    }
}

pub fn separation_parser(s: &str) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("Invalid separation factor '{s}': {e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("Separation factor must be positive, got {v}"))
    }
}

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Template-matching pulse detector for tabular waveform data.")]
pub struct Cli {
    /// CSV file holding the reference (template) waveform.
    pub reference: String,
    /// CSV file holding the readings waveform to scan.
    pub readings: String,

    /// Column with the reference samples.
    #[arg(long, default_value = "signal")]
    pub ref_col: String,
    /// Column with the readings samples.
    #[arg(long, default_value = "signal")]
    pub readings_col: String,
    /// Optional time column in the readings file; indices otherwise.
    #[arg(long)]
    pub time_col: Option<String>,

    /// Similarity metric: ncc, cosine or dtw.
    #[arg(long)]
    pub method: Option<Method>,
    /// Minimum similarity for a peak to count, within [0, 1].
    #[arg(long, value_parser = threshold_parser)]
    pub threshold: Option<f64>,
    /// Peak separation as a fraction of the template length.
    #[arg(long, value_parser = separation_parser)]
    pub separation_factor: Option<f64>,
    /// Template size past which DTW switches to its approximation.
    #[arg(long)]
    pub max_dtw_size: Option<usize>,

    /// Pulse report destination.
    #[arg(long, default_value = "pulses.csv")]
    pub out: String,
    /// Optional destination for the noise-zeroed signal.
    #[arg(long)]
    pub filtered_out: Option<String>,
    /// KDL config file overriding the built-in defaults.
    #[arg(long)]
    pub config: Option<String>,
    /// Reuse or create a score-sequence sidecar next to the readings file.
    #[arg(long)]
    pub cache: bool,
}
