use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process;

use pulsekit::args::Cli;
use pulsekit::cache;
use pulsekit::config::PulsekitConfig;
use pulsekit::engine::{self, AnalysisConfig, DEFAULT_MAX_DTW_SIZE, DEFAULT_SEPARATION_FACTOR};
use pulsekit::metric::Method;
use pulsekit::progress::RunContext;
use pulsekit::report;
use pulsekit::table;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("Error: {:#}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<PulsekitConfig> {
    if let Some(path) = &cli.config {
        return PulsekitConfig::load(path).with_context(|| format!("Failed to load config from {path}"));
    }
    if let Some(proj_dirs) = ProjectDirs::from("com", "pulsekit", "pulsekit") {
        let path = proj_dirs.config_dir().join("config.kdl");
        if path.exists() {
            return PulsekitConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()));
        }
    }
    Ok(PulsekitConfig::default())
}

fn resolve_analysis_config(cli: &Cli, file_config: &PulsekitConfig) -> Result<AnalysisConfig> {
    let defaults = file_config.analysis.clone().unwrap_or_default();

    let method = match (&cli.method, &defaults.method) {
        (Some(m), _) => *m,
        (None, Some(name)) => name
            .parse::<Method>()
            .map_err(|e| anyhow::anyhow!("Bad method in config: {e}"))?,
        (None, None) => Method::Ncc,
    };

    Ok(AnalysisConfig {
        method,
        threshold: cli.threshold.or(defaults.threshold).unwrap_or(0.9),
        separation_factor: cli
            .separation_factor
            .or(defaults.separation_factor)
            .unwrap_or(DEFAULT_SEPARATION_FACTOR),
        max_dtw_size: cli
            .max_dtw_size
            .or(defaults.max_dtw_size.map(|v| v as usize))
            .unwrap_or(DEFAULT_MAX_DTW_SIZE),
    })
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let file_config = load_config(&cli)?;
    let cfg = resolve_analysis_config(&cli, &file_config)?;

    let reference = table::load_signal(&cli.reference, &cli.ref_col, None)
        .with_context(|| format!("Failed to load reference from {}", cli.reference))?;
    let readings = table::load_signal(&cli.readings, &cli.readings_col, cli.time_col.as_deref())
        .with_context(|| format!("Failed to load readings from {}", cli.readings))?;
    info!(
        "Reference: {} samples, readings: {} samples, method: {}",
        reference.len(),
        readings.len(),
        cfg.method
    );

    let ctx = RunContext::new().with_progress(|p| {
        if p % 10 == 0 {
            info!("Scoring progress: {p}%");
        }
    });

    let scores = if cli.cache {
        let sidecar = cache::cache_path(Path::new(&cli.readings));
        match cache::load(&sidecar, cfg.method, reference.len(), readings.len())? {
            Some(scores) => scores,
            None => {
                let scores = engine::score(&reference, &readings, &cfg, &ctx)?;
                cache::save(&sidecar, cfg.method, reference.len(), readings.len(), &scores)?;
                scores
            }
        }
    } else {
        engine::score(&reference, &readings, &cfg, &ctx)?
    };

    let result = engine::detect(&scores, &reference, &readings, &cfg, &ctx)?;
    if result.flat_reference {
        warn!("Reference signal is flat; no similarity could be measured");
    }

    let out = File::create(&cli.out).with_context(|| format!("Failed to create {}", cli.out))?;
    report::write_pulse_report(BufWriter::new(out), &result.pulses)
        .with_context(|| format!("Failed to write report to {}", cli.out))?;
    info!("Wrote {} pulses to {}", result.pulses.len(), cli.out);

    if let Some(path) = &cli.filtered_out {
        let out = File::create(path).with_context(|| format!("Failed to create {path}"))?;
        report::write_signal_csv(BufWriter::new(out), &result.noise_zeroed)
            .with_context(|| format!("Failed to write noise-zeroed signal to {path}"))?;
        info!("Wrote noise-zeroed signal to {path}");
    }

    println!("Detected {} pulses ({} method)", result.pulses.len(), result.method);
    Ok(())
}
