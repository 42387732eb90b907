use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::metric::{Method, Scores};

/// Sidecar cache of one computed score sequence, so re-runs with a
/// different threshold can skip the scoring phase.
#[derive(Serialize, Deserialize)]
struct ScoreCache {
    method: Method,
    template_len: usize,
    readings_len: usize,
    scores: Scores,
}

pub fn cache_path(readings_path: &Path) -> PathBuf {
    let mut path = readings_path.to_path_buf();
    let mut name = readings_path.file_name().unwrap_or_default().to_os_string();
    name.push(".pksc");
    path.set_file_name(name);
    path
}

// A mismatched sidecar is a stale cache, not an error.
pub fn load(path: &Path, method: Method, template_len: usize, readings_len: usize) -> Result<Option<Scores>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut f = File::open(path).with_context(|| format!("Failed to open cache {}", path.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let cache: ScoreCache = bincode::deserialize(&buf)
        .with_context(|| format!("Failed to decode cache {}", path.display()))?;

    if cache.method != method || cache.template_len != template_len || cache.readings_len != readings_len {
        debug!("Cache {} does not match current inputs, recomputing", path.display());
        return Ok(None);
    }
    info!("Loaded cached scores from {}", path.display());
    Ok(Some(cache.scores))
}

pub fn save(path: &Path, method: Method, template_len: usize, readings_len: usize, scores: &Scores) -> Result<()> {
    let cache = ScoreCache { method, template_len, readings_len, scores: scores.clone() };
    let bin = bincode::serialize(&cache)?;
    let mut f = File::create(path).with_context(|| format!("Failed to create cache {}", path.display()))?;
    f.write_all(&bin)?;
    info!("Saved scores to {}", path.display());
    Ok(())
}
