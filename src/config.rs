use knuffel::Decode;
use serde::{Deserialize, Serialize};

use crate::engine::{DEFAULT_MAX_DTW_SIZE, DEFAULT_SEPARATION_FACTOR};

/// Defaults loaded from a KDL file; every CLI flag beats its config
/// counterpart.
#[derive(Decode, Debug, Clone, Serialize, Deserialize)]
pub struct PulsekitConfig {
    #[knuffel(child)]
    pub analysis: Option<AnalysisDefaults>,
}

#[derive(Decode, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisDefaults {
    #[knuffel(property)]
    pub method: Option<String>,
    #[knuffel(property)]
    pub threshold: Option<f64>,
    #[knuffel(property(name = "separation_factor"))]
    pub separation_factor: Option<f64>,
    #[knuffel(property(name = "max_dtw_size"))]
    pub max_dtw_size: Option<u32>,
}

impl PulsekitConfig {
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = knuffel::parse("config.kdl", &content)?;
        Ok(config)
    }
}

impl Default for PulsekitConfig {
    fn default() -> Self {
        Self {
            analysis: Some(AnalysisDefaults {
                method: None,
                threshold: Some(0.9),
                separation_factor: Some(DEFAULT_SEPARATION_FACTOR),
                max_dtw_size: Some(DEFAULT_MAX_DTW_SIZE as u32),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PulsekitConfig::default();
        let analysis = config.analysis.unwrap();
        assert_eq!(analysis.threshold, Some(0.9));
        assert_eq!(analysis.separation_factor, Some(0.75));
        assert_eq!(analysis.max_dtw_size, Some(1000));
    }

    #[test]
    fn test_parse_kdl() {
        let content = "analysis method=\"dtw\" threshold=0.8 max_dtw_size=500\n";
        let config: PulsekitConfig = knuffel::parse("test.kdl", content).unwrap();
        let analysis = config.analysis.unwrap();
        assert_eq!(analysis.method.as_deref(), Some("dtw"));
        assert_eq!(analysis.threshold, Some(0.8));
        assert_eq!(analysis.max_dtw_size, Some(500));
        assert_eq!(analysis.separation_factor, None);
    }
}
