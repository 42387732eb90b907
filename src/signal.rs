use serde::{Deserialize, Serialize};

/// Samples paired with a time axis of the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub samples: Vec<f64>,
    pub time: Vec<f64>,
}

impl Signal {
    pub fn from_samples(samples: Vec<f64>) -> Self {
        let time = (0..samples.len()).map(|i| i as f64).collect();
        Self { samples, time }
    }

    pub fn with_time(samples: Vec<f64>, time: Vec<f64>) -> Self {
        if time.len() != samples.len() {
            log::warn!(
                "Time axis length {} does not match signal length {}, using indices",
                time.len(),
                samples.len()
            );
            return Self::from_samples(samples);
        }
        Self { samples, time }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    // Sanitizing is the loader's job; the engine only refuses.
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_time_axis() {
        let sig = Signal::from_samples(vec![1.0, 2.0, 3.0]);
        assert_eq!(sig.time, vec![0.0, 1.0, 2.0]);
        assert_eq!(sig.len(), 3);
    }

    #[test]
    fn test_mismatched_time_falls_back_to_indices() {
        let sig = Signal::with_time(vec![1.0, 2.0, 3.0], vec![0.5, 1.5]);
        assert_eq!(sig.time, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_finite_check() {
        assert!(Signal::from_samples(vec![0.0, -3.5]).is_finite());
        assert!(!Signal::from_samples(vec![0.0, f64::NAN]).is_finite());
        assert!(!Signal::from_samples(vec![f64::INFINITY]).is_finite());
    }
}
