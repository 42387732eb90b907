pub mod args;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod metric;
pub mod peaks;
pub mod progress;
pub mod pulse;
pub mod report;
pub mod signal;
pub mod stats;
pub mod table;

pub use engine::{analyze, AnalysisConfig, AnalysisResult};
pub use error::AnalysisError;
pub use metric::{DtwMode, Method, Scores};
pub use peaks::Peak;
pub use progress::{CancelToken, RunContext};
pub use pulse::Pulse;
pub use signal::Signal;
