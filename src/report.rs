//! Result reporting for the benchmark suites

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Summary statistics over a set of samples (nanoseconds or scalars).
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self {
                mean: 0.0,
                stddev: 0.0,
                min: 0.0,
                max: 0.0,
                samples: 0,
            };
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            stddev: variance.sqrt(),
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            samples: samples.len(),
        }
    }
}

/// Envelope written around every suite report.
#[derive(Debug, Serialize)]
pub struct Report<T: Serialize> {
    pub suite: &'static str,
    pub generated_at: String,
    pub results: T,
}

/// Write a suite report as pretty JSON under the output directory.
pub fn write_report<T: Serialize>(dir: &Path, suite: &'static str, results: T) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let report = Report {
        suite,
        generated_at: chrono::Utc::now().to_rfc3339(),
        results,
    };
    let path = dir.join(format!("{suite}.json"));
    std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_constant_samples() {
        let stats = Stats::from_samples(&[2.0, 2.0, 2.0]);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.stddev, 0.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 2.0);
    }

    #[test]
    fn stats_of_empty_samples() {
        let stats = Stats::from_samples(&[]);
        assert_eq!(stats.samples, 0);
        assert_eq!(stats.mean, 0.0);
    }

    #[test]
    fn stats_spread() {
        let stats = Stats::from_samples(&[1.0, 3.0]);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.stddev, 1.0);
    }
}
