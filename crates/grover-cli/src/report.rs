//! JSON report of one experiment session.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use grover_search::{
    Estimation, IterationStrategy, OscillationSeries, PowerLawFit, ScalingRecord, UnknownMSummary,
};

/// Outcome of the fixed 16-state check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanityCheck {
    pub num_qubits: u32,
    pub marked: Vec<u64>,
    pub iterations: u64,
    pub success_probability: f64,
    pub most_likely_outcome: u64,
}

/// Power-law fit for one marked-set size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScalingFit {
    pub num_marked: u64,
    pub fit: PowerLawFit,
}

/// Scaling records with the strategy that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingSection {
    pub strategy: IterationStrategy,
    pub records: Vec<ScalingRecord>,
    pub fits: Vec<ScalingFit>,
}

/// Everything an `all` run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub estimation: Estimation,
    pub sanity: Option<SanityCheck>,
    pub oscillations: Vec<OscillationSeries>,
    pub scaling: Option<ScalingSection>,
    pub unknown_m: Vec<UnknownMSummary>,
    /// File names written next to the report.
    pub artifacts: Vec<String>,
}

impl Report {
    /// Empty report stamped with the crate version and the current time.
    pub fn new(seed: u64, estimation: Estimation) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            seed,
            estimation,
            sanity: None,
            oscillations: Vec::new(),
            scaling: None,
            unknown_m: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed report: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let mut report = Report::new(42, Estimation::Exact);
        report.scaling = Some(ScalingSection {
            strategy: IterationStrategy::default(),
            records: vec![],
            fits: vec![],
        });
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["seed"], 42);
        assert_eq!(value["estimation"]["mode"], "exact");
        assert_eq!(value["scaling"]["strategy"]["kind"], "threshold_scan");
        assert_eq!(value["scaling"]["strategy"]["threshold"], 0.95);
        assert!(value["generated_at"].is_string());
        assert!(value["sanity"].is_null());
    }

    #[test]
    fn test_report_survives_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let mut report = Report::new(7, Estimation::Sampled { shots: 128 });
        report.artifacts.push("oscillations.svg".into());
        report.write(&path).unwrap();

        let back = Report::read(&path).unwrap();
        assert_eq!(back.seed, 7);
        assert_eq!(back.artifacts, vec!["oscillations.svg".to_string()]);
        assert_eq!(back.estimation, Estimation::Sampled { shots: 128 });
    }
}
