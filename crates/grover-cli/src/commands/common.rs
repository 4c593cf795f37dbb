//! Shared state and helpers for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use grover_adapter_sim::SimulatorBackend;
use grover_hal::{Backend, BackendConfig, BackendFactory};
use grover_search::{Executor, SearchProblem};

use crate::cli::GlobalOptions;

/// Executor, random source and output directory for one invocation.
///
/// The simulator and the marked-set generator are both seeded from
/// `--seed`, so a whole session is reproducible.
pub struct Session {
    pub executor: Executor,
    pub rng: StdRng,
    pub seed: u64,
    out_dir: PathBuf,
}

impl Session {
    /// Build the simulator from `options` and make sure the output
    /// directory exists.
    pub fn new(options: &GlobalOptions) -> Result<Self> {
        let config =
            BackendConfig::new("simulator").with_extra("seed", serde_json::json!(options.seed));
        let backend = SimulatorBackend::from_config(config)
            .context("Failed to configure the simulator backend")?;
        tracing::debug!("Using backend '{}'", backend.name());

        let executor = Executor::new(Arc::new(backend)).with_estimation(options.estimation());

        fs::create_dir_all(&options.out_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                options.out_dir.display()
            )
        })?;

        Ok(Self {
            executor,
            rng: StdRng::seed_from_u64(options.seed),
            seed: options.seed,
            out_dir: options.out_dir.clone(),
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Path of an output file inside the output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(file_name)
    }

    /// A problem on `n` qubits with `m` marked values drawn from the
    /// session's random source.
    pub fn random_problem(&mut self, n: u32, m: u64) -> Result<SearchProblem> {
        SearchProblem::random(n, m, &mut self.rng)
            .with_context(|| format!("Failed to mark {m} values on {n} qubits"))
    }
}
