//! Command-line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use grover_search::{DEFAULT_SHOTS, DEFAULT_THRESHOLD, Estimation, IterationStrategy};

/// Seed used when none is given, matching the published figures.
pub const DEFAULT_SEED: u64 = 42;

/// Grover amplitude amplification experiments on a local simulator
#[derive(Parser, Debug)]
#[command(name = "grover-sim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub options: GlobalOptions,

    /// Experiment to run; the full sequence when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Options shared by every experiment.
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Shots per circuit execution
    #[arg(long, env = "GROVER_SHOTS", default_value_t = DEFAULT_SHOTS, global = true)]
    pub shots: u32,

    /// Seed for marked-set selection and sampling
    #[arg(long, env = "GROVER_SEED", default_value_t = DEFAULT_SEED, global = true)]
    pub seed: u64,

    /// Directory for charts, diagrams and the report
    #[arg(short, long, env = "GROVER_OUT_DIR", default_value = ".", global = true)]
    pub out_dir: PathBuf,

    /// Use exact probabilities instead of sampling
    #[arg(long, global = true)]
    pub exact: bool,
}

impl GlobalOptions {
    /// Estimation mode selected by `--exact` and `--shots`.
    pub fn estimation(&self) -> Estimation {
        if self.exact {
            Estimation::Exact
        } else {
            Estimation::Sampled { shots: self.shots }
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the full experiment sequence and write the report
    All,

    /// Check the 16-state search with one marked value
    Sanity,

    /// Sweep success probability over the iteration count
    Oscillations {
        /// Index register width
        #[arg(short = 'n', long, default_value_t = 8)]
        qubits: u32,

        /// Marked-set sizes, one curve each
        #[arg(short, long, value_delimiter = ',', default_value = "1,4,16")]
        marked_counts: Vec<u64>,

        /// Largest iteration count
        #[arg(short = 'k', long, default_value_t = 16)]
        max_iterations: u64,
    },

    /// Measure how the chosen iteration count grows with problem size
    Scaling {
        /// How the iteration count is chosen
        #[arg(short, long, value_enum, default_value_t = StrategyArg::Threshold)]
        strategy: StrategyArg,

        /// Target success probability for the threshold scan
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,
    },

    /// Draw the search circuit
    Diagram {
        /// Index register width
        #[arg(short = 'n', long, default_value_t = 4)]
        qubits: u32,

        /// Marked values
        #[arg(short, long, value_delimiter = ',', default_value = "3")]
        marked: Vec<u64>,

        /// Grover iterations
        #[arg(short = 'k', long, default_value_t = 2)]
        iterations: u64,

        /// Fold the text diagram at this many columns
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Threshold scan with the marked-set size hidden from the search
    Unknown {
        /// Index register width
        #[arg(short = 'n', long, default_value_t = 8)]
        qubits: u32,

        /// Marked-set sizes to try
        #[arg(short, long, value_delimiter = ',', default_value = "1,4,16")]
        marked_counts: Vec<u64>,

        /// Target success probability
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,
    },

    /// Run one search circuit and print the outcome histogram
    Run {
        /// Index register width
        #[arg(short = 'n', long)]
        qubits: u32,

        /// Marked values
        #[arg(short, long, value_delimiter = ',', required = true)]
        marked: Vec<u64>,

        /// Grover iterations (closed-form optimum if omitted)
        #[arg(short = 'k', long)]
        iterations: Option<u64>,
    },

    /// Show version information
    Version,
}

/// Iteration-count strategy as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// First k reaching the threshold
    Threshold,
    /// Best of k*-1, k*, k*+1
    Local,
}

impl StrategyArg {
    /// The library strategy for this choice.
    pub fn into_strategy(self, threshold: f64) -> IterationStrategy {
        match self {
            StrategyArg::Threshold => IterationStrategy::ThresholdScan { threshold },
            StrategyArg::Local => IterationStrategy::LocalSearch,
        }
    }
}
