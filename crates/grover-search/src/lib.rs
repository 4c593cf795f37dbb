//! Grover amplitude amplification: circuits, execution and iteration search.
//!
//! The crate is a three-stage pipeline:
//!
//! 1. **Circuit builder**: [`build_oracle`] marks the values of a
//!    [`SearchProblem`] with a phase flip through an ancilla,
//!    [`build_diffuser`] inverts about the mean, and [`grover_circuit`]
//!    assembles `k` rounds of both between state preparation and
//!    measurement.
//! 2. **Executor**: [`Executor`] runs circuits on any
//!    [`Backend`](grover_hal::Backend) and reduces the outcomes to a
//!    success probability, either sampled or exact.
//! 3. **Iteration search**: [`search_known_m`] and [`search_unknown_m`]
//!    pick an iteration count, selectable through [`IterationStrategy`].
//!
//! # Bit order
//!
//! Index qubit `q_i` carries bit `i` of the register value and is measured
//! into classical bit `c_i`. Outcome bitstrings are read least-significant
//! bit first, so `"1100"` decodes to 3.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use grover_adapter_sim::SimulatorBackend;
//! use grover_search::{Executor, SearchProblem, search_known_m};
//!
//! let executor = Executor::new(Arc::new(SimulatorBackend::with_seed(42)));
//! let problem = SearchProblem::new(4, [3])?;
//!
//! let best = search_known_m(&executor, &problem).await?;
//! assert_eq!(best.k, 3);
//! ```

pub mod circuit;
pub mod diffuser;
pub mod error;
pub mod executor;
pub mod experiment;
pub mod oracle;
pub mod problem;
pub mod search;

pub use circuit::{DIFFUSER_LABEL, ORACLE_LABEL, grover_circuit};
pub use diffuser::build_diffuser;
pub use error::{GroverError, GroverResult};
pub use executor::{
    DEFAULT_SHOTS, Estimation, Executor, OutcomeTable, decode_counts, decode_outcome,
    marked_fraction,
};
pub use experiment::{
    OscillationPoint, OscillationSeries, PowerLawFit, ScalingRecord, UnknownMSummary,
    fit_power_law, oscillation_series, scaling_record, unknown_m_summary,
};
pub use oracle::build_oracle;
pub use problem::{MAX_INDEX_QUBITS, MarkedSet, SearchProblem};
pub use search::{
    DEFAULT_THRESHOLD, IterationStrategy, SearchOutcome, analytic_optimum, iteration_bound,
    search_known_m, search_unknown_m,
};
