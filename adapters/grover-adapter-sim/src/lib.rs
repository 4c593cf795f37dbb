//! Local statevector simulator for Grover circuits.
//!
//! The simulator keeps the full statevector, so runs are exact up to shot
//! noise and memory grows as `2^n`.
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```ignore
//! use grover_adapter_sim::SimulatorBackend;
//! use grover_hal::Backend;
//!
//! let backend = SimulatorBackend::with_seed(7);
//! let result = backend.run(&circuit, 4096).await?;
//! println!("{:?}", result.counts.most_frequent());
//!
//! // Exact distribution over the classical register
//! let probs = backend.probabilities(&circuit).await?;
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
