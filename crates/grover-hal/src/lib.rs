//! Backend abstraction for the Grover simulator.
//!
//! The [`Backend`] trait is the seam between circuit construction and
//! execution: anything that can turn a [`Circuit`](grover_ir::Circuit) and a
//! shot count into [`Counts`] can serve as the simulation oracle.
//!
//! # Implementing a Backend
//!
//! ```ignore
//! use grover_hal::{Backend, Capabilities, ExecutionResult, HalResult, ValidationResult};
//! use grover_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
//!         Ok(ValidationResult::check(circuit, &self.capabilities))
//!     }
//!
//!     async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         // Execute and collect LSB-first bitstrings
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
