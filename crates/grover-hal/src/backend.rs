//! Backend trait and configuration.
//!
//! A [`Backend`] is the simulation oracle of the workspace: it takes a
//! finished circuit and a shot count and returns outcome frequencies.
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()  [──→ probabilities()]
//!    (sync, &ref)       (async)       (async)       (async, optional)
//! ```
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `capabilities()` | sync | yes | `&Capabilities` |
//! | `validate()` | async | yes | `HalResult<ValidationResult>` |
//! | `run()` | async | yes | `HalResult<ExecutionResult>` |
//! | `probabilities()` | async | provided | `HalResult<Vec<f64>>` |

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use grover_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer extra.
    ///
    /// Missing keys yield `Ok(None)`; present keys that are not unsigned
    /// integers are a configuration error.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!(
                    "'{key}' must be a non-negative integer, got {value}"
                ))
            }),
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for backends that execute circuits.
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible; implementations cache
///   it at construction time.
/// - `run()` rejects `shots == 0` with [`HalError::InvalidShots`] and
///   returns counts that sum to `shots`.
/// - Bitstrings are LSB-first over the classical register.
/// - `probabilities()` returns one entry per classical-register value,
///   indexed by that value read LSB-first. Backends without exact access
///   keep the default, which fails with [`HalError::Unsupported`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a circuit against backend constraints.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Execute a circuit and sample `shots` outcomes.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;

    /// Exact outcome distribution over the classical register.
    async fn probabilities(&self, _circuit: &Circuit) -> HalResult<Vec<f64>> {
        Err(HalError::Unsupported(format!(
            "backend '{}' does not expose exact probabilities",
            self.name()
        )))
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Circuit can be executed as-is.
    Valid,
    /// Circuit cannot run on this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Check `circuit` against `caps`: qubit count and gate support.
    pub fn check(circuit: &Circuit, caps: &Capabilities) -> Self {
        let mut reasons = Vec::new();

        if circuit.num_qubits() > caps.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but backend supports {}",
                circuit.num_qubits(),
                caps.num_qubits
            ));
        }

        for inst in circuit.instructions() {
            if let Some(gate) = inst.as_gate() {
                if !caps.gate_set.contains(gate.name()) {
                    let reason = format!("unsupported gate '{}'", gate.name());
                    if !reasons.contains(&reason) {
                        reasons.push(reason);
                    }
                }
            }
        }

        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            debug!("Circuit '{}' rejected by {}: {:?}", circuit.name(), caps.name, reasons);
            ValidationResult::Invalid { reasons }
        }
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::GateSet;
    use crate::result::Counts;
    use grover_ir::QubitId;

    struct CountingBackend {
        capabilities: Capabilities,
    }

    #[async_trait]
    impl Backend for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.capabilities
        }

        async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::check(circuit, &self.capabilities))
        }

        async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
            let zeros = "0".repeat(circuit.num_clbits());
            Ok(ExecutionResult::new(
                Counts::from_pairs([(zeros, u64::from(shots))]),
                shots,
            ))
        }
    }

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("test")
            .with_extra("max_qubits", serde_json::json!(12))
            .with_extra("seed", serde_json::json!("abc"));

        assert_eq!(config.name, "test");
        assert_eq!(config.extra_u64("max_qubits").unwrap(), Some(12));
        assert_eq!(config.extra_u64("missing").unwrap(), None);
        assert!(matches!(
            config.extra_u64("seed"),
            Err(HalError::Configuration(_))
        ));
    }

    #[test]
    fn test_validation_reports_width_and_gates() {
        let caps = Capabilities {
            gate_set: GateSet {
                multi_qubit: vec![],
                ..GateSet::universal()
            },
            ..Capabilities::simulator(2)
        };
        let mut circuit = Circuit::with_size("wide", 3, 0);
        circuit
            .mcx(&[QubitId(0), QubitId(1)], QubitId(2))
            .unwrap()
            .mcx(&[QubitId(1), QubitId(0)], QubitId(2))
            .unwrap();

        match ValidationResult::check(&circuit, &caps) {
            ValidationResult::Invalid { reasons } => assert_eq!(reasons.len(), 2),
            ValidationResult::Valid => panic!("expected invalid"),
        }
    }

    #[tokio::test]
    async fn test_default_probabilities_unsupported() {
        let backend = CountingBackend {
            capabilities: Capabilities::simulator(4).with_name("counting"),
        };
        let circuit = Circuit::with_size("c", 2, 2);

        assert!(backend.validate(&circuit).await.unwrap().is_valid());
        let result = backend.run(&circuit, 10).await.unwrap();
        assert_eq!(result.counts.get("00"), 10);
        assert!(matches!(
            backend.probabilities(&circuit).await,
            Err(HalError::Unsupported(_))
        ));
    }
}
