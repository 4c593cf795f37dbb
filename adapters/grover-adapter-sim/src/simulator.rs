//! Simulator backend implementation.

use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use grover_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, ValidationResult,
};
use grover_ir::{Circuit, InstructionKind};

use crate::statevector::{Statevector, sample_indices, value_to_bitstring};

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local simulator backend.
///
/// Each run simulates the circuit once, reads the classical register
/// distribution off the final state and draws all shots from it.
/// Measurements are terminal: a gate on an already measured qubit is
/// rejected.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Shot sampler.
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Create a new simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self::build(
            BackendConfig::new("simulator"),
            DEFAULT_MAX_QUBITS,
            StdRng::from_entropy(),
        )
    }

    /// Create a simulator whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(
            BackendConfig::new("simulator"),
            DEFAULT_MAX_QUBITS,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(
            BackendConfig::new("simulator"),
            max_qubits,
            StdRng::from_entropy(),
        )
    }

    fn build(config: BackendConfig, max_qubits: u32, rng: StdRng) -> Self {
        let capabilities = Capabilities::simulator(max_qubits).with_name(config.name.clone());
        Self {
            config,
            capabilities,
            rng: Mutex::new(rng),
        }
    }

    /// Simulate `circuit` and return the classical register distribution.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn simulate(&self, circuit: &Circuit) -> HalResult<Vec<f64>> {
        if let ValidationResult::Invalid { reasons } =
            ValidationResult::check(circuit, &self.capabilities)
        {
            let message = reasons.join("; ");
            let too_wide = circuit.num_qubits() > self.capabilities.num_qubits as usize;
            return Err(if too_wide {
                HalError::CircuitTooLarge(message)
            } else {
                HalError::InvalidCircuit(message)
            });
        }
        if circuit.num_clbits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} classical bits but simulator only supports {}",
                circuit.num_clbits(),
                self.capabilities.num_qubits
            )));
        }

        let num_qubits = circuit.num_qubits();
        debug!("Starting simulation: {} qubits", num_qubits);

        let mut sv = Statevector::new(num_qubits);
        let mut measured = vec![false; num_qubits];
        let mut readout: Vec<(usize, usize)> = Vec::new();

        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        measured[q.index()] = true;
                        readout.retain(|&(_, clbit)| clbit != c.index());
                        readout.push((q.index(), c.index()));
                    }
                }
                InstructionKind::Gate(gate) => {
                    if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
                        return Err(HalError::Unsupported(format!(
                            "gate '{}' acts on {q} after it was measured",
                            gate.name()
                        )));
                    }
                    sv.apply(inst);
                }
                InstructionKind::Barrier { .. } => {}
            }
        }

        debug!(
            "Circuit has {} instructions, {} measured qubits",
            circuit.num_ops(),
            readout.len()
        );

        Ok(sv.register_distribution(&readout, circuit.num_clbits()))
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(ValidationResult::check(circuit, &self.capabilities))
    }

    #[instrument(skip(self, circuit))]
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested but simulator allows at most {}",
                self.capabilities.max_shots
            )));
        }

        let start = Instant::now();
        let dist = self.simulate(circuit)?;

        let draws = {
            let mut rng = self
                .rng
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            sample_indices(&dist, shots, &mut *rng)
        };

        let width = circuit.num_clbits();
        let mut counts = Counts::new();
        for value in draws {
            counts.insert(value_to_bitstring(value, width), 1);
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = elapsed.as_millis() as u64;
        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed_ms))
    }

    async fn probabilities(&self, circuit: &Circuit) -> HalResult<Vec<f64>> {
        self.simulate(circuit)
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            Some(v) => u32::try_from(v)
                .map_err(|_| HalError::Configuration(format!("max_qubits {v} out of range")))?,
            None => DEFAULT_MAX_QUBITS,
        };
        let rng = match config.extra_u64("seed")? {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self::build(config, max_qubits, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grover_ir::{ClbitId, QubitId};

    fn bell() -> Circuit {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure_many([QubitId(0), QubitId(1)], [ClbitId(0), ClbitId(1)])
            .unwrap();
        circuit
    }

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert_eq!(backend.name(), "simulator");
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::with_seed(11);
        let result = backend.run(&bell(), 1000).await.unwrap();
        assert_eq!(result.shots, 1000);

        let counts = &result.counts;
        assert_eq!(counts.total_shots(), 1000);
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert!(counts.get("00") > 400 && counts.get("11") > 400);
    }

    #[tokio::test]
    async fn test_bitstrings_are_lsb_first() {
        let mut circuit = Circuit::with_size("lsb", 3, 3);
        circuit
            .x(QubitId(0))
            .unwrap()
            .measure_many((0..3).map(QubitId), (0..3).map(ClbitId))
            .unwrap();

        let backend = SimulatorBackend::with_seed(0);
        let result = backend.run(&circuit, 10).await.unwrap();
        assert_eq!(result.counts.get("100"), 10);
    }

    #[tokio::test]
    async fn test_unmeasured_ancilla_is_dropped() {
        let mut circuit = Circuit::with_size("anc", 3, 2);
        circuit
            .x(QubitId(2))
            .unwrap()
            .x(QubitId(1))
            .unwrap()
            .measure_many([QubitId(0), QubitId(1)], [ClbitId(0), ClbitId(1)])
            .unwrap();

        let backend = SimulatorBackend::with_seed(0);
        let probs = backend.probabilities(&circuit).await.unwrap();
        assert_eq!(probs.len(), 4);
        assert!((probs[0b10] - 1.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_seeded_runs_repeat() {
        let a = SimulatorBackend::with_seed(42)
            .run(&bell(), 500)
            .await
            .unwrap();
        let b = SimulatorBackend::with_seed(42)
            .run(&bell(), 500)
            .await
            .unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::new();
        let result = backend.run(&bell(), 0).await;
        assert!(matches!(result, Err(HalError::InvalidShots(_))));
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);

        let circuit = Circuit::with_size("test", 10, 0);
        let result = backend.run(&circuit, 100).await;

        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }

    #[tokio::test]
    async fn test_gate_after_measure_rejected() {
        let mut circuit = Circuit::with_size("mid", 1, 1);
        circuit
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .h(QubitId(0))
            .unwrap();

        let backend = SimulatorBackend::new();
        assert!(matches!(
            backend.probabilities(&circuit).await,
            Err(HalError::Unsupported(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = BackendConfig::new("sim-seeded")
            .with_extra("max_qubits", serde_json::json!(8))
            .with_extra("seed", serde_json::json!(3));
        let backend = SimulatorBackend::from_config(config).unwrap();
        assert_eq!(backend.name(), "sim-seeded");
        assert_eq!(backend.capabilities().num_qubits, 8);

        let bad = BackendConfig::new("sim").with_extra("max_qubits", serde_json::json!(-1));
        assert!(matches!(
            SimulatorBackend::from_config(bad),
            Err(HalError::Configuration(_))
        ));
    }
}
