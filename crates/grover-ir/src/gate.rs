//! Quantum gate types.

use serde::{Deserialize, Serialize};

/// Gates with known semantics.
///
/// Multi-qubit gates list their controls first and their target last in the
/// operand order of an [`Instruction`](crate::Instruction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X (bit flip).
    X,
    /// Pauli-Z (phase flip).
    Z,
    /// Hadamard (basis change).
    H,
    /// Controlled-X (CNOT).
    CX,
    /// Multi-controlled X with the given number of controls.
    ///
    /// `MCX(0)` acts as a plain X on its single operand.
    MCX(u32),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::CX => "cx",
            StandardGate::MCX(_) => "mcx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I | StandardGate::X | StandardGate::Z | StandardGate::H => 1,
            StandardGate::CX => 2,
            StandardGate::MCX(controls) => controls + 1,
        }
    }

    /// Number of leading operands that act as controls.
    pub fn num_controls(&self) -> u32 {
        match self {
            StandardGate::CX => 1,
            StandardGate::MCX(controls) => *controls,
            _ => 0,
        }
    }

    /// Whether the gate flips its target bit (X family).
    pub fn is_bit_flip(&self) -> bool {
        matches!(
            self,
            StandardGate::X | StandardGate::CX | StandardGate::MCX(_)
        )
    }
}

/// A gate with an optional display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The gate kind.
    pub kind: StandardGate,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new unlabeled gate.
    pub fn standard(kind: StandardGate) -> Self {
        Self { kind, label: None }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::MCX(2).num_qubits(), 3);
        assert_eq!(StandardGate::MCX(5).num_qubits(), 6);
        assert_eq!(StandardGate::MCX(0).num_qubits(), 1);

        assert_eq!(StandardGate::MCX(4).num_controls(), 4);
        assert_eq!(StandardGate::H.num_controls(), 0);
        assert!(StandardGate::MCX(2).is_bit_flip());
        assert!(!StandardGate::Z.is_bit_flip());
    }

    #[test]
    fn test_gate_creation() {
        let h = Gate::standard(StandardGate::H);
        assert_eq!(h.name(), "h");
        assert!(h.label.is_none());

        let labeled = Gate::from(StandardGate::MCX(3)).with_label("mcz-core");
        assert_eq!(labeled.name(), "mcx");
        assert_eq!(labeled.label.as_deref(), Some("mcz-core"));
    }
}
