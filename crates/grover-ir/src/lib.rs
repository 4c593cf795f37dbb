//! Circuit intermediate representation for the Grover simulator.
//!
//! Circuits are built through the [`Circuit`] builder and stored as a
//! [`CircuitDag`]. The gate set covers the single-qubit gates H, X and Z,
//! CX, and a multi-controlled X with any number of controls, which is what
//! oracle and diffuser construction need.
//!
//! # Example: Phase Kickback
//!
//! ```rust
//! use grover_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("kickback", 3, 2);
//!
//! // Ancilla in |1>, index qubits in uniform superposition
//! circuit.x(QubitId(2)).unwrap();
//! circuit.h(QubitId(0)).unwrap().h(QubitId(1)).unwrap();
//!
//! // Flip the phase of |11> through H-MCX-H on the ancilla
//! circuit
//!     .h(QubitId(2)).unwrap()
//!     .mcx(&[QubitId(0), QubitId(1)], QubitId(2)).unwrap()
//!     .h(QubitId(2)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 3);
//! assert_eq!(circuit.count_ops()["mcx"], 1);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `H` | 1 | Hadamard |
//! | `X`, `Z` | 1 | Pauli gates |
//! | `CX` | 2 | Controlled-X |
//! | `MCX(c)` | c + 1 | Multi-controlled X, controls first |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod render;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId, RegisterSlot, Wire};
pub use render::{TextRenderer, render_text};
