//! DAG-based circuit representation.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DagNode {
    /// Input node for a wire.
    In(WireId),
    /// Output node for a wire.
    Out(WireId),
    /// Operation node containing an instruction.
    Op(Instruction),
}

impl DagNode {
    /// Get the instruction if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            _ => None,
        }
    }
}

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// An edge in the circuit DAG representing a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagEdge {
    /// The wire this edge represents.
    pub wire: WireId,
}

/// Endpoints and running state of one wire.
#[derive(Debug, Clone, Copy)]
struct WireTrack {
    input: NodeIndex,
    output: NodeIndex,
    /// Last node before `output`.
    front: NodeIndex,
    /// Layers occupied so far.
    depth: usize,
}

/// Append-only circuit DAG.
///
/// Every wire runs from an `In` node through the operations that touch it
/// to an `Out` node. Operations are only appended, so insertion order is a
/// topological order and is kept alongside the graph.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<DagNode, DagEdge, u32>,
    wires: FxHashMap<WireId, WireTrack>,
    order: Vec<NodeIndex>,
}

impl CircuitDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a qubit wire. Adding an existing qubit is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        self.add_wire(qubit.into());
    }

    /// Add a classical wire. Adding an existing bit is a no-op.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        self.add_wire(clbit.into());
    }

    fn add_wire(&mut self, wire: WireId) {
        if self.wires.contains_key(&wire) {
            return;
        }
        let input = self.graph.add_node(DagNode::In(wire));
        let output = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(input, output, DagEdge { wire });
        self.wires.insert(
            wire,
            WireTrack {
                input,
                output,
                front: input,
                depth: 0,
            },
        );
    }

    /// Reject an instruction that names unknown wires, repeats a qubit, or
    /// does not match its gate's arity.
    #[allow(clippy::cast_possible_truncation)]
    fn check(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let expected = gate.num_qubits();
                let got = instruction.qubits.len() as u32;
                if expected != got {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected,
                        got,
                    });
                }
                Some(gate.name().to_string())
            }
            _ => None,
        };

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !self.wires.contains_key(&WireId::from(qubit)) {
                return Err(IrError::QubitNotFound { qubit, gate_name });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit { qubit, gate_name });
            }
        }
        match instruction
            .clbits
            .iter()
            .find(|&&c| !self.wires.contains_key(&WireId::from(c)))
        {
            Some(&clbit) => Err(IrError::ClbitNotFound { clbit, gate_name }),
            None => Ok(()),
        }
    }

    /// Append an instruction at the end of its wires.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        self.check(&instruction)?;

        let wires: Vec<WireId> = instruction
            .qubits
            .iter()
            .map(|&q| WireId::from(q))
            .chain(instruction.clbits.iter().map(|&c| WireId::from(c)))
            .collect();
        let occupies_layer = !instruction.is_barrier();
        let op = self.graph.add_node(DagNode::Op(instruction));

        let mut layer = 0;
        for wire in &wires {
            let track = self.wires[wire];
            let stale = self
                .graph
                .find_edge(track.front, track.output)
                .ok_or_else(|| {
                    IrError::InvalidDag(format!("Wire {wire:?} is detached from its output"))
                })?;
            let edge = DagEdge { wire: *wire };
            self.graph.remove_edge(stale);
            self.graph.add_edge(track.front, op, edge);
            self.graph.add_edge(op, track.output, edge);
            layer = layer.max(track.depth);
        }

        // Barriers align their wires without occupying a layer.
        let depth = if occupies_layer { layer + 1 } else { layer };
        for wire in &wires {
            if let Some(track) = self.wires.get_mut(wire) {
                track.front = op;
                track.depth = depth;
            }
        }

        self.order.push(op);
        Ok(op)
    }

    /// Operations in insertion order.
    pub fn ops(&self) -> impl Iterator<Item = &Instruction> + '_ {
        self.order
            .iter()
            .filter_map(|&idx| self.graph[idx].instruction())
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits().len()
    }

    pub fn num_clbits(&self) -> usize {
        self.clbits().len()
    }

    /// Number of operations, barriers included.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.order.len()
    }

    /// Layer count; barriers do not count.
    pub fn depth(&self) -> usize {
        self.wires.values().map(|t| t.depth).max().unwrap_or(0)
    }

    /// Qubits in ascending id order.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<_> = self
            .wires
            .keys()
            .filter_map(|w| match w {
                WireId::Qubit(q) => Some(*q),
                WireId::Clbit(_) => None,
            })
            .collect();
        qubits.sort_unstable();
        qubits
    }

    /// Classical bits in ascending id order.
    pub fn clbits(&self) -> Vec<ClbitId> {
        let mut clbits: Vec<_> = self
            .wires
            .keys()
            .filter_map(|w| match w {
                WireId::Clbit(c) => Some(*c),
                WireId::Qubit(_) => None,
            })
            .collect();
        clbits.sort_unstable();
        clbits
    }

    /// Check that the graph is acyclic and that every wire is an unbroken
    /// path from its `In` node to its `Out` node.
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("Graph contains a cycle".into()));
        }
        for (wire, track) in &self.wires {
            self.walk_wire(*wire, track)?;
        }
        Ok(())
    }

    fn walk_wire(&self, wire: WireId, track: &WireTrack) -> IrResult<()> {
        let mut current = track.input;
        for _ in 0..=self.graph.node_count() {
            if current == track.output {
                return Ok(());
            }
            current = self
                .graph
                .edges_directed(current, Direction::Outgoing)
                .find(|e| e.weight().wire == wire)
                .map(|e| e.target())
                .ok_or_else(|| {
                    IrError::InvalidDag(format!("Wire {wire:?} breaks after node {current:?}"))
                })?;
        }
        Err(IrError::InvalidDag(format!(
            "Wire {wire:?} never reaches its output node"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    #[test]
    fn test_empty_dag() {
        let dag = CircuitDag::new();
        assert_eq!(dag.num_qubits(), 0);
        assert_eq!(dag.num_ops(), 0);
        assert_eq!(dag.depth(), 0);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_parallel_gates_depth() {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        dag.add_qubit(QubitId(1));

        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();

        assert_eq!(dag.num_ops(), 2);
        assert_eq!(dag.depth(), 1);
    }

    #[test]
    fn test_mcx_serializes_wires() {
        let mut dag = CircuitDag::new();
        for i in 0..4 {
            dag.add_qubit(QubitId(i));
        }
        dag.apply(Instruction::single_qubit_gate(StandardGate::X, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::mcx(&[QubitId(0), QubitId(1), QubitId(2)], QubitId(3)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(3)))
            .unwrap();

        assert_eq!(dag.depth(), 3);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_barrier_does_not_add_depth() {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        dag.add_qubit(QubitId(1));
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::barrier([QubitId(0), QubitId(1)], None))
            .unwrap();
        assert_eq!(dag.depth(), 1);

        // The barrier lifts q1 to q0's layer, so this H lands in layer 2.
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();
        assert_eq!(dag.depth(), 2);
    }

    #[test]
    fn test_ops_keep_insertion_order() {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        dag.add_qubit(QubitId(1));
        dag.apply(Instruction::single_qubit_gate(StandardGate::X, QubitId(1)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();

        let names: Vec<_> = dag.ops().map(Instruction::name).collect();
        assert_eq!(names, vec!["x", "h"]);
    }

    #[test]
    fn test_gate_arity_mismatch() {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        dag.add_qubit(QubitId(1));

        let result = dag.apply(Instruction::gate(StandardGate::MCX(2), [QubitId(0), QubitId(1)]));
        match result {
            Err(IrError::QubitCountMismatch {
                gate_name,
                expected,
                got,
            }) => {
                assert_eq!(gate_name, "mcx");
                assert_eq!(expected, 3);
                assert_eq!(got, 2);
            }
            other => panic!("Expected QubitCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));
        dag.add_qubit(QubitId(1));

        let result = dag.apply(Instruction::mcx(&[QubitId(0), QubitId(0)], QubitId(1)));
        assert!(matches!(
            result,
            Err(IrError::DuplicateQubit { qubit: QubitId(0), .. })
        ));
    }

    #[test]
    fn test_qubit_not_found_with_context() {
        let mut dag = CircuitDag::new();
        dag.add_qubit(QubitId(0));

        let inst = Instruction::gate(StandardGate::CX, [QubitId(0), QubitId(99)]);
        match dag.apply(inst) {
            Err(IrError::QubitNotFound { qubit, gate_name }) => {
                assert_eq!(qubit, QubitId(99));
                assert_eq!(gate_name, Some("cx".to_string()));
            }
            other => panic!("Expected QubitNotFound, got {other:?}"),
        }
    }
}
