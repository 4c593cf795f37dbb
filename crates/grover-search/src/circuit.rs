//! Search-circuit assembly.

use grover_ir::{Circuit, ClbitId, QubitId};
use tracing::{debug, instrument};

use crate::diffuser::build_diffuser;
use crate::error::GroverResult;
use crate::oracle::build_oracle;
use crate::problem::SearchProblem;

/// Label of the barrier that opens each oracle block.
pub const ORACLE_LABEL: &str = "O";
/// Label of the barrier that opens each diffuser block.
pub const DIFFUSER_LABEL: &str = "D";

/// An `n`-qubit index register `q`, a one-qubit ancilla register `anc`
/// and, if `measured`, an `n`-bit classical register `c`.
pub(crate) fn register_layout(
    name: &str,
    n: u32,
    measured: bool,
) -> (Circuit, Vec<QubitId>, QubitId) {
    let mut circuit = Circuit::new(name);
    let index = circuit.add_qreg("q", n);
    let anc = circuit.add_qreg("anc", 1)[0];
    if measured {
        circuit.add_creg("c", n);
    }
    (circuit, index, anc)
}

/// Assemble the full search circuit for `k` Grover iterations.
///
/// X on the ancilla, H on every index qubit, then `k` rounds of oracle
/// followed by diffuser, then `q_i -> c_i` for the index register. Each
/// block starts with a labeled barrier so diagrams show the round
/// structure. The ancilla is never measured.
#[instrument(level = "debug", skip(problem), fields(problem = %problem))]
pub fn grover_circuit(problem: &SearchProblem, k: u64) -> GroverResult<Circuit> {
    let n = problem.num_qubits();
    let (mut circuit, index, anc) = register_layout("grover", n, true);

    circuit.x(anc)?;
    for &q in &index {
        circuit.h(q)?;
    }

    let oracle = build_oracle(problem)?;
    let diffuser = build_diffuser(n)?;
    for _ in 0..k {
        circuit.barrier_all(Some(ORACLE_LABEL))?;
        circuit.compose(&oracle)?;
        circuit.barrier_all(Some(DIFFUSER_LABEL))?;
        circuit.compose(&diffuser)?;
    }

    let clbits: Vec<ClbitId> = (0..n).map(ClbitId).collect();
    circuit.measure_many(index, clbits)?;

    debug!(
        "Assembled circuit: {} ops, depth {}",
        circuit.num_ops(),
        circuit.depth()
    );
    Ok(circuit)
}
