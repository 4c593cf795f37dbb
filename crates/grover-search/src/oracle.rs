//! Phase oracle construction.

use grover_ir::{Circuit, QubitId};
use tracing::instrument;

use crate::circuit::register_layout;
use crate::error::GroverResult;
use crate::problem::SearchProblem;

/// Build the phase oracle for `problem` on `n + 1` qubits.
///
/// For every marked value `v`, in ascending order: X on each index qubit
/// whose bit of `v` is 0, so `v` becomes the all-ones pattern; H, MCX over
/// the whole index register, H on the ancilla; then the same X flips again.
/// With the ancilla prepared in |1⟩ each block negates the amplitude of
/// `|v⟩` and nothing else. An empty marked set gives an empty fragment.
#[instrument(
    level = "debug",
    skip(problem),
    fields(n = problem.num_qubits(), m = problem.num_marked())
)]
pub fn build_oracle(problem: &SearchProblem) -> GroverResult<Circuit> {
    let (mut circuit, index, anc) = register_layout("oracle", problem.num_qubits(), false);

    for value in problem.marked().iter() {
        let zeros: Vec<QubitId> = index
            .iter()
            .copied()
            .filter(|q| value & q.mask() == 0)
            .collect();

        for &q in &zeros {
            circuit.x(q)?;
        }
        circuit.h(anc)?.mcx(&index, anc)?.h(anc)?;
        for &q in &zeros {
            circuit.x(q)?;
        }
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_marked_set_is_noop() {
        let problem = SearchProblem::new(5, []).unwrap();
        let oracle = build_oracle(&problem).unwrap();
        assert_eq!(oracle.num_qubits(), 6);
        assert_eq!(oracle.num_ops(), 0);
    }

    #[test]
    fn test_single_value_layout() {
        // 3 = 0b0011 on 4 qubits: q2 and q3 are flipped.
        let problem = SearchProblem::new(4, [3]).unwrap();
        let oracle = build_oracle(&problem).unwrap();

        let ops: Vec<_> = oracle
            .instructions()
            .map(|inst| (inst.name().to_string(), inst.qubits.clone()))
            .collect();
        let q = |i| vec![QubitId(i)];
        let expected: Vec<(String, Vec<QubitId>)> = vec![
            ("x".into(), q(2)),
            ("x".into(), q(3)),
            ("h".into(), q(4)),
            ("mcx".into(), (0..5).map(QubitId).collect()),
            ("h".into(), q(4)),
            ("x".into(), q(2)),
            ("x".into(), q(3)),
        ];
        assert_eq!(ops, expected);
    }

    #[test]
    fn test_blocks_concatenate_per_value() {
        let problem = SearchProblem::new(3, [0, 5, 7]).unwrap();
        let counts = build_oracle(&problem).unwrap().count_ops();
        assert_eq!(counts["mcx"], 3);
        assert_eq!(counts["h"], 6);
        // zeros: 0 -> 3 bits, 5 -> 1 bit, 7 -> none; each flipped twice
        assert_eq!(counts["x"], 8);
    }
}
