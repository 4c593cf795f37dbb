//! Inversion about the mean.

use grover_ir::Circuit;
use tracing::instrument;

use crate::circuit::register_layout;
use crate::error::{GroverError, GroverResult};

/// Build the diffuser on `n + 1` qubits.
///
/// Only the index register is touched: H and X on every index qubit, a
/// multi-controlled Z on `q(n-1)` (H, MCX from `q0..q(n-2)`, H), then X and
/// H again. The result is `I - 2|s⟩⟨s|`, which is `2|s⟩⟨s| - I` up to a
/// global phase of -1. For `n = 1` the MCX has no controls.
#[instrument(level = "debug")]
pub fn build_diffuser(n: u32) -> GroverResult<Circuit> {
    if n == 0 {
        return Err(GroverError::InvalidProblem(
            "diffuser needs at least one index qubit".into(),
        ));
    }
    let (mut circuit, index, _anc) = register_layout("diffuser", n, false);

    for &q in &index {
        circuit.h(q)?;
    }
    for &q in &index {
        circuit.x(q)?;
    }

    if let Some((&target, controls)) = index.split_last() {
        circuit.h(target)?.mcx(controls, target)?.h(target)?;
    }

    for &q in &index {
        circuit.x(q)?;
    }
    for &q in &index {
        circuit.h(q)?;
    }

    Ok(circuit)
}
