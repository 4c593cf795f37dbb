//! Circuit diagram command.

use std::fs;

use anyhow::{Context, Result};

use grover_ir::TextRenderer;
use grover_search::{SearchProblem, grover_circuit};

use super::common::Session;
use crate::output::{print_result, print_section, print_success};
use crate::plot::write_text_svg;

pub const TEXT_FILE: &str = "circuit_demo.txt";
pub const IMAGE_FILE: &str = "circuit_demo.svg";

/// Draw the search circuit for `marked` on `qubits` after `iterations`
/// rounds, as text and as an SVG image. Returns the files written.
pub fn execute(
    session: &Session,
    qubits: u32,
    marked: &[u64],
    iterations: u64,
    width: Option<usize>,
) -> Result<Vec<String>> {
    print_section(&format!("Circuit diagram (k = {iterations})"));

    let problem = SearchProblem::new(qubits, marked.iter().copied())?;
    let circuit = grover_circuit(&problem, iterations)?;

    let renderer = match width {
        Some(w) => TextRenderer::new().with_max_width(w),
        None => TextRenderer::new(),
    };
    let text = renderer.render(&circuit);
    println!("{text}");

    print_result("Problem", &problem);
    print_result("Qubits", circuit.num_qubits());
    print_result("Depth", circuit.depth());
    print_result("Operations", circuit.num_ops());

    let text_path = session.output_path(TEXT_FILE);
    fs::write(&text_path, format!("{text}\n"))
        .with_context(|| format!("Failed to write diagram: {}", text_path.display()))?;
    write_text_svg(
        &session.output_path(IMAGE_FILE),
        &format!("Grover circuit, {problem}, k = {iterations}"),
        &text,
    )?;
    print_success(&format!("Wrote {TEXT_FILE} and {IMAGE_FILE}"));

    Ok(vec![TEXT_FILE.to_string(), IMAGE_FILE.to_string()])
}
