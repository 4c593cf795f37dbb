//! Plain-text circuit diagrams.
//!
//! One column per instruction, one wire row per qubit, with spacer rows
//! between wires that carry the vertical connectors of multi-qubit gates.
//! Labeled barriers print their label in a header row above the wires.
//!
//! ```text
//!          oracle
//! q[0]: -[H]---#---*---
//!              #   |
//! q[1]: -[H]---#--(+)--
//! ```

use crate::circuit::Circuit;
use crate::instruction::{Instruction, InstructionKind};

/// What a single column draws on one wire.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cell {
    Wire,
    Boxed(String),
    Control,
    Target,
    Cross,
    Barrier,
}

impl Cell {
    fn text(&self) -> String {
        match self {
            Cell::Wire => String::new(),
            Cell::Boxed(name) => format!("[{name}]"),
            Cell::Control => "*".into(),
            Cell::Target => "(+)".into(),
            Cell::Cross => "|".into(),
            Cell::Barrier => "#".into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Column {
    cells: Vec<Cell>,
    /// Rows `lo..hi` joined by a vertical connector below each row.
    link: Option<(usize, usize)>,
    header: Option<String>,
}

impl Column {
    fn width(&self) -> usize {
        let body = self
            .cells
            .iter()
            .map(|c| c.text().chars().count())
            .max()
            .unwrap_or(0);
        let head = self.header.as_ref().map_or(0, |h| h.chars().count());
        body.max(head).max(1) + 2
    }
}

/// Text renderer with optional line folding.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    /// Fold the diagram into several blocks once a line would exceed this
    /// many characters.
    pub max_width: Option<usize>,
}

impl TextRenderer {
    /// Create a renderer that never folds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold lines at `width` characters.
    #[must_use]
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Render `circuit` as a multi-line string.
    pub fn render(&self, circuit: &Circuit) -> String {
        let rows = circuit.num_qubits();
        let labels: Vec<String> = circuit
            .qubits()
            .iter()
            .map(|q| format!("{q}: "))
            .collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let columns: Vec<Column> = circuit
            .instructions()
            .map(|inst| layout(inst, rows))
            .collect();

        let budget = self
            .max_width
            .map_or(usize::MAX, |w| w.saturating_sub(label_width + 1).max(1));

        let mut blocks = Vec::new();
        let mut start = 0;
        while start < columns.len() || (start == 0 && blocks.is_empty()) {
            let mut end = start;
            let mut used = 0;
            while end < columns.len() {
                let w = columns[end].width();
                if end > start && used + w > budget {
                    break;
                }
                used += w;
                end += 1;
            }
            blocks.push(draw_block(&columns[start..end], &labels, label_width));
            if end == start {
                break;
            }
            start = end;
        }
        blocks.join("\n\n")
    }
}

/// Render `circuit` without folding.
pub fn render_text(circuit: &Circuit) -> String {
    TextRenderer::new().render(circuit)
}

fn layout(inst: &Instruction, rows: usize) -> Column {
    let mut cells = vec![Cell::Wire; rows];
    let mut link = None;
    let mut header = None;
    let operand_rows: Vec<usize> = inst.qubits.iter().map(|q| q.index()).collect();

    match &inst.kind {
        InstructionKind::Gate(gate) if inst.qubits.len() == 1 => {
            let name = gate
                .label
                .clone()
                .unwrap_or_else(|| gate.name().to_uppercase());
            cells[operand_rows[0]] = Cell::Boxed(name);
        }
        InstructionKind::Gate(gate) => {
            let controls = gate.kind.num_controls() as usize;
            for (i, &row) in operand_rows.iter().enumerate() {
                cells[row] = if i < controls {
                    Cell::Control
                } else if gate.kind.is_bit_flip() {
                    Cell::Target
                } else if controls > 0 {
                    Cell::Control
                } else {
                    Cell::Boxed(gate.name().to_uppercase())
                };
            }
            link = span(&operand_rows);
        }
        InstructionKind::Measure => {
            for (row, clbit) in operand_rows.iter().zip(&inst.clbits) {
                cells[*row] = Cell::Boxed(format!("M{}", clbit.0));
            }
        }
        InstructionKind::Barrier { label } => {
            for &row in &operand_rows {
                cells[row] = Cell::Barrier;
            }
            link = span(&operand_rows);
            header.clone_from(label);
        }
    }

    if let Some((lo, hi)) = link {
        for cell in &mut cells[lo..=hi] {
            if *cell == Cell::Wire {
                *cell = Cell::Cross;
            }
        }
    }

    Column {
        cells,
        link,
        header,
    }
}

fn span(rows: &[usize]) -> Option<(usize, usize)> {
    let lo = *rows.iter().min()?;
    let hi = *rows.iter().max()?;
    (hi > lo).then_some((lo, hi))
}

fn center(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    let left = (width.saturating_sub(len)) / 2;
    let right = width.saturating_sub(len + left);
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

fn draw_block(columns: &[Column], labels: &[String], label_width: usize) -> String {
    let mut lines = Vec::new();

    if columns.iter().any(|c| c.header.is_some()) {
        let mut line = " ".repeat(label_width);
        for col in columns {
            let w = col.width();
            match &col.header {
                Some(h) => line.push_str(&center(h, w, ' ')),
                None => line.push_str(&" ".repeat(w)),
            }
        }
        lines.push(line.trim_end().to_string());
    }

    for (row, label) in labels.iter().enumerate() {
        let mut wire = format!("{label:<label_width$}");
        for col in columns {
            wire.push_str(&center(&col.cells[row].text(), col.width(), '-'));
        }
        lines.push(wire);

        if row + 1 < labels.len() {
            let mut spacer = " ".repeat(label_width);
            for col in columns {
                let joined = col.link.is_some_and(|(lo, hi)| lo <= row && row < hi);
                let mark = if joined { "|" } else { "" };
                spacer.push_str(&center(mark, col.width(), ' '));
            }
            lines.push(spacer.trim_end().to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::{ClbitId, QubitId};

    fn small() -> Circuit {
        let mut circuit = Circuit::new("demo");
        circuit.add_qreg("q", 2);
        circuit.add_qreg("anc", 1);
        circuit.add_creg("c", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .barrier_all(Some("oracle"))
            .unwrap()
            .mcx(&[QubitId(0), QubitId(1)], QubitId(2))
            .unwrap()
            .measure_many([QubitId(0), QubitId(1)], [ClbitId(0), ClbitId(1)])
            .unwrap();
        circuit
    }

    #[test]
    fn test_renders_one_wire_per_qubit() {
        let text = render_text(&small());
        assert!(text.contains("q[0]: "));
        assert!(text.contains("q[1]: "));
        assert!(text.contains("anc[0]: "));
        assert!(text.contains("[H]"));
        assert!(text.contains("(+)"));
        assert!(text.contains("[M1]"));
    }

    #[test]
    fn test_barrier_label_in_header() {
        let text = render_text(&small());
        let first = text.lines().next().unwrap();
        assert!(first.contains("oracle"));
        assert!(!first.contains('-'));
    }

    #[test]
    fn test_mcx_connector_spans_rows() {
        let text = render_text(&small());
        // header, q0, gap, q1, gap, anc
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[2].contains('|'));
        assert!(lines[4].contains('|'));
    }

    #[test]
    fn test_folding_splits_blocks() {
        let mut circuit = Circuit::with_size("long", 1, 0);
        for _ in 0..40 {
            circuit.h(QubitId(0)).unwrap();
        }
        let text = TextRenderer::new().with_max_width(40).render(&circuit);
        assert!(text.contains("\n\n"));
        assert!(text.lines().all(|l| l.chars().count() <= 40));
    }

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::with_size("empty", 2, 0);
        let text = render_text(&circuit);
        assert_eq!(text.lines().count(), 3);
    }
}
