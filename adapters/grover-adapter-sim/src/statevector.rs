//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;

use grover_ir::{Instruction, InstructionKind, StandardGate};

/// A statevector representing a quantum state.
///
/// Basis index `i` has qubit `q` in state `(i >> q) & 1`.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements and barriers leave the state untouched; the caller
    /// handles measurement as a terminal read-out.
    pub fn apply(&mut self, instruction: &Instruction) {
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
            self.apply_standard_gate(gate.kind, &qubits);
        }
    }

    /// Apply a standard gate.
    fn apply_standard_gate(&mut self, gate: StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::MCX(_) => {
                if let Some((&target, controls)) = qubits.split_last() {
                    self.apply_mcx(controls, target);
                }
            }
        }
    }

    // =========================================================================
    // Gate kernels
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        self.apply_mcx(&[], qubit);
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        self.apply_mcx(&[control], target);
    }

    /// Flip `target` on every basis state where all `controls` are 1.
    fn apply_mcx(&mut self, controls: &[usize], target: usize) {
        let ctrl_mask = controls.iter().fold(0usize, |m, &c| m | (1 << c));
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if i & ctrl_mask == ctrl_mask && i & tgt_mask == 0 {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    // =========================================================================
    // Read-out
    // =========================================================================

    /// Distribution over a classical register of `num_clbits` bits.
    ///
    /// `readout` lists `(qubit, clbit)` pairs. Classical bits that no pair
    /// writes stay 0.
    pub fn register_distribution(&self, readout: &[(usize, usize)], num_clbits: usize) -> Vec<f64> {
        let mut dist = vec![0.0; 1 << num_clbits];
        for (i, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p == 0.0 {
                continue;
            }
            let value = readout
                .iter()
                .fold(0usize, |v, &(q, c)| v | (((i >> q) & 1) << c));
            dist[value] += p;
        }
        dist
    }
}

/// Draw `shots` indices from a discrete distribution.
///
/// The distribution need not be exactly normalized; draws are scaled to
/// its total mass.
pub fn sample_indices<R: Rng + ?Sized>(dist: &[f64], shots: u32, rng: &mut R) -> Vec<usize> {
    let mut cumulative = Vec::with_capacity(dist.len());
    let mut acc = 0.0;
    for &p in dist {
        acc += p;
        cumulative.push(acc);
    }
    let last = dist.len().saturating_sub(1);

    (0..shots)
        .map(|_| {
            let r: f64 = rng.r#gen::<f64>() * acc;
            cumulative.partition_point(|&c| c <= r).min(last)
        })
        .collect()
}

/// Render a register value as an LSB-first bitstring of `width` characters.
pub fn value_to_bitstring(value: usize, width: usize) -> String {
    (0..width)
        .map(|i| if (value >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grover_ir::QubitId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        for amp in &sv.amplitudes[1..] {
            assert!(approx_eq(*amp, Complex64::new(0.0, 0.0)));
        }
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_h(0);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_mcx_only_fires_on_all_ones() {
        let mut sv = Statevector::new(3);
        sv.apply_x(0);
        sv.apply_mcx(&[0, 1], 2);
        // q1 is 0, nothing happens
        assert!(approx_eq(sv.amplitudes[0b001], Complex64::new(1.0, 0.0)));

        sv.apply_x(1);
        sv.apply_mcx(&[0, 1], 2);
        assert!(approx_eq(sv.amplitudes[0b111], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_mcx_without_controls_is_x() {
        let mut sv = Statevector::new(2);
        sv.apply(&Instruction::mcx(&[], QubitId(1)));
        assert!(approx_eq(sv.amplitudes[0b10], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_phase_kickback() {
        // q0 in |+>, ancilla q1 in |->: CX writes the phase onto q0.
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_x(1);
        sv.apply_h(1);
        sv.apply_cx(0, 1);
        sv.apply_h(1);
        sv.apply_h(0);

        // q0 ends in |1>, ancilla back in |1>.
        assert!(approx_eq(sv.amplitudes[0b11], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_z_phase_and_controlled_phase() {
        let mut sv = Statevector::new(2);
        // Leaves |+>|+> with the phase of |11> flipped.
        sv.apply_h(0);
        sv.apply_cx(0, 1);
        sv.apply_h(1);
        assert!(sv.amplitudes[0b11].re < 0.0);
        assert!(sv.amplitudes[0b01].re > 0.0);

        sv.apply_z(0);
        assert!(sv.amplitudes[0b01].re < 0.0);
        let norm: f64 = sv.amplitudes.iter().map(Complex64::norm_sqr).sum();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_register_distribution_remaps_bits() {
        // |q2 q1 q0> = |1 0 1>, read q2 -> c0 and q0 -> c1.
        let mut sv = Statevector::new(3);
        sv.apply_x(0);
        sv.apply_x(2);
        let dist = sv.register_distribution(&[(2, 0), (0, 1)], 2);
        assert_eq!(dist.len(), 4);
        assert!((dist[0b11] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        let draws = sample_indices(&[0.0, 0.0, 1.0, 0.0], 100, &mut rng);
        assert!(draws.iter().all(|&d| d == 2));
    }

    #[test]
    fn test_sample_frequencies() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws = sample_indices(&[0.25, 0.75], 20_000, &mut rng);
        let ones = draws.iter().filter(|&&d| d == 1).count();
        let freq = ones as f64 / 20_000.0;
        assert!((freq - 0.75).abs() < 0.02);
    }

    #[test]
    fn test_value_to_bitstring_is_lsb_first() {
        assert_eq!(value_to_bitstring(0b0011, 4), "1100");
        assert_eq!(value_to_bitstring(3, 4), "1100");
        assert_eq!(value_to_bitstring(0, 0), "");
    }
}
