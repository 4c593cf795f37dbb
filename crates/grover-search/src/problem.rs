//! Search problem definition.

use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GroverError, GroverResult};

/// Largest supported index-register width.
///
/// Register values are held in a `u64` and `2^n` must stay representable.
pub const MAX_INDEX_QUBITS: u32 = 63;

/// Ordered set of marked register values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkedSet(BTreeSet<u64>);

impl MarkedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `m` distinct values uniformly from `[0, 2^n)`.
    pub fn random<R: Rng + ?Sized>(n: u32, m: u64, rng: &mut R) -> GroverResult<Self> {
        check_width(n)?;
        let space = 1_u64 << n;
        if m > space {
            return Err(GroverError::InvalidProblem(format!(
                "cannot mark {m} values in a space of {space}"
            )));
        }
        let (length, amount) = usize::try_from(space)
            .ok()
            .zip(usize::try_from(m).ok())
            .ok_or_else(|| {
                GroverError::InvalidProblem(format!(
                    "sampling {m} of {space} values exceeds the platform word size"
                ))
            })?;

        Ok(rand::seq::index::sample(rng, length, amount)
            .into_iter()
            .map(|v| v as u64)
            .collect())
    }

    /// Number of marked values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `value` is marked.
    pub fn contains(&self, value: u64) -> bool {
        self.0.contains(&value)
    }

    /// Marked values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    /// Largest marked value.
    pub fn max(&self) -> Option<u64> {
        self.0.last().copied()
    }
}

impl FromIterator<u64> for MarkedSet {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MarkedSet {
    type Item = u64;
    type IntoIter = std::collections::btree_set::IntoIter<u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for MarkedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}

fn check_width(n: u32) -> GroverResult<()> {
    if n == 0 || n > MAX_INDEX_QUBITS {
        return Err(GroverError::InvalidProblem(format!(
            "index register width must be in 1..={MAX_INDEX_QUBITS}, got {n}"
        )));
    }
    Ok(())
}

/// A validated `(n, M)` pair.
///
/// Every marked value fits in `n` bits. The marked set may be empty; the
/// oracle handles that as a no-op while the iteration searches reject it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchProblem {
    num_qubits: u32,
    marked: MarkedSet,
}

impl SearchProblem {
    /// Validate and create a problem.
    pub fn new(num_qubits: u32, marked: impl IntoIterator<Item = u64>) -> GroverResult<Self> {
        check_width(num_qubits)?;
        let marked: MarkedSet = marked.into_iter().collect();
        let space = 1_u64 << num_qubits;
        if let Some(max) = marked.max() {
            if max >= space {
                return Err(GroverError::InvalidProblem(format!(
                    "marked value {max} does not fit in {num_qubits} bits"
                )));
            }
        }
        Ok(Self { num_qubits, marked })
    }

    /// Create a problem with `m` randomly marked values.
    pub fn random<R: Rng + ?Sized>(num_qubits: u32, m: u64, rng: &mut R) -> GroverResult<Self> {
        let marked = MarkedSet::random(num_qubits, m, rng)?;
        Self::new(num_qubits, marked)
    }

    /// Width `n` of the index register.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The marked values.
    pub fn marked(&self) -> &MarkedSet {
        &self.marked
    }

    /// Number of marked values `m`.
    pub fn num_marked(&self) -> u64 {
        self.marked.len() as u64
    }

    /// Size of the search space `N = 2^n`.
    pub fn search_space(&self) -> u64 {
        1_u64 << self.num_qubits
    }

    /// `m / N`, the success probability of a blind guess.
    #[allow(clippy::cast_precision_loss)]
    pub fn marked_fraction(&self) -> f64 {
        self.num_marked() as f64 / self.search_space() as f64
    }

    /// Fails unless at least one value is marked.
    pub(crate) fn require_marked(&self) -> GroverResult<u64> {
        match self.num_marked() {
            0 => Err(GroverError::InvalidProblem(
                "iteration search needs at least one marked value".into(),
            )),
            m => Ok(m),
        }
    }
}

impl fmt::Display for SearchProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}, M={}", self.num_qubits, self.marked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_problem_validation() {
        assert!(SearchProblem::new(4, [3]).is_ok());
        assert!(SearchProblem::new(4, [15]).is_ok());
        assert!(matches!(
            SearchProblem::new(4, [16]),
            Err(GroverError::InvalidProblem(_))
        ));
        assert!(matches!(
            SearchProblem::new(0, []),
            Err(GroverError::InvalidProblem(_))
        ));
        assert!(SearchProblem::new(64, []).is_err());
        assert!(SearchProblem::new(63, [u64::MAX >> 1]).is_ok());
    }

    #[test]
    fn test_marked_set_dedups_and_orders() {
        let set: MarkedSet = [9, 1, 9, 4].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 4, 9]);
        assert_eq!(set.to_string(), "{1, 4, 9}");
    }

    #[test]
    fn test_random_marked_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let set = MarkedSet::random(8, 16, &mut rng).unwrap();
        assert_eq!(set.len(), 16);
        assert!(set.iter().all(|v| v < 256));

        let all = MarkedSet::random(3, 8, &mut rng).unwrap();
        assert_eq!(all.len(), 8);
        assert!(MarkedSet::random(3, 9, &mut rng).is_err());
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = MarkedSet::random(10, 4, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = MarkedSet::random(10, 4, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_problem_accessors() {
        let problem = SearchProblem::new(8, [1, 2, 3, 4]).unwrap();
        assert_eq!(problem.search_space(), 256);
        assert_eq!(problem.num_marked(), 4);
        assert!((problem.marked_fraction() - 4.0 / 256.0).abs() < 1e-15);
        assert_eq!(problem.to_string(), "n=8, M={1, 2, 3, 4}");

        let empty = SearchProblem::new(3, []).unwrap();
        assert!(empty.require_marked().is_err());
    }
}
