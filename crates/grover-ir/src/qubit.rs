//! Wire identifiers and register labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A qubit wire.
///
/// `QubitId(i)` is also bit `i` of a basis-state index, so the index
/// register of a search reads directly as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Position as a slice index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Single-bit mask of this qubit in a basis-state index.
    pub fn mask(self) -> u64 {
        1 << self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A classical bit wire. `ClbitId(i)` is character `i` of an outcome string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// Position as a slice index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Where a wire sits inside a named register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterSlot {
    pub name: String,
    pub offset: u32,
}

/// A wire together with the register it was allocated in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wire<I> {
    pub id: I,
    pub slot: Option<RegisterSlot>,
}

/// A qubit of a circuit.
pub type Qubit = Wire<QubitId>;
/// A classical bit of a circuit.
pub type Clbit = Wire<ClbitId>;

impl<I> Wire<I> {
    /// A wire outside any register.
    pub fn new(id: I) -> Self {
        Self { id, slot: None }
    }

    /// A wire at `offset` in register `name`.
    pub fn in_register(id: I, name: impl Into<String>, offset: u32) -> Self {
        Self {
            id,
            slot: Some(RegisterSlot {
                name: name.into(),
                offset,
            }),
        }
    }

    /// Name of the owning register.
    pub fn register(&self) -> Option<&str> {
        self.slot.as_ref().map(|s| s.name.as_str())
    }
}

impl<I: fmt::Display> fmt::Display for Wire<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Some(RegisterSlot { name, offset }) => write!(f, "{name}[{offset}]"),
            None => self.id.fmt(f),
        }
    }
}
