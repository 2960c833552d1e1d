// File: src/violation.rs
// Purpose: Violation flags and the bit set a rule evaluation produces

use serde::Serialize;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A single failed constraint
///
/// Each variant owns one bit, so several can be reported for the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Violation {
    RequiredViolation,
    SizeRangeViolation,
    ValueRangeViolation,
    InputClassViolation,
    FieldUnreadable,
}

impl Violation {
    /// All violations in ascending bit order
    pub const ALL: [Violation; 5] = [
        Violation::RequiredViolation,
        Violation::SizeRangeViolation,
        Violation::ValueRangeViolation,
        Violation::InputClassViolation,
        Violation::FieldUnreadable,
    ];

    pub const fn bit(self) -> u8 {
        match self {
            Violation::RequiredViolation => 1,
            Violation::SizeRangeViolation => 2,
            Violation::ValueRangeViolation => 4,
            Violation::InputClassViolation => 8,
            Violation::FieldUnreadable => 16,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Violation::RequiredViolation => "RequiredViolation",
            Violation::SizeRangeViolation => "SizeRangeViolation",
            Violation::ValueRangeViolation => "ValueRangeViolation",
            Violation::InputClassViolation => "InputClassViolation",
            Violation::FieldUnreadable => "FieldUnreadable",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of violations found for one field
///
/// The empty set means the value is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ViolationSet(u8);

impl ViolationSet {
    pub const VALID: ViolationSet = ViolationSet(0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, violation: Violation) -> bool {
        self.0 & violation.bit() != 0
    }

    pub fn insert(&mut self, violation: Violation) {
        self.0 |= violation.bit();
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.is_valid()
    }

    /// Violations present in the set, lowest bit first
    pub fn iter(self) -> impl Iterator<Item = Violation> {
        Violation::ALL.into_iter().filter(move |v| self.contains(*v))
    }

    /// Symbolic names of the violations, lowest bit first
    pub fn names(self) -> Vec<&'static str> {
        self.iter().map(Violation::name).collect()
    }
}

impl From<Violation> for ViolationSet {
    fn from(violation: Violation) -> Self {
        ViolationSet(violation.bit())
    }
}

impl BitOr for ViolationSet {
    type Output = ViolationSet;

    fn bitor(self, rhs: ViolationSet) -> ViolationSet {
        ViolationSet(self.0 | rhs.0)
    }
}

impl BitOr<Violation> for ViolationSet {
    type Output = ViolationSet;

    fn bitor(self, rhs: Violation) -> ViolationSet {
        ViolationSet(self.0 | rhs.bit())
    }
}

impl BitOrAssign for ViolationSet {
    fn bitor_assign(&mut self, rhs: ViolationSet) {
        self.0 |= rhs.0;
    }
}

impl BitOrAssign<Violation> for ViolationSet {
    fn bitor_assign(&mut self, rhs: Violation) {
        self.insert(rhs);
    }
}

impl fmt::Display for ViolationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("Valid");
        }
        let names = self.names();
        f.write_str(&names.join(" | "))
    }
}

impl Serialize for ViolationSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
