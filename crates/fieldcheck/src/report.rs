// File: src/report.rs
// Purpose: Per-call validation report

use crate::violation::{Violation, ViolationSet};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// What happened to one field during a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The field carries no rule (or does not exist)
    Unchecked,
    /// Rules ran and none was violated
    Clean,
    /// Rules ran and these violations were found
    Failed(ViolationSet),
}

/// Result of one validation pass: failing fields mapped to their violations
///
/// Entries keep the order in which fields were enumerated. Fields that passed,
/// or had no rule, have no entry; [`ValidationReport::outcome`] tells the two
/// apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: Vec<(String, ViolationSet)>,
    checked: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note that at least one rule was evaluated for `field`
    pub(crate) fn mark_checked(&mut self, field: &str) {
        if !self.checked.iter().any(|f| f == field) {
            self.checked.push(field.to_string());
        }
    }

    /// Record violations for `field`
    ///
    /// A field seen twice in the same pass keeps its first position and
    /// accumulates the union of its violations.
    pub(crate) fn record(&mut self, field: &str, violations: ViolationSet) {
        if violations.is_valid() {
            return;
        }
        match self.entries.iter_mut().find(|(f, _)| f == field) {
            Some((_, existing)) => *existing |= violations,
            None => self.entries.push((field.to_string(), violations)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Violations of a failing field
    pub fn get(&self, field: &str) -> Option<ViolationSet> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, set)| *set)
    }

    /// Violations of a failing field, lowest bit first
    pub fn violations(&self, field: &str) -> Option<Vec<Violation>> {
        self.get(field).map(|set| set.iter().collect())
    }

    /// Violation names of a failing field, lowest bit first
    pub fn names(&self, field: &str) -> Option<Vec<&'static str>> {
        self.get(field).map(ViolationSet::names)
    }

    pub fn outcome(&self, field: &str) -> FieldOutcome {
        match self.get(field) {
            Some(set) => FieldOutcome::Failed(set),
            None if self.checked.iter().any(|f| f == field) => FieldOutcome::Clean,
            None => FieldOutcome::Unchecked,
        }
    }

    /// Fields that had at least one rule evaluated, in enumeration order
    pub fn checked_fields(&self) -> impl Iterator<Item = &str> {
        self.checked.iter().map(String::as_str)
    }

    /// Failing fields, in enumeration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ViolationSet)> {
        self.entries.iter().map(|(f, set)| (f.as_str(), *set))
    }

    /// One `"<field> <violation>"` line per failing (field, violation) pair
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.iter()
            .flat_map(|(field, set)| set.iter().map(move |v| format!("{} {}", field, v)))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, set) in &self.entries {
            map.serialize_entry(field, set)?;
        }
        map.end()
    }
}
