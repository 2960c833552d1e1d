// File: src/engine.rs
// Purpose: Validation pass over an instance and report aggregation

use crate::error::SchemaError;
use crate::report::ValidationReport;
use crate::rule::Rule;
use crate::schema::{FieldVisitor, Validatable};
use crate::value::FieldRead;
use crate::violation::ViolationSet;
use tracing::{debug, trace};

/// Runs rules over an instance and keeps the report of the last pass
///
/// Each call to [`Engine::validate`] starts from an empty report, so reusing an
/// engine never mixes results from different instances.
#[derive(Debug, Default)]
pub struct Engine {
    report: ValidationReport,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every field of `item` that carries a rule
    ///
    /// Data problems, including fields whose value cannot be read, are
    /// recorded in the report. An `Err` is returned only when the field list
    /// itself is malformed; the report is left empty in that case.
    pub fn validate<T: Validatable + ?Sized>(&mut self, item: &T) -> Result<(), SchemaError> {
        self.report = ValidationReport::new();

        let mut pass = Pass {
            report: ValidationReport::new(),
            fields: 0,
        };
        item.visit_fields(&mut pass)?;

        debug!(
            fields = pass.fields,
            failed = pass.report.len(),
            "validation pass finished"
        );
        self.report = pass.report;
        Ok(())
    }

    /// Report of the last [`Engine::validate`] call
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn into_report(self) -> ValidationReport {
        self.report
    }
}

/// Validate `item` with a throwaway engine and return its report
pub fn validate<T: Validatable + ?Sized>(item: &T) -> Result<ValidationReport, SchemaError> {
    let mut engine = Engine::new();
    engine.validate(item)?;
    Ok(engine.into_report())
}

struct Pass {
    report: ValidationReport,
    fields: usize,
}

impl FieldVisitor for Pass {
    fn visit(
        &mut self,
        field: &str,
        rules: &[Rule],
        read: FieldRead<'_>,
    ) -> Result<(), SchemaError> {
        for rule in rules {
            rule.check_bounds(field)?;
        }
        if rules.is_empty() {
            return Ok(());
        }
        self.fields += 1;
        self.report.mark_checked(field);

        if let Err(e) = &read {
            debug!(field, error = %e, "field could not be read");
        }

        let mut violations = ViolationSet::VALID;
        for rule in rules {
            let result = rule.evaluate_read(&read);
            trace!(field, ?rule, %result, "rule evaluated");
            violations |= result;
        }

        if !violations.is_valid() {
            debug!(field, %violations, "field failed validation");
            self.report.record(field, violations);
        }
        Ok(())
    }
}
