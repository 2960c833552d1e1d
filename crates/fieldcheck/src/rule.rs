// File: src/rule.rs
// Purpose: Per-field rule and its evaluation

use crate::error::SchemaError;
use crate::input_class::InputClass;
use crate::value::{FieldRead, FieldValue};
use crate::violation::{Violation, ViolationSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A bundle of constraints bound to one field
///
/// Every constraint is inactive by default, and a rule with nothing active
/// accepts any value, including null.
///
/// ```rust,ignore
/// use fieldcheck::{InputClass, Rule};
///
/// const USER_ID: Rule = Rule::new().required().size(5, 100).input(InputClass::Email);
/// assert!(USER_ID.evaluate(&"someone@site.com".into()).is_valid());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    #[serde(default)]
    required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_value: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_value: Option<i64>,

    #[serde(default)]
    input: InputClass,
}

impl Rule {
    pub const fn new() -> Self {
        Self {
            required: false,
            min_size: None,
            max_size: None,
            min_value: None,
            max_value: None,
            input: InputClass::Any,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn min_size(mut self, min: usize) -> Self {
        self.min_size = Some(min);
        self
    }

    pub const fn max_size(mut self, max: usize) -> Self {
        self.max_size = Some(max);
        self
    }

    /// Inclusive length bounds
    pub const fn size(self, min: usize, max: usize) -> Self {
        self.min_size(min).max_size(max)
    }

    pub const fn min_value(mut self, min: i64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub const fn max_value(mut self, max: i64) -> Self {
        self.max_value = Some(max);
        self
    }

    /// Inclusive numeric bounds
    pub const fn value(self, min: i64, max: i64) -> Self {
        self.min_value(min).max_value(max)
    }

    pub const fn input(mut self, class: InputClass) -> Self {
        self.input = class;
        self
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub const fn size_bounds(&self) -> (Option<usize>, Option<usize>) {
        (self.min_size, self.max_size)
    }

    pub const fn value_bounds(&self) -> (Option<i64>, Option<i64>) {
        (self.min_value, self.max_value)
    }

    pub const fn input_class(&self) -> InputClass {
        self.input
    }

    /// True when no constraint is active
    pub fn is_inert(&self) -> bool {
        *self == Rule::new()
    }

    /// Reject bounds that no value could satisfy
    pub fn check_bounds(&self, field: &str) -> Result<(), SchemaError> {
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                return Err(SchemaError::ConflictingSize {
                    field: field.to_string(),
                    min,
                    max,
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value) {
            if min > max {
                return Err(SchemaError::ConflictingValue {
                    field: field.to_string(),
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Evaluate a read attempt; a failed read is reported as `FieldUnreadable`
    pub fn evaluate_read(&self, read: &FieldRead<'_>) -> ViolationSet {
        match read {
            Ok(value) => self.evaluate(value),
            Err(_) => Violation::FieldUnreadable.into(),
        }
    }

    /// Evaluate a value against every active constraint
    ///
    /// A required violation short-circuits: nothing else is checked and the
    /// result is exactly `RequiredViolation`. Otherwise the size, input class
    /// and value checks all run and their flags are combined.
    pub fn evaluate(&self, value: &FieldValue<'_>) -> ViolationSet {
        if self.violates_required(value) {
            return Violation::RequiredViolation.into();
        }

        let mut result = ViolationSet::VALID;
        if self.violates_size(value) {
            result |= Violation::SizeRangeViolation;
        }
        if self.violates_input_class(value) {
            result |= Violation::InputClassViolation;
        }
        if self.violates_value(value) {
            result |= Violation::ValueRangeViolation;
        }
        result
    }

    fn violates_required(&self, value: &FieldValue<'_>) -> bool {
        if !self.required {
            return false;
        }
        match value {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Scalar(_) => false,
        }
    }

    fn violates_size(&self, value: &FieldValue<'_>) -> bool {
        let FieldValue::Text(s) = value else {
            return false;
        };
        if self.min_size.is_none() && self.max_size.is_none() {
            return false;
        }
        let len = s.chars().count();
        self.max_size.is_some_and(|max| len > max) || self.min_size.is_some_and(|min| len < min)
    }

    fn violates_input_class(&self, value: &FieldValue<'_>) -> bool {
        if self.input.is_any() {
            return false;
        }
        match value.repr() {
            Some(repr) => !self.input.matches(repr),
            None => false,
        }
    }

    fn violates_value(&self, value: &FieldValue<'_>) -> bool {
        if self.min_value.is_none() && self.max_value.is_none() {
            return false;
        }
        let Some(repr) = value.repr() else {
            return false;
        };
        let repr = repr.trim();
        match Decimal::from_str(repr) {
            Ok(number) => {
                self.max_value.is_some_and(|max| number > Decimal::from(max))
                    || self.min_value.is_some_and(|min| number < Decimal::from(min))
            }
            Err(_) => self.violates_value_wide(repr),
        }
    }

    /// Numbers `Decimal` cannot hold (huge magnitudes, exponents) are compared
    /// as floats; anything else that does not parse is out of range.
    fn violates_value_wide(&self, repr: &str) -> bool {
        if !repr.bytes().any(|b| b.is_ascii_digit()) {
            return true;
        }
        match repr.parse::<f64>() {
            Ok(number) if !number.is_nan() => {
                self.max_value.is_some_and(|max| number > max as f64)
                    || self.min_value.is_some_and(|min| number < min as f64)
            }
            _ => true,
        }
    }
}
