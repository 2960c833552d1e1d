// File: src/value.rs
// Purpose: Field values as seen by rules, and conversions from Rust types

use std::borrow::Cow;
use std::fmt;

/// The current value of a field, reduced to what rules need to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Absent value (`None`, JSON `null`, missing key)
    Null,
    /// A string-typed value. Only these are subject to emptiness and size checks.
    Text(Cow<'a, str>),
    /// Any other value, carried as its display representation
    Scalar(Cow<'a, str>),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: impl Into<Cow<'a, str>>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn scalar(value: impl fmt::Display) -> Self {
        FieldValue::Scalar(Cow::Owned(value.to_string()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// String representation used by format and value checks; `None` for null
    pub fn repr(&self) -> Option<&str> {
        match self {
            FieldValue::Null => None,
            FieldValue::Text(s) | FieldValue::Scalar(s) => Some(s),
        }
    }

    pub fn into_owned(self) -> FieldValue<'static> {
        match self {
            FieldValue::Null => FieldValue::Null,
            FieldValue::Text(s) => FieldValue::Text(Cow::Owned(s.into_owned())),
            FieldValue::Scalar(s) => FieldValue::Scalar(Cow::Owned(s.into_owned())),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }
}

impl From<String> for FieldValue<'static> {
    fn from(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }
}

/// Failure to read a field's value (a computed accessor returned an error)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ReadError {
    message: String,
}

impl ReadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of reading a field: its value, or why it could not be read
pub type FieldRead<'a> = Result<FieldValue<'a>, ReadError>;

/// Conversion of a field's Rust value into a [`FieldValue`]
///
/// Implemented for strings, primitives, references and `Option<T>`.
/// Implement it for your own types to put them under rules.
pub trait AsFieldValue {
    fn as_field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for str {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(Cow::Borrowed(self))
    }
}

impl AsFieldValue for String {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(Cow::Borrowed(self.as_str()))
    }
}

impl AsFieldValue for Cow<'_, str> {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(Cow::Borrowed(self.as_ref()))
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for &T {
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for Box<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.as_field_value(),
            None => FieldValue::Null,
        }
    }
}

macro_rules! scalar_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsFieldValue for $ty {
                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::scalar(self)
                }
            }
        )*
    };
}

scalar_field_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);
