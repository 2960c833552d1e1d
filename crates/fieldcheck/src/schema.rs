//! Field enumeration
//!
//! A type takes part in validation by implementing [`Validatable`], which
//! hands every field that carries rules to a [`FieldVisitor`] in a fixed
//! order. There are three ways to get an implementation:
//!
//! - `#[derive(Validate)]` with `#[validate(...)]` field attributes
//! - a [`Schema`] built at runtime from accessor closures
//! - a [`RuleBook`](crate::RuleBook) bound to a JSON record

use crate::error::SchemaError;
use crate::rule::Rule;
use crate::value::{AsFieldValue, FieldRead, ReadError};
use std::borrow::Cow;
use std::fmt;

/// Receives fields as they are enumerated
pub trait FieldVisitor {
    /// Called once per field carrying at least one rule
    fn visit(
        &mut self,
        field: &str,
        rules: &[Rule],
        read: FieldRead<'_>,
    ) -> Result<(), SchemaError>;
}

/// A value whose fields can be enumerated together with their rules
///
/// Implementations must visit fields in the same order on every call.
pub trait Validatable {
    fn visit_fields(&self, visitor: &mut dyn FieldVisitor) -> Result<(), SchemaError>;
}

impl<T: Validatable + ?Sized> Validatable for &T {
    fn visit_fields(&self, visitor: &mut dyn FieldVisitor) -> Result<(), SchemaError> {
        (**self).visit_fields(visitor)
    }
}

impl<T: Validatable + ?Sized> Validatable for Box<T> {
    fn visit_fields(&self, visitor: &mut dyn FieldVisitor) -> Result<(), SchemaError> {
        (**self).visit_fields(visitor)
    }
}

type Accessor<T> = Box<dyn for<'a> Fn(&'a T) -> FieldRead<'a> + Send + Sync>;

fn boxed<T, F>(read: F) -> Accessor<T>
where
    F: for<'a> Fn(&'a T) -> FieldRead<'a> + Send + Sync + 'static,
{
    Box::new(read)
}

struct FieldBinding<T> {
    name: Cow<'static, str>,
    rules: Vec<Rule>,
    read: Accessor<T>,
}

/// Rules registered against accessors of `T`
///
/// ```rust,ignore
/// use fieldcheck::{Engine, InputClass, Rule, Schema};
///
/// struct Users { user_id: String, country: Option<String> }
///
/// let schema = Schema::new()
///     .field("UserID", Rule::new().required().input(InputClass::Email), |u: &Users| &u.user_id)
///     .field("UserCountry", Rule::new().size(5, 100), |u: &Users| &u.country);
///
/// let mut engine = Engine::new();
/// engine.validate(&schema.bind(&users))?;
/// ```
pub struct Schema<T> {
    fields: Vec<FieldBinding<T>>,
}

impl<T> Schema<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Register a rule for a plain accessor
    ///
    /// Registering the same name again adds another rule to that field.
    pub fn field<V, F>(self, name: impl Into<Cow<'static, str>>, rule: Rule, accessor: F) -> Self
    where
        V: AsFieldValue + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
    {
        self.push(
            name.into(),
            rule,
            boxed(move |item| Ok(accessor(item).as_field_value())),
        )
    }

    /// Register a rule for a fallible accessor; an `Err` becomes `FieldUnreadable`
    pub fn computed<V, E, F>(
        self,
        name: impl Into<Cow<'static, str>>,
        rule: Rule,
        accessor: F,
    ) -> Self
    where
        V: AsFieldValue,
        E: fmt::Display,
        F: Fn(&T) -> Result<V, E> + Send + Sync + 'static,
    {
        self.push(
            name.into(),
            rule,
            boxed(move |item| read_computed(accessor(item))),
        )
    }

    fn push(mut self, name: Cow<'static, str>, rule: Rule, read: Accessor<T>) -> Self {
        self.fields.push(FieldBinding {
            name,
            rules: vec![rule],
            read,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pair the schema with an instance so it can be validated
    pub fn bind<'a>(&'a self, item: &'a T) -> BoundSchema<'a, T> {
        BoundSchema { schema: self, item }
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|b| (&b.name, &b.rules)))
            .finish()
    }
}

/// A [`Schema`] paired with the instance it describes
pub struct BoundSchema<'a, T> {
    schema: &'a Schema<T>,
    item: &'a T,
}

impl<T> Validatable for BoundSchema<'_, T> {
    fn visit_fields(&self, visitor: &mut dyn FieldVisitor) -> Result<(), SchemaError> {
        for binding in &self.schema.fields {
            visitor.visit(&binding.name, &binding.rules, (binding.read)(self.item))?;
        }
        Ok(())
    }
}

/// Convert a fallible computed value into a [`FieldRead`]
///
/// Used by `#[validate(read_with = "...")]`.
pub fn read_computed<V, E>(result: Result<V, E>) -> FieldRead<'static>
where
    V: AsFieldValue,
    E: fmt::Display,
{
    match result {
        Ok(value) => Ok(value.as_field_value().into_owned()),
        Err(e) => Err(ReadError::new(e.to_string())),
    }
}

/// Read a stored field value
///
/// Used by `#[derive(Validate)]`.
pub fn read_field<V: AsFieldValue + ?Sized>(value: &V) -> FieldRead<'_> {
    Ok(value.as_field_value())
}
