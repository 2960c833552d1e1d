// File: src/rulebook.rs
// Purpose: Rules loaded from TOML and applied to JSON records

use crate::error::{ConfigError, SchemaError};
use crate::rule::Rule;
use crate::schema::{FieldVisitor, Validatable};
use crate::value::{FieldRead, FieldValue, ReadError};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Rule book file contents
///
/// ```toml
/// [[field]]
/// name = "UserID"
/// required = true
/// min_size = 5
/// max_size = 100
/// input = "email"
/// ```
///
/// Every key of a `[[field]]` table except `name` belongs to the [`Rule`].
#[derive(Debug, Clone, Default, Deserialize)]
struct RuleBookFile {
    #[serde(default, rename = "field")]
    fields: Vec<toml::Table>,
}

/// Named fields and their rules, in declaration order
///
/// A name declared more than once collects all of its rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBook {
    fields: Vec<(String, Vec<Rule>)>,
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a rule book from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: RuleBookFile = toml::from_str(content)?;
        let mut book = RuleBook::new();
        for (index, mut table) in file.fields.into_iter().enumerate() {
            let name = match table.remove("name") {
                Some(toml::Value::String(name)) => name,
                _ => return Err(ConfigError::MissingName { index }),
            };
            let rule: Rule = toml::Value::Table(table).try_into()?;
            rule.check_bounds(&name)
                .map_err(|source| ConfigError::InvalidRule {
                    field: name.clone(),
                    source,
                })?;
            book.add(name, rule);
        }
        debug!(fields = book.len(), "rule book parsed");
        Ok(book)
    }

    /// Load a rule book from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Add a rule to `name`, registering the field if it is new
    pub fn add(&mut self, name: impl Into<String>, rule: Rule) -> &mut Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, rules)) => rules.push(rule),
            None => self.fields.push((name, vec![rule])),
        }
        self
    }

    pub fn rules(&self, name: &str) -> Option<&[Rule]> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, rules)| rules.as_slice())
    }

    /// Number of distinct fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Pair the rule book with a JSON record so it can be validated
    pub fn bind<'a>(&'a self, record: &'a JsonValue) -> BoundRecord<'a> {
        BoundRecord { book: self, record }
    }
}

/// A [`RuleBook`] paired with the JSON record it applies to
#[derive(Debug, Clone, Copy)]
pub struct BoundRecord<'a> {
    book: &'a RuleBook,
    record: &'a JsonValue,
}

impl Validatable for BoundRecord<'_> {
    fn visit_fields(&self, visitor: &mut dyn FieldVisitor) -> Result<(), SchemaError> {
        let JsonValue::Object(map) = self.record else {
            return Err(SchemaError::NotAnObject {
                found: json_kind(self.record),
            });
        };
        for (name, rules) in &self.book.fields {
            visitor.visit(name, rules, read_json(map.get(name)))?;
        }
        Ok(())
    }
}

/// Missing keys read as null; nested values cannot be read as a single field
fn read_json(value: Option<&JsonValue>) -> FieldRead<'_> {
    match value {
        None | Some(JsonValue::Null) => Ok(FieldValue::Null),
        Some(JsonValue::String(s)) => Ok(FieldValue::Text(Cow::Borrowed(s.as_str()))),
        Some(JsonValue::Number(n)) => Ok(FieldValue::scalar(n)),
        Some(JsonValue::Bool(b)) => Ok(FieldValue::scalar(b)),
        Some(other) => Err(ReadError::new(format!(
            "{} values cannot be validated as a field",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::validate;
    use crate::input_class::InputClass;
    use crate::violation::Violation;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const USERS: &str = r#"
[[field]]
name = "UserID"
required = true
min_size = 5
max_size = 100
input = "email"

[[field]]
name = "UserName"
required = true
min_size = 1
max_size = 8

[[field]]
name = "UserCountry"
min_size = 5
max_size = 100
input = "alphanumeric"
"#;

    #[test]
    fn test_parse_rule_book() {
        let book = RuleBook::from_toml_str(USERS).unwrap();
        assert_eq!(book.len(), 3);
        assert_eq!(
            book.rules("UserID"),
            Some(&[Rule::new().required().size(5, 100).input(InputClass::Email)][..])
        );
        assert_eq!(book.rules("Missing"), None);
    }

    #[test]
    fn test_repeated_names_collect_rules() {
        let book = RuleBook::from_toml_str(
            r#"
[[field]]
name = "code"
max_size = 4

[[field]]
name = "code"
input = "numeric"
"#,
        )
        .unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.rules("code").map(<[Rule]>::len), Some(2));
    }

    #[test]
    fn test_rejects_unknown_keys_and_classes() {
        assert!(matches!(
            RuleBook::from_toml_str("[[field]]\nname = \"a\"\nmaxsize = 3\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RuleBook::from_toml_str("[[field]]\nname = \"a\"\ninput = \"phone\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_input_class_names_ignore_case() {
        let book = RuleBook::from_toml_str(
            "[[field]]\nname = \"a\"\ninput = \"Email\"\n\n[[field]]\nname = \"b\"\ninput = \"NUMERIC\"\n",
        )
        .unwrap();
        assert_eq!(book.rules("a"), Some(&[Rule::new().input(InputClass::Email)][..]));
        assert_eq!(book.rules("b"), Some(&[Rule::new().input(InputClass::Numeric)][..]));

        let record = json!({ "a": "x", "b": "12" });
        let report = validate(&book.bind(&record)).unwrap();
        assert_eq!(report.names("a"), Some(vec!["InputClassViolation"]));
        assert_eq!(report.names("b"), None);
    }

    #[test]
    fn test_entry_without_name() {
        let err = RuleBook::from_toml_str("[[field]]\nname = \"a\"\n\n[[field]]\nrequired = true\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingName { index: 1 }));
    }

    #[test]
    fn test_rejects_conflicting_bounds() {
        let err = RuleBook::from_toml_str("[[field]]\nname = \"a\"\nmin_value = 9\nmax_value = 1\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRule { ref field, .. } if field == "a"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleBook::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_validate_record() {
        let book = RuleBook::from_toml_str(USERS).unwrap();
        let record = json!({
            "UserName": "Jefersons-123",
            "UserID": "fulano[at]site.com",
            "UserCountry": null
        });

        let report = validate(&book.bind(&record)).unwrap();
        assert_eq!(
            report.lines().collect::<Vec<_>>(),
            vec!["UserID InputClassViolation", "UserName SizeRangeViolation"]
        );
    }

    #[test]
    fn test_record_values() {
        let mut book = RuleBook::new();
        book.add("age", Rule::new().value(18, 120))
            .add("tags", Rule::new())
            .add("active", Rule::new().input(InputClass::Alphabetic))
            .add("absent", Rule::new().required());
        let record = json!({ "age": 121, "tags": ["a"], "active": true });

        let report = validate(&book.bind(&record)).unwrap();
        assert_eq!(report.violations("age"), Some(vec![Violation::ValueRangeViolation]));
        assert_eq!(report.violations("tags"), Some(vec![Violation::FieldUnreadable]));
        assert_eq!(report.violations("active"), None);
        assert_eq!(report.violations("absent"), Some(vec![Violation::RequiredViolation]));
    }

    #[test]
    fn test_record_must_be_an_object() {
        let book = RuleBook::from_toml_str(USERS).unwrap();
        let err = validate(&book.bind(&json!([1, 2]))).unwrap_err();
        assert_eq!(err, SchemaError::NotAnObject { found: "an array" });
    }
}
