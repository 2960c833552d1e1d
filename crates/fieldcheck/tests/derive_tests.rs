// Integration tests for #[derive(Validate)] and the engine

use fieldcheck::{
    validate, Engine, FieldOutcome, Rule, Schema, SchemaError, Validate, Violation,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[derive(Debug, Clone, Validate)]
struct Users {
    #[validate(rename = "UserID", required, size(min = 5, max = 100), input = "email")]
    user_id: Option<String>,

    #[validate(rename = "UserName", required, size(min = 1, max = 8), input = "any")]
    user_name: Option<String>,

    #[validate(rename = "UserCountry", size(min = 5, max = 100), input = "alphanumeric")]
    user_country: Option<String>,

    // No rule: never appears in a report
    #[allow(dead_code)]
    nickname: Option<String>,
}

fn demo_users() -> Users {
    Users {
        user_id: Some("fulano[at]site.com".to_string()),
        user_name: Some("Jefersons-123".to_string()),
        user_country: None,
        nickname: Some(String::new()),
    }
}

#[test]
fn test_demo_users_report() {
    let report = validate(&demo_users()).unwrap();

    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        vec!["UserID InputClassViolation", "UserName SizeRangeViolation"]
    );
    assert_eq!(
        report.violations("UserID"),
        Some(vec![Violation::InputClassViolation])
    );
    assert_eq!(
        report.violations("UserName"),
        Some(vec![Violation::SizeRangeViolation])
    );
}

#[test]
fn test_optional_absent_field_has_no_entry() {
    let report = validate(&demo_users()).unwrap();

    assert!(!report.contains("UserCountry"));
    assert_eq!(report.outcome("UserCountry"), FieldOutcome::Clean);
    assert_eq!(report.outcome("nickname"), FieldOutcome::Unchecked);
}

#[test]
fn test_valid_users() {
    let users = Users {
        user_id: Some("fulano@site.com".to_string()),
        user_name: Some("Jeferson".to_string()),
        user_country: Some("Brazil".to_string()),
        nickname: None,
    };

    let report = validate(&users).unwrap();
    assert!(report.is_valid());
    assert_eq!(report.to_string(), "");
}

#[test]
fn test_required_short_circuits_other_checks() {
    let users = Users {
        user_id: Some(String::new()),
        user_name: None,
        ..demo_users()
    };

    let report = validate(&users).unwrap();
    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        vec!["UserID RequiredViolation", "UserName RequiredViolation"]
    );
}

#[test]
fn test_two_engines_give_identical_reports() {
    let users = demo_users();

    let mut first = Engine::new();
    let mut second = Engine::new();
    first.validate(&users).unwrap();
    second.validate(&users).unwrap();

    assert_eq!(first.report(), second.report());
}

#[test]
fn test_engine_reuse_does_not_accumulate() {
    let mut engine = Engine::new();
    for _ in 0..3 {
        engine.validate(&demo_users()).unwrap();
    }
    assert_eq!(engine.report().len(), 2);
}

#[derive(Validate)]
struct Window {
    #[validate(size(min = 5, max = 10))]
    label: Option<String>,
}

#[rstest]
#[case::too_short(Some("abc"), Some(vec![Violation::SizeRangeViolation]))]
#[case::lower_bound(Some("abcde"), None)]
#[case::upper_bound(Some("abcdefghij"), None)]
#[case::too_long(Some("abcdefghijk"), Some(vec![Violation::SizeRangeViolation]))]
#[case::absent(None, None)]
fn test_size_window(#[case] label: Option<&str>, #[case] expected: Option<Vec<Violation>>) {
    let window = Window {
        label: label.map(str::to_string),
    };
    let report = validate(&window).unwrap();
    assert_eq!(report.violations("label"), expected);
}

#[derive(Validate)]
struct Reading {
    #[validate(value(min = -10, max = 40))]
    celsius: i32,

    #[validate(min_value = 0, max_value = 100)]
    percent: String,
}

#[rstest]
#[case(-10, "0", None, None)]
#[case(40, "100", None, None)]
#[case(-11, "50", Some(vec![Violation::ValueRangeViolation]), None)]
#[case(41, "101", Some(vec![Violation::ValueRangeViolation]), Some(vec![Violation::ValueRangeViolation]))]
#[case(20, "half", None, Some(vec![Violation::ValueRangeViolation]))]
#[case(20, "99.5", None, None)]
fn test_value_window(
    #[case] celsius: i32,
    #[case] percent: &str,
    #[case] celsius_expected: Option<Vec<Violation>>,
    #[case] percent_expected: Option<Vec<Violation>>,
) {
    let reading = Reading {
        celsius,
        percent: percent.to_string(),
    };
    let report = validate(&reading).unwrap();
    assert_eq!(report.violations("celsius"), celsius_expected);
    assert_eq!(report.violations("percent"), percent_expected);
}

#[derive(Validate)]
struct Code {
    #[validate(max_size = 4, input = "numeric")]
    pin: String,
}

#[rstest]
#[case("1234", vec![])]
#[case("12345", vec!["SizeRangeViolation"])]
#[case("12a4", vec!["InputClassViolation"])]
#[case("abcdef", vec!["SizeRangeViolation", "InputClassViolation"])]
#[case("", vec!["InputClassViolation"])]
fn test_size_and_class_combine(#[case] pin: &str, #[case] expected: Vec<&str>) {
    let report = validate(&Code {
        pin: pin.to_string(),
    })
    .unwrap();
    assert_eq!(report.names("pin").unwrap_or_default(), expected);
}

#[derive(Validate)]
struct Inert {
    #[validate]
    anything: Option<String>,

    #[validate()]
    count: i64,
}

#[rstest]
#[case(None, 0)]
#[case(Some(""), -1)]
#[case(Some("not empty at all"), i64::MAX)]
fn test_inert_rules_always_pass(#[case] anything: Option<&str>, #[case] count: i64) {
    let inert = Inert {
        anything: anything.map(str::to_string),
        count,
    };
    let report = validate(&inert).unwrap();
    assert!(report.is_valid());
    assert_eq!(report.outcome("anything"), FieldOutcome::Clean);
    assert_eq!(report.outcome("count"), FieldOutcome::Clean);
}

#[derive(Validate)]
struct Stacked {
    // Each attribute is its own rule; flags from both are combined
    #[validate(min_size = 6)]
    #[validate(input = "alphabetic")]
    token: String,
}

#[test]
fn test_multiple_rules_on_one_field() {
    let report = validate(&Stacked {
        token: "ab1".to_string(),
    })
    .unwrap();
    assert_eq!(
        report.violations("token"),
        Some(vec![
            Violation::SizeRangeViolation,
            Violation::InputClassViolation
        ])
    );
}

#[derive(Validate)]
struct Audit {
    #[validate(rename = "CreatedBy", required)]
    created_by: Option<String>,
}

#[derive(Validate)]
struct Order {
    #[validate(rename = "OrderID", required, input = "numeric")]
    order_id: String,

    #[validate(flatten)]
    audit: Audit,

    #[validate(rename = "Homepage", input = "url")]
    homepage: Option<String>,
}

#[test]
fn test_flattened_fields_keep_declaration_order() {
    let order = Order {
        order_id: "A-1".to_string(),
        audit: Audit { created_by: None },
        homepage: Some("ftp://example.com".to_string()),
    };

    let report = validate(&order).unwrap();
    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        vec![
            "OrderID InputClassViolation",
            "CreatedBy RequiredViolation",
            "Homepage InputClassViolation",
        ]
    );
}

fn shipping_weight(parcel: &Parcel) -> Result<u32, String> {
    parcel
        .grams
        .map(|g| g / 1000)
        .ok_or_else(|| "scale offline".to_string())
}

#[derive(Validate)]
struct Parcel {
    #[validate(rename = "Weight", required, max_value = 30, read_with = "shipping_weight")]
    grams: Option<u32>,

    #[validate(rename = "Tracking", required)]
    tracking: Option<String>,
}

#[test]
fn test_read_with_failure_is_unreadable() {
    let parcel = Parcel {
        grams: None,
        tracking: None,
    };

    let report = validate(&parcel).unwrap();
    assert_eq!(
        report.violations("Weight"),
        Some(vec![Violation::FieldUnreadable])
    );
    assert_eq!(
        report.violations("Tracking"),
        Some(vec![Violation::RequiredViolation])
    );
}

#[test]
fn test_read_with_value_is_checked() {
    let heavy = Parcel {
        grams: Some(31_000),
        tracking: Some("T1".to_string()),
    };
    let light = Parcel {
        grams: Some(2_500),
        tracking: Some("T2".to_string()),
    };

    assert_eq!(
        validate(&heavy).unwrap().names("Weight"),
        Some(vec!["ValueRangeViolation"])
    );
    assert!(validate(&light).unwrap().is_valid());
}

#[derive(Validate)]
struct Borrowed<'a> {
    #[validate(required, input = "alphabetic")]
    name: &'a str,
}

#[test]
fn test_derive_on_borrowing_struct() {
    let report = validate(&Borrowed { name: "Ana Maria" }).unwrap();
    assert!(report.is_valid());

    let report = validate(&Borrowed { name: "R2D2" }).unwrap();
    assert_eq!(report.names("name"), Some(vec!["InputClassViolation"]));
}

#[test]
fn test_report_serializes_in_order() {
    let report = validate(&Users {
        user_id: None,
        ..demo_users()
    })
    .unwrap();

    // Field order, not alphabetical order
    assert_eq!(
        serde_json::to_string(&report).unwrap(),
        r#"{"UserID":["RequiredViolation"],"UserName":["SizeRangeViolation"]}"#
    );

    let reversed = Schema::new()
        .field("Zeta", Rule::new().required(), |u: &Users| &u.user_country)
        .field("Alpha", Rule::new().required(), |u: &Users| &u.user_id);
    let report = validate(&reversed.bind(&Users {
        user_id: None,
        ..demo_users()
    }))
    .unwrap();
    assert_eq!(
        serde_json::to_string(&report).unwrap(),
        r#"{"Zeta":["RequiredViolation"],"Alpha":["RequiredViolation"]}"#
    );
}

#[test]
fn test_schema_error_clears_previous_report() {
    let mut engine = Engine::new();
    engine.validate(&demo_users()).unwrap();

    let book = fieldcheck::RuleBook::new();
    let err = engine
        .validate(&book.bind(&serde_json::json!("not a record")))
        .unwrap_err();

    assert_eq!(err, SchemaError::NotAnObject { found: "a string" });
    assert!(engine.report().is_empty());
}
