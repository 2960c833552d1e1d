use anyhow::{Context, Result};
use fieldcheck::{Engine, Validate};

/// Sample model with one clean field and two broken ones
#[derive(Debug, Validate)]
struct Users {
    #[validate(rename = "UserID", required, size(min = 5, max = 100), input = "email")]
    user_id: Option<String>,

    #[validate(rename = "UserName", required, size(min = 1, max = 8), input = "any")]
    user_name: Option<String>,

    #[validate(rename = "UserCountry", size(min = 5, max = 100), input = "alphanumeric")]
    user_country: Option<String>,
}

/// Returns `true` when the model passed validation
pub fn execute() -> Result<bool> {
    let users = Users {
        user_id: Some("fulano[at]site.com".to_string()),
        user_name: Some("Jefersons-123".to_string()),
        user_country: None,
    };

    let mut engine = Engine::new();
    engine
        .validate(&users)
        .context("Users model has malformed rules")?;

    for line in engine.report().lines() {
        println!("{}", line);
    }

    Ok(engine.report().is_valid())
}
