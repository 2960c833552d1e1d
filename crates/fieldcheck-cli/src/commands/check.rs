use anyhow::{Context, Result};
use colored::Colorize;
use fieldcheck::{Engine, RuleBook};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::info;

/// Returns `true` when the record passed validation
pub fn execute(rules: &Path, record: &Path, json: bool) -> Result<bool> {
    let book = RuleBook::load(rules)
        .with_context(|| format!("Failed to load rule book {}", rules.display()))?;
    info!(fields = book.len(), path = %rules.display(), "rule book loaded");

    let content = read_record(record)?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse record {}", record.display()))?;

    let mut engine = Engine::new();
    engine
        .validate(&book.bind(&value))
        .context("Record cannot be validated")?;
    let report = engine.report();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("Failed to serialize report")?
        );
    } else {
        for line in report.lines() {
            println!("{}", line);
        }
        if report.is_valid() {
            eprintln!("{}", "✓ Record is valid".green().bold());
        } else {
            eprintln!(
                "{}",
                format!("✗ {} of {} fields failed", report.len(), book.len())
                    .red()
                    .bold()
            );
        }
    }

    Ok(report.is_valid())
}

fn read_record(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read record from stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read record {}", path.display()))
    }
}
