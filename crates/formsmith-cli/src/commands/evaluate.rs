use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use formsmith::{Config, Evaluator, FieldReport, FormData, FormReport};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

pub fn execute(config: &Config, schema: &str, data: Option<&Path>, today: Option<&str>, json: bool) -> Result<ExitCode> {
    let schema = super::load_schema(config, schema)?;

    let issues = schema.check();
    if !issues.is_empty() {
        if config.evaluation.strict_schema {
            super::print_issues(&issues);
            bail!("Schema `{}` has {} structural issue(s)", schema.name, issues.len());
        }
        tracing::warn!(schema = %schema.id, issues = issues.len(), "evaluating schema with structural issues");
    }

    let data = match data {
        Some(path) => read_data(path)?,
        None => FormData::new(),
    };

    let mut evaluator = Evaluator::new();
    if let Some(today) = today {
        let date = NaiveDate::parse_from_str(today, "%Y-%m-%d")
            .with_context(|| format!("Invalid --today date `{}`, expected YYYY-MM-DD", today))?;
        evaluator = evaluator.with_today(date);
    }

    let report = evaluator.evaluate(&schema.fields, &data);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&schema.name, &report);
    }

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_data(path: &Path) -> Result<FormData> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read data file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse data file: {:?}", path))
}

fn print_report(name: &str, report: &FormReport) {
    println!("{}", format!("Evaluating {}", name).green().bold());
    println!();

    for field in &report.fields {
        print_field(field);
    }

    println!();
    if report.is_valid() {
        println!("{}", "Form is valid".green().bold());
    } else {
        println!(
            "{}",
            format!(
                "{} error(s) in {} field(s)",
                report.error_count(),
                report.invalid_fields().count()
            )
            .red()
            .bold()
        );
    }
}

fn print_field(field: &FieldReport) {
    let marker = if field.is_valid() { "✓".green() } else { "✗".red() };
    let value = match &field.value {
        Some(value) => value.to_string().cyan(),
        None => "(empty)".dimmed(),
    };
    let derived = if field.derived { " [derived]".dimmed().to_string() } else { String::new() };

    println!("{} {} ({}){} = {}", marker, field.label.bold(), field.id, derived, value);
    for error in &field.errors {
        println!("    {}", error.red());
    }
}
