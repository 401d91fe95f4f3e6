use anyhow::{bail, Result};
use colored::Colorize;
use formsmith::{Config, FormSchema};
use std::process::ExitCode;

use crate::SchemaCommands;

pub fn execute(config: &Config, command: SchemaCommands) -> Result<ExitCode> {
    let mut store = super::open_store(config)?;

    match command {
        SchemaCommands::List => {
            if store.is_empty() {
                println!("No saved schemas in {:?}", store.path());
                return Ok(ExitCode::SUCCESS);
            }

            println!("{}", format!("Saved schemas ({})", store.len()).green().bold());
            println!();
            for schema in store.list() {
                println!(
                    "  {}  {}  {} field(s), created {}",
                    schema.id.cyan(),
                    schema.name.as_ref().bold(),
                    schema.fields.len(),
                    schema.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        SchemaCommands::Show { id, json } => {
            let Some(schema) = store.get(&id) else {
                bail!("No saved schema with id `{}`", id);
            };

            if json {
                println!("{}", serde_json::to_string_pretty(schema)?);
            } else {
                print_schema(schema);
            }
        }
        SchemaCommands::Import { file, replace } => {
            let schema = super::read_schema_file(&file)?;
            let (id, name) = (schema.id.clone(), schema.name.to_string());

            let issues = schema.check();
            if !issues.is_empty() {
                println!("{}", "Schema has structural issues:".yellow());
                super::print_issues(&issues);
                if config.evaluation.strict_schema {
                    bail!("Refusing to import `{}`", name);
                }
            }

            if replace && store.get(&id).is_some() {
                store.update(schema)?;
            } else {
                store.add(schema)?;
            }
            store.save()?;

            println!("{} {} ({})", "Saved".green().bold(), name, id.cyan());
        }
        SchemaCommands::Delete { id } => {
            if !store.delete(&id) {
                bail!("No saved schema with id `{}`", id);
            }
            store.save()?;

            println!("{} {}", "Deleted".green().bold(), id.cyan());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_schema(schema: &FormSchema) {
    println!("{}", schema.name.as_ref().green().bold());
    println!("Id: {}", schema.id.cyan());
    println!("Created: {}", schema.created_at.to_rfc3339());
    println!();

    for field in schema.ordered_fields() {
        let required = if field.required { " *".red().to_string() } else { String::new() };
        println!("  {:>3}. {}{} ({}, {})", field.order, field.label.bold(), required, field.id, field.field_type);

        if field.computes_value() {
            println!("       = {}({})", field.formula.cyan(), field.parent_fields.join(", "));
        }
        if !field.options.is_empty() {
            println!("       options: {}", field.options.join(", "));
        }
        for rule in &field.validation_rules {
            println!("       rule: {}", rule.kind.type_name());
        }
    }

    println!();
    let counts: Vec<String> = schema
        .field_type_counts()
        .into_iter()
        .map(|(field_type, count)| format!("{} {}", count, field_type.label()))
        .collect();
    println!("Fields: {}", counts.join(", "));
}
