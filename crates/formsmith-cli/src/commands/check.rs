use anyhow::Result;
use colored::Colorize;
use formsmith::Config;
use std::process::ExitCode;

pub fn execute(config: &Config, schema: &str) -> Result<ExitCode> {
    let schema = super::load_schema(config, schema)?;
    let issues = schema.check();

    if issues.is_empty() {
        println!("{} {} has no structural issues", "✓".green(), schema.name.as_ref().bold());
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {} has {} issue(s):", "✗".red(), schema.name.as_ref().bold(), issues.len());
    super::print_issues(&issues);
    Ok(ExitCode::FAILURE)
}
