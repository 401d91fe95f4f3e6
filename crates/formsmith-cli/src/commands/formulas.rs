use anyhow::Result;
use colored::Colorize;
use formsmith::formula_catalog;
use std::process::ExitCode;

pub fn execute() -> Result<ExitCode> {
    println!("{}", "Formulas for derived fields".green().bold());
    println!();

    for info in formula_catalog() {
        println!("  {:<14} {}", info.value.cyan(), info.label.bold());
        println!("  {:<14} {}", "", info.description);
    }

    println!();
    println!("Any other formula text is a template: {} is replaced by that parent's value.", "{fieldId}".cyan());

    Ok(ExitCode::SUCCESS)
}
