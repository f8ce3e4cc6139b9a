//! List command implementation.

use super::CliError;
use fortress_conquest::controllers;

/// Execute the list command.
pub(crate) fn execute() -> Result<(), CliError> {
    println!("Available controllers:");
    println!();
    for entry in controllers::registry() {
        println!("  {:<10} {}", entry.name, entry.description);
    }
    Ok(())
}
