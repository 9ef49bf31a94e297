//! Operator account selection.
//!
//! Account selection is not automatable without provider-specific business
//! rules, so the decision is pushed to an external actor through this
//! capability. Tests supply a fixed index without terminal I/O.

use crate::error::SelectionError;
use crate::models::Account;
use std::io::{self, BufRead, Write};

/// Synchronous selection capability: pick one account out of the offered
/// list. Returns a 0-based index.
pub trait Selector: Send + Sync {
    fn choose(&self, accounts: &[Account]) -> Result<usize, SelectionError>;
}

/// Interactive selector: renders the account listing on stdout and reads
/// the operator's 1-based choice from stdin.
pub struct StdinSelector;

impl Selector for StdinSelector {
    fn choose(&self, accounts: &[Account]) -> Result<usize, SelectionError> {
        println!("Available bank accounts:");
        for (i, account) in accounts.iter().enumerate() {
            println!("Account #{}:", i + 1);
            if let Some(ref logo) = account.logo {
                println!("  Logo: {}", logo);
            }
            println!("  _id: {}", account.id);
            println!("  Name: {}", account.name);

            if !account.sub_accounts.is_empty() {
                println!("  Accounts:");
                for sub in &account.sub_accounts {
                    println!("    - ID: {}", sub.id);
                    for field in &sub.fields {
                        println!("      {}: {}", field.name, field.value);
                    }
                }
            }
            println!("---");
        }

        print!("Enter the account number to use: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;

        parse_choice(&input, accounts.len())
    }
}

/// Parse the operator's 1-based input against the number of offered
/// accounts. Out-of-range and non-numeric input both fail.
fn parse_choice(input: &str, max: usize) -> Result<usize, SelectionError> {
    let trimmed = input.trim();
    let chosen: usize = trimmed
        .parse()
        .map_err(|_| SelectionError::NotANumber(trimmed.to_string()))?;

    if chosen < 1 || chosen > max {
        return Err(SelectionError::OutOfRange { chosen, max });
    }
    Ok(chosen - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_valid() {
        assert_eq!(parse_choice("2\n", 3).unwrap(), 1);
        assert_eq!(parse_choice("  1  ", 3).unwrap(), 0);
        assert_eq!(parse_choice("3", 3).unwrap(), 2);
    }

    #[test]
    fn test_parse_choice_non_numeric() {
        let err = parse_choice("first\n", 3).unwrap_err();
        assert!(matches!(err, SelectionError::NotANumber(_)));

        let err = parse_choice("", 3).unwrap_err();
        assert!(matches!(err, SelectionError::NotANumber(_)));
    }

    #[test]
    fn test_parse_choice_out_of_range() {
        let err = parse_choice("0\n", 3).unwrap_err();
        assert!(matches!(err, SelectionError::OutOfRange { chosen: 0, max: 3 }));

        let err = parse_choice("4\n", 3).unwrap_err();
        assert!(matches!(err, SelectionError::OutOfRange { chosen: 4, max: 3 }));
    }
}
