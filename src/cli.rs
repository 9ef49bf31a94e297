//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Payment Aggregator - deposit-flow orchestrator
///
/// Opens an authenticated session with the configured payment aggregator,
/// discovers the payer's eligible bank accounts, lets you pick one, submits
/// the deposit, and persists the resulting transaction record.
///
/// Examples:
///   payment-aggregator --amount 250
///   payment-aggregator --provider sansgetirsin --amount 100
///   payment-aggregator --no-listener --quiet
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Deposit amount to request from the provider
    #[arg(short, long, default_value = "100.0", value_name = "AMOUNT")]
    pub amount: f64,

    /// Aggregator to use
    ///
    /// Must match a registered provider name. Can also be set via the
    /// AGGREGATOR env var or a .env file.
    #[arg(short, long, value_name = "NAME", env = "AGGREGATOR")]
    pub provider: Option<String>,

    /// Path to the .env file to load before reading configuration
    #[arg(long, value_name = "FILE", default_value = ".env")]
    pub env_file: PathBuf,

    /// Do not start the inbound callback listener
    #[arg(long)]
    pub no_listener: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err("Amount must be a positive number".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            amount: 100.0,
            provider: Some("sansgetirsin".to_string()),
            env_file: PathBuf::from(".env"),
            no_listener: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_positive_amount() {
        let mut args = make_args();
        args.amount = 0.0;
        assert!(args.validate().is_err());

        args.amount = -5.0;
        assert!(args.validate().is_err());

        args.amount = f64::NAN;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
