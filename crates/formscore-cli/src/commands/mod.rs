//! CLI command definitions and dispatch.

pub mod config;
pub mod password;
pub mod token;

use clap::{Parser, Subcommand};

use formscore_core::config::AppConfig;
use formscore_core::error::AppError;

/// FormScore — auth administration and diagnostics
#[derive(Debug, Parser)]
#[command(name = "formscore", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (selects config/{env}.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Password hashing utilities
    Password(password::PasswordArgs),
    /// Token diagnostics
    Token(token::TokenArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Password(args) => password::execute(args, &self.env).await,
            Commands::Token(args) => token::execute(args).await,
            Commands::Config(args) => config::execute(args, &self.env).await,
        }
    }
}

/// Helper: load configuration for the selected environment
pub fn load_config(env: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(env).map_err(|e| AppError::configuration(format!("Failed to load config: {e}")))
}
