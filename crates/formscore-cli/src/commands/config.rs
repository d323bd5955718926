//! Configuration management.

use clap::{Args, Subcommand};

use formscore_core::error::AppError;

use super::load_config;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Load and validate the configuration for the selected environment
    Check,
}

pub async fn execute(args: &ConfigArgs, env: &str) -> Result<(), AppError> {
    match &args.command {
        ConfigCommands::Check => {
            let config = load_config(env)?;
            config.validate()?;

            println!("Configuration OK ({})", config.environment);
            println!("  auth.access_token_ttl_hours  = {}", config.auth.access_token_ttl_hours);
            println!("  auth.refresh_token_ttl_days  = {}", config.auth.refresh_token_ttl_days);
            println!("  auth.password_work_factor    = {}", config.auth.password_work_factor);
            println!("  auth.min_password_length     = {}", config.auth.min_password_length);
            println!("  auth.max_failed_logins       = {}", config.auth.max_failed_logins);
            println!("  auth.lockout_duration_minutes = {}", config.auth.lockout_duration_minutes);
            println!("  auth.token_signing_secret    = <redacted>");
            println!("  logging.level                = {}", config.logging.level);
            println!("  logging.format               = {}", config.logging.format);
        }
    }

    Ok(())
}
