//! Password hashing utilities.

use clap::{Args, Subcommand};
use dialoguer::Password;

use formscore_auth::PasswordHasher;
use formscore_core::error::AppError;

use super::load_config;

#[derive(Debug, Args)]
pub struct PasswordArgs {
    #[command(subcommand)]
    pub command: PasswordCommands,
}

#[derive(Debug, Subcommand)]
pub enum PasswordCommands {
    /// Hash a password at the configured work factor
    Hash,
    /// Verify a password against a stored hash
    Verify {
        /// The stored bcrypt hash
        #[arg(long)]
        hash: String,
    },
}

fn prompt(confirm: bool) -> Result<String, AppError> {
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt
        .interact()
        .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))
}

pub async fn execute(args: &PasswordArgs, env: &str) -> Result<(), AppError> {
    let config = load_config(env)?;
    let hasher = PasswordHasher::new(&config.auth);

    match &args.command {
        PasswordCommands::Hash => {
            let password = prompt(true)?;
            let hash = hasher.hash_password(&password)?;
            println!("{hash}");
        }
        PasswordCommands::Verify { hash } => {
            let password = prompt(false)?;
            if hasher.verify_password(&password, hash) {
                println!("Password matches.");
                if hasher.needs_rehash(hash) {
                    println!("Note: hash is below the configured work factor and should be re-hashed.");
                }
            } else {
                println!("Password does NOT match.");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
