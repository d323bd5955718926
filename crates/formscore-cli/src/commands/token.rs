//! Token diagnostics.

use clap::{Args, Subcommand};

use formscore_auth::token::decode_unverified;
use formscore_core::error::AppError;

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub command: TokenCommands,
}

#[derive(Debug, Subcommand)]
pub enum TokenCommands {
    /// Decode a token payload without verifying it
    ///
    /// Diagnostics only: neither the signature nor the expiry is
    /// checked, so the output proves nothing about validity.
    Inspect {
        /// The token to decode
        token: String,
    },
}

pub async fn execute(args: &TokenArgs) -> Result<(), AppError> {
    match &args.command {
        TokenCommands::Inspect { token } => {
            let Some(claims) = decode_unverified(token) else {
                return Err(AppError::validation("Token payload could not be decoded"));
            };
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
    }

    Ok(())
}
