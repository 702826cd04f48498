//! # TriPUS Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Parse arguments
//! 3. Load config, open the snapshot cache, build the session (`cli::run`)
//! 4. Run the subcommand, print JSON to stdout
//!
//! Errors print as `ApiError` JSON on stderr with a non-zero exit code.

use std::process::ExitCode;

use clap::Parser;
use tripus_pos::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    tripus_pos::init_tracing();

    let args = Cli::parse();
    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(code = ?err.code, "{}", err.message);
            match serde_json::to_string_pretty(&err) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}
