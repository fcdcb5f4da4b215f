//! # Storefront Shell Entry Point
//!
//! The setup lives in `lib.rs` so it can be tested; this only starts the
//! runtime and maps the outcome to an exit code.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match storefront_shell::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
