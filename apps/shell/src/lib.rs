//! # Storefront Shell
//!
//! An interactive terminal storefront over the DummyJSON catalog.
//!
//! ## Module Organization
//! ```text
//! storefront_shell/
//! ├── lib.rs          ◄─── You are here (startup & prompt loop)
//! ├── state.rs        ◄─── Storefront session + search debouncer
//! ├── render.rs       ◄─── Text views of the store
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing and routing
//! │   ├── catalog.rs  ◄─── Browse, search, filter, paginate
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── checkout.rs ◄─── Summary and order placement
//! │   └── session.rs  ◄─── Sign in / out
//! └── error.rs        ◄─── ApiError for commands
//! ```
//!
//! ## Prompt Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tokio::select!                                 │
//! │                                                                         │
//! │   stdin line ──► Command::parse ──► execute ──► print reply            │
//! │                                                                         │
//! │   debounced search text ──► SetSearchQuery ──► fetch ──► print grid    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use storefront_client::{ClientConfig, Debouncer, Storefront};
use storefront_core::catalog::CatalogAction;

use commands::{Command, Reply};
use error::ApiError;
use state::ShellState;

/// Runs the shell until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,storefront=debug; override with RUST_LOG           │
/// │                                                                         │
/// │  2. Load Config                                                         │
/// │     • storefront.toml + STOREFRONT_* env, defaults on failure           │
/// │                                                                         │
/// │  3. Build Storefront + search debouncer                                 │
/// │                                                                         │
/// │  4. Fetch categories and the first page together                        │
/// │                                                                         │
/// │  5. Prompt loop                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), ApiError> {
    init_tracing();

    info!("Starting storefront shell");

    let config = ClientConfig::load_or_default(None);
    let storefront = Storefront::from_config(&config)?;
    let (search, mut committed) = Debouncer::spawn(config.search_debounce());
    let state = ShellState::new(storefront, search);

    tokio::join!(
        state.storefront.load_categories(),
        state.storefront.refresh()
    );

    println!("Storefront. Type `help` for commands.\n");
    println!("{}", commands::catalog::products(&state));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt();

        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };

                if line.trim().is_empty() {
                    continue;
                }

                let reply = match Command::parse(&line) {
                    Ok(command) => commands::execute(&state, command).await,
                    Err(e) => Err(e),
                };

                match reply {
                    Ok(Reply::Text(text)) => println!("{}", text),
                    Ok(Reply::Quit) => break,
                    Err(e) => println!("{}", e),
                }
            }
            Some(search) = committed.recv() => {
                state
                    .storefront
                    .dispatch(CatalogAction::SetSearchQuery(search))
                    .await;
                println!("\n{}", commands::catalog::products(&state));
            }
        }
    }

    info!("Storefront shell stopped");
    Ok(())
}

fn prompt() {
    print!("> ");
    // A failed flush only delays the prompt.
    let _ = std::io::stdout().flush();
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they do not interleave with rendered pages.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
