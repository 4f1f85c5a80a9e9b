//! Hostaway MCP - exposes Hostaway listings to a calling agent over stdio.
//!
//! Credentials come from `HOSTAWAY_CLIENT_ID` / `HOSTAWAY_CLIENT_SECRET`
//! (a `.env` file is honored). Access tokens are cached under
//! `~/.hostaway-mcp/` and reused until five minutes before they expire.

mod server;
mod tools;

use std::io;

use anyhow::{bail, Result};
use hostaway_core::models::ListingsQuery;
use hostaway_core::utils::preview;
use hostaway_core::{ApiClient, Config, Credentials};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use server::Server;

/// Characters of the access token shown by `--check`
const TOKEN_PREVIEW_CHARS: usize = 20;

/// Initialize the tracing subscriber for logging.
/// Logs go to stderr; stdout carries the protocol.
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    println!("hostaway-mcp {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("USAGE:");
    println!("    hostaway-mcp            Serve tools on stdio");
    println!("    hostaway-mcp --check    Verify credentials, listings access and token caching");
    println!();
    println!("ENVIRONMENT:");
    println!("    HOSTAWAY_CLIENT_ID, HOSTAWAY_CLIENT_SECRET   API credentials (required)");
    println!("    HOSTAWAY_API_BASE_URL                        API base URL override");
    println!("    HOSTAWAY_CACHE_DIR                           Token cache directory override");
    println!("    HOSTAWAY_REQUEST_TIMEOUT_SECS                HTTP timeout (default 30)");
    println!("    RUST_LOG                                     Log filter (default warn)");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);
    match command {
        Some("--help") | Some("-h") => {
            print_usage();
            return Ok(());
        }
        Some("--version") | Some("-V") => {
            println!("hostaway-mcp {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        None | Some("--check") => {}
        Some(other) => bail!("Unknown argument: {} (see --help)", other),
    }

    let credentials = Credentials::from_env()?;
    let config = Config::load()?;
    let api = ApiClient::new(&config, credentials)?;

    if command == Some("--check") {
        return run_check(&api).await;
    }

    info!(api = %config.api_base_url, "Hostaway MCP server starting");
    eprintln!("Hostaway MCP server running on stdio");
    Server::new(api).run().await
}

/// Smoke check against the live API: token, a few listings, cached token reuse.
async fn run_check(api: &ApiClient) -> Result<()> {
    let credentials = api.tokens().credentials();
    println!("Client ID: {}", credentials.client_id());
    println!("Client Secret: {}", credentials.secret_preview());
    println!("Token cache: {}", api.tokens().store().cache_path().display());

    println!("\n[1/3] Getting access token...");
    let token = api.tokens().access_token().await?;
    println!("Access token obtained: {}", preview(&token, TOKEN_PREVIEW_CHARS));

    println!("\n[2/3] Searching for listings...");
    let listings = api.fetch_listings(&ListingsQuery::with_limit(3)).await?;
    println!("Found {} listings", listings.len());
    if let Some(first) = listings.first() {
        println!("\nFirst listing:");
        println!("- ID: {}", first.id);
        println!("- Name: {}", first.display_name());
        println!("- Location: {}", first.location().unwrap_or_else(|| "unknown".to_string()));
    }

    println!("\n[3/3] Checking token cache...");
    // The listings call may have refreshed the token after a 401
    let current = api.tokens().access_token().await?;
    let cached = api.tokens().access_token().await?;
    if cached != current {
        bail!("Second token lookup did not reuse the cached token");
    }
    println!("Token served from cache");

    println!("\nAll checks passed.");
    Ok(())
}
