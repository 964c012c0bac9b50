//! Saved Weekly
//!
//! Copies the current contents of a Spotify user's "Discover Weekly" playlist
//! into a persistent "Saved Weekly" playlist, creating the latter on first use.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the web server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loaded from environment variables and `.env`
//! - `error` - Error types of every layer
//! - `logging` - `tracing` subscriber setup
//! - `management` - Token lifecycle, credential stores, sessions and the
//!   playlist synchronizer
//! - `server` - Router and listeners
//! - `spotify` - Spotify accounts service and Web API clients
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and formatting
//!
//! # Example
//!
//! ```
//! use savedweekly::{config, management::PlaylistSynchronizer, spotify::SpotifyCatalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     let catalog = SpotifyCatalog::new(&config.api_url, "access-token");
//!     let result = PlaylistSynchronizer::new(catalog).sync_current_user().await?;
//!     println!("added {} songs", result.added_track_details.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints a status line with a blue "o" marker.
///
/// ```
/// info!("Created playlist Saved Weekly");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints the message to stderr with a red "!" marker and exits with code 1.
///
/// Evaluates to `!`, so it can stand in for a value in a `match` arm:
///
/// ```
/// let token = match tokens.ensure_valid_token().await {
///     Ok(token) => token,
///     Err(e) => error!("Please run savedweekly auth\n Error: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a status line with a yellow "!" marker. Does not exit.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
