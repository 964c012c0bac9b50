use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use savedweekly::{cli, config, error, logging, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web server
    Serve,

    /// Authorize with Spotify from the terminal
    Auth,

    /// Forget the token saved by `auth`
    Logout,

    /// Copy Discover Weekly into Saved Weekly
    Sync,

    /// List your playlists
    Playlists(PlaylistsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistsOptions {
    /// Only show playlists whose name contains this text
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        generate(opt.shell, &mut cmd, env!("CARGO_PKG_NAME"), &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    match cli.command {
        Command::Serve => {
            logging::init_tracing("savedweekly=info");
            cli::serve(config).await
        }
        Command::Auth => {
            logging::init_tracing("savedweekly=warn");
            cli::auth(&config).await
        }
        Command::Logout => cli::logout(&config).await,
        Command::Sync => {
            logging::init_tracing("savedweekly=warn");
            cli::sync(&config).await
        }
        Command::Playlists(opt) => {
            logging::init_tracing("savedweekly=warn");
            cli::list_playlists(&config, opt.search).await
        }
        Command::Completions(_) => {}
    }
}
