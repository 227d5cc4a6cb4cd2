use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plexdeck")]
#[command(author, version, about = "Household web front end for a Plex Media Server")]
pub struct Cli {
    /// Path to config file (JSON)
    #[arg(short, long, global = true, env = "PLEXDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Start {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Media server base URL
        #[arg(long, env = "PLEX_URL")]
        plex_url: Option<String>,

        /// Media server admin token
        #[arg(long, env = "PLEX_TOKEN", hide_env_values = true)]
        plex_token: Option<String>,

        /// Secret used to sign session cookies
        #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
        secret_key: Option<String>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,

    /// Generate a random secret for signing session cookies
    GenerateSecret,
}
