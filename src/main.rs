mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use pd_core::config::Config;
use std::path::Path;

/// Overrides taken from CLI flags and the environment.
struct StartOverrides {
    host: Option<String>,
    port: Option<u16>,
    plex_url: Option<String>,
    plex_token: Option<String>,
    secret_key: Option<String>,
}

impl StartOverrides {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.plex_url {
            config.plex.url = url;
        }
        if let Some(token) = self.plex_token {
            config.plex.token = token;
        }
        if let Some(secret) = self.secret_key {
            config.session.secret = secret;
        }
    }
}

async fn start_server(overrides: StartOverrides, config_path: Option<&Path>) -> Result<()> {
    let mut config = Config::load_or_default(config_path);
    overrides.apply(&mut config);

    tracing::info!("Starting plexdeck");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    pd_server::start(config).await?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise use defaults based on the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "plexdeck=trace,pd_server=trace,pd_plex=debug,pd_core=debug,tower_http=debug".to_string()
        } else {
            "plexdeck=info,pd_server=info,pd_plex=info,pd_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start {
            host,
            port,
            plex_url,
            plex_token,
            secret_key,
        } => {
            let overrides = StartOverrides {
                host,
                port,
                plex_url,
                plex_token,
                secret_key,
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(overrides, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("plexdeck {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::GenerateSecret => {
            println!("{}", pd_server::session::generate_secret());
            Ok(())
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("failed to read {}", p.display()))?;
            let config = Config::from_json(&contents)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Plex URL: {}", config.plex.url);
    println!("  Connectivity probe: {}", config.connectivity.url);

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("  No warnings");
    } else {
        println!("  Warnings:");
        for warning in warnings {
            println!("    - {warning}");
        }
    }

    Ok(())
}
