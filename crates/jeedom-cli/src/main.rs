//! Jeedom CLI - Command-line tool for the Jeedom HTTP API
//!
//! Runs scenarios and commands, posts messages and browses the object tree
//! of a Jeedom box.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jeedom_client::{ConfigOverrides, JeedomClient, ScenarioAction};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "jeedom-cli")]
#[command(author, version, about = "Jeedom home-automation CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Server URL (e.g. http://192.168.1.10)
    #[arg(short, long, env = "JEEDOM_URL")]
    url: Option<String>,

    /// API key
    #[arg(short = 'k', long, env = "JEEDOM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "JEEDOM_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start, stop, activate or deactivate a scenario
    Scenario {
        /// Scenario ID
        id: u64,

        /// Action: start, stop, activate, deactivate
        action: ScenarioAction,

        /// Tags passed to a started scenario (e.g. "foo=1 bar=2")
        #[arg(long)]
        tags: Option<String>,
    },

    /// Execute a command
    Cmd {
        /// Command ID
        id: u64,
    },

    /// Push a message to the message center
    Message {
        /// Message category
        category: String,

        /// Message text
        message: String,
    },

    /// List all objects
    Objects,

    /// List the equipment of an object
    Equipment {
        /// Object ID
        object_id: u64,
    },

    /// List the commands of an equipment
    Commands {
        /// Equipment ID
        equipment_id: u64,
    },

    /// Dump the full object/equipment/command tree
    FullData,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(
        cli.url.as_deref(),
        cli.api_key.as_deref(),
        cli.output.map(|o| o.as_str()),
        cli.no_color,
    );
    let format = OutputFormat::from_str(&merged.output, true)
        .map_err(|e| anyhow::anyhow!("Invalid output format '{}': {}", merged.output, e))?;

    // Create output context
    let ctx = OutputContext::new(format, merged.no_color, cli.quiet);
    let client = create_client(merged.client)?;

    // Execute command
    match &cli.command {
        Commands::Scenario { id, action, tags } => {
            commands::scenario(&client, *id, *action, tags.as_deref(), &ctx).await?;
        }

        Commands::Cmd { id } => {
            commands::cmd(&client, *id, &ctx).await?;
        }

        Commands::Message { category, message } => {
            commands::message(&client, category, message, &ctx).await?;
        }

        Commands::Objects => {
            commands::objects(&client, &ctx).await?;
        }

        Commands::Equipment { object_id } => {
            commands::equipment(&client, *object_id, &ctx).await?;
        }

        Commands::Commands { equipment_id } => {
            commands::commands(&client, *equipment_id, &ctx).await?;
        }

        Commands::FullData => {
            commands::full_data(&client, &ctx).await?;
        }
    }

    Ok(())
}

/// Create a Jeedom client from the merged configuration
fn create_client(overrides: ConfigOverrides) -> Result<JeedomClient> {
    if overrides.base_url.is_none() {
        anyhow::bail!("No server URL: pass --url, set JEEDOM_URL or add base_url to the config file");
    }
    let client = JeedomClient::from_overrides(overrides).context("Failed to create Jeedom client")?;
    debug!("Using endpoint {}", client.endpoint()?);
    Ok(client)
}
