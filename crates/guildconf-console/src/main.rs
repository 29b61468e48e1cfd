//! Guildconf - run the configuration wizard in a terminal.
//!
//! Loads the layered configuration, wires the configured store, a directory
//! seeded from `[directory]`, and the built-in configurators, then runs one
//! wizard for the given guild reading commands from stdin.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod bootstrap;
mod surface;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use guildconf_core::{CoreConfigBlueprint, GuildId, GuildPrefixes, RegistryCatalog, UserId};
use guildconf_telemetry::{LogConfig, setup_logging};
use guildconf_wizard::{ConfigWizard, WizardOutcome, WizardRequest};
use tokio::io::BufReader;

use crate::surface::ConsoleSurface;

/// Guildconf - interactive guild configuration
#[derive(Parser)]
#[command(name = "guildconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Guild to configure
    #[arg(short, long, env = "GUILDCONF_GUILD")]
    guild: u64,

    /// Operator running the wizard
    #[arg(short, long, default_value_t = 0)]
    operator: u64,

    /// Path to a configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reply language, overriding the guild's stored language
    #[arg(short, long)]
    locale: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = guildconf_config::load(cli.config.as_deref()).context("loading configuration")?;

    let mut log_config = LogConfig::from_section(&config.logging)?;
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    if let Err(e) = setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let guild = GuildId(cli.guild);
    let store = bootstrap::build_store(&config)?;
    let directory = Arc::new(bootstrap::build_directory(&config.directory).await);
    let prefixes = GuildPrefixes::new();
    let catalog = RegistryCatalog::new(Arc::clone(&store))
        .with_blueprint(Arc::new(CoreConfigBlueprint::new(prefixes.clone())));

    let stored_locale = bootstrap::stored_locale(store.as_ref(), guild).await;
    let tr = bootstrap::translator(&[
        cli.locale.as_deref(),
        stored_locale.as_deref(),
        Some(config.wizard.default_locale.as_str()),
    ])?;

    let wizard = ConfigWizard::new(
        Arc::new(catalog),
        directory,
        bootstrap::wizard_options(&config),
    );
    let surface = ConsoleSurface::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        Duration::from_secs(config.surface.menu_timeout_secs),
    );
    let request = WizardRequest {
        guild_id: guild,
        operator_id: UserId(cli.operator),
    };

    let outcome = wizard.open(request, tr, &surface).await?;
    if let WizardOutcome::Configured { .. } = outcome
        && let Some(prefix) = prefixes.get(guild).await
    {
        println!("Command prefix for guild {guild} is now {prefix:?}");
    }
    Ok(())
}
