use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "payment-gateway")]
#[command(about = "Payment Gateway - card payment facade over an acquiring bank", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print and validate the effective configuration
    Config,
}

pub fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Validating configuration...");

    println!("Configuration:");
    println!("  Server Port: {}", config.server_port);
    println!("  Bank URL: {}", config.bank_url);
    println!("  Bank Timeout: {}s", config.bank_timeout_secs);
    println!("  Request Timeout: {}s", config.request_timeout_secs);
    println!(
        "  Supported Currencies: {}",
        config.supported_currencies.join(", ")
    );
    println!("  Log Request Body: {}", config.log_request_body);

    config.validate()?;

    tracing::info!("Configuration is valid");
    println!("✓ Configuration is valid");

    Ok(())
}
