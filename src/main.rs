use anyhow::Context;
use clap::Parser;
use nmap_services::core::render::render;
use nmap_services::utils::{logger, validation::Validate};
use nmap_services::{CatalogEngine, CliConfig, ServicesError, TomlConfig};
use std::io::Write;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let output = match run(&config).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("❌ {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    Ok(())
}

async fn run(config: &CliConfig) -> Result<String, ServicesError> {
    let engine = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            CatalogEngine::from_config(&file_config)?
        }
        None => {
            config.validate()?;
            CatalogEngine::from_config(config)?
        }
    };

    let (catalog, resolution) = engine.load_with_source().await?;
    tracing::debug!(
        "Catalog of {} services from {} ({:?})",
        catalog.len(),
        resolution.path.display(),
        resolution.origin
    );

    let selected = config.query().apply(&catalog);
    render(&selected, config.format, !config.no_header)
}
