mod cli;

use ratingforge::{
    config, logging,
    rating::{RatingFactory, RatingRegistry},
    Item,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use tokio_util::sync::CancellationToken;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    match cli.command {
        Commands::Rate {
            title,
            year,
            item_type,
            id,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(rate(
                Item::new(id, title, year, item_type),
                cli.config.as_deref(),
            ))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("ratingforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn rate(item: Item, config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    if !config.any_provider_enabled() {
        tracing::warn!("No rating provider is enabled; nothing to do");
    }

    let registry = RatingRegistry::from_factory(&RatingFactory::new(config))
        .context("Failed to build rating providers")?;

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted; canceling rating requests");
            ctrl_c_cancel.cancel();
        }
    });

    tracing::info!(
        title = %item.title,
        year = item.year,
        item_type = %item.item_type,
        providers = registry.available().len(),
        "Rating item"
    );

    let ratings = registry
        .ratings_for(&cancel, &item)
        .await
        .with_context(|| format!("Failed to rate {:?}", item.title))?;

    if ratings.is_empty() {
        tracing::info!(title = %item.title, "No ratings found");
    }

    println!("{}", serde_json::to_string_pretty(&ratings)?);
    Ok(())
}

fn validate_config(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Configuration is valid!");
    println!("  TMDB: {}", enabled_label(config.tmdb.enabled));
    println!(
        "  Rotten Tomatoes: {}",
        enabled_label(config.rotten_tomatoes.enabled)
    );
    println!("  IMDB: {}", enabled_label(config.imdb.enabled));
    println!(
        "  HTTP: timeout {}s, {} retries",
        config.http.timeout_secs, config.http.max_retries
    );
    if !config.logger.log_file_path.as_os_str().is_empty() {
        println!("  Trace log: {}", config.logger.log_file_path.display());
    }

    Ok(())
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
