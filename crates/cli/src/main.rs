use clap::Parser;
use ferrous_cache_domain::CliOverrides;
use ferrous_cache_infrastructure::{ResponseCache, UdpCacheProxy, DESCRIPTION};
use std::sync::Arc;
use tracing::{error, info};

mod bootstrap;

#[derive(Parser)]
#[command(name = "ferrous-cache")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous Cache - Caching DNS forwarder")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (e.g. 127.0.0.1:5353)
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (e.g. 9.9.9.9:53)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Maximum number of cached responses
    #[arg(long)]
    capacity: Option<usize>,

    /// Minimum lifetime of a cached response, in seconds
    #[arg(long)]
    min_ttl: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        bind_address: cli.bind,
        upstream: cli.upstream,
        cache_capacity: cli.capacity,
        min_ttl: cli.min_ttl,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        "Starting Ferrous Cache v{} ({})",
        env!("CARGO_PKG_VERSION"),
        DESCRIPTION
    );
    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        bind = %config.server.bind_address,
        upstream = %config.server.upstream,
        "Configuration loaded"
    );

    let cache = Arc::new(ResponseCache::init(&config.cache)?);
    let proxy = Arc::new(UdpCacheProxy::bind(&config.server, Arc::clone(&cache)).await?);

    tokio::select! {
        result = proxy.run() => {
            if let Err(e) = result {
                error!(error = %e, "Proxy stopped");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    let stats = cache.stats();
    info!(
        entries = stats.entries,
        hits = stats.hits,
        misses = stats.misses,
        stale = stats.stale,
        insertions = stats.insertions,
        refreshes = stats.refreshes,
        evictions = stats.evictions,
        allocation_failures = stats.allocation_failures,
        hit_rate = %format_args!("{:.1}%", stats.hit_rate),
        "Cache statistics"
    );

    match Arc::try_unwrap(cache) {
        Ok(cache) => {
            cache.destroy();
        }
        Err(cache) => cache.clear(),
    }

    info!("Server shutdown complete");
    Ok(())
}
