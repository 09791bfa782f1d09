use std::sync::Arc;

use crate::config::{Config, LogFormat};
use tickerwatch_core::{
    quotes::{CachedQuoteGateway, MarketDataGateway, QuoteGatewayTrait, QuoteService, QuoteServiceTrait},
    watchlist::{WatchlistService, WatchlistServiceTrait},
};
use tickerwatch_market_data::{MarketDataProvider, YahooProvider};
use tickerwatch_storage_sqlite::{self as db, watchlist::WatchlistRepository, DbPool};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub watchlist_service: Arc<dyn WatchlistServiceTrait>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("Tracing subscriber already installed: {}", e);
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider: Arc<dyn MarketDataProvider> = Arc::new(YahooProvider::new()?);
    build_state_with_provider(config, provider).await
}

/// Wire the application around an explicit market data provider.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn MarketDataProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let watchlist_repo = Arc::new(WatchlistRepository::new(pool.clone(), writer));

    let mut gateway: Arc<dyn QuoteGatewayTrait> = Arc::new(MarketDataGateway::new(provider));
    if let Some(ttl) = config.quote_cache_ttl {
        tracing::info!("Quote cache enabled, ttl {:?}", ttl);
        gateway = Arc::new(CachedQuoteGateway::new(gateway, ttl));
    }

    let quote_service = Arc::new(QuoteService::new(gateway.clone()));
    let watchlist_service = Arc::new(WatchlistService::new(watchlist_repo, gateway));

    Ok(Arc::new(AppState {
        quote_service,
        watchlist_service,
        pool,
    }))
}
