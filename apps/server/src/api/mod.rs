//! HTTP surface: page routes, probes, and the OpenAPI document.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    error::ApiResult,
    main_lib::AppState,
    models::{
        AboutPage, HomePage, Message, PriceBarView, StockQuoteView, WatchlistEntryView,
        WatchlistListPage, WatchlistPage,
    },
};

pub mod home;
pub mod watchlist;

#[utoipa::path(get, path = "/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Ready"),
        (status = 500, description = "Database unavailable")
    )
)]
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    tickerwatch_storage_sqlite::ping(&state.pool)?;
    Ok("ok")
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        readyz,
        home::show_home,
        home::lookup_ticker,
        home::show_about,
        watchlist::show_watchlist,
        watchlist::add_to_watchlist,
        watchlist::delete_from_watchlist,
        watchlist::list_watchlist
    ),
    components(schemas(
        HomePage,
        AboutPage,
        WatchlistPage,
        WatchlistListPage,
        WatchlistEntryView,
        StockQuoteView,
        PriceBarView,
        Message
    )),
    tags((name = "tickerwatch"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any);
    }
    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new().allow_origin(origins)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    // /watchlist routes are merged below the timeout layer.
    let timed = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(home::router())
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ));

    Router::new()
        .merge(timed)
        .merge(watchlist::router())
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
}
