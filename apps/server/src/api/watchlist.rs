use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Form, Router,
};
use tickerwatch_core::notices::Notices;
use tickerwatch_core::quotes::StockQuote;
use tickerwatch_core::watchlist::AddTickerOutcome;

use crate::{
    error::ApiResult,
    flash::{redirect_with_flash, render, IncomingFlash},
    main_lib::AppState,
    models::{
        messages, StockQuoteView, TickerForm, WatchlistEntryView, WatchlistListPage,
        WatchlistPage,
    },
};

fn watchlist_page(
    state: &AppState,
    output: Vec<StockQuote>,
    notices: Notices,
) -> ApiResult<WatchlistPage> {
    let entries = state.watchlist_service.list_entries()?;
    Ok(WatchlistPage {
        entries: entries.into_iter().map(WatchlistEntryView::from).collect(),
        output: output.into_iter().map(StockQuoteView::from).collect(),
        messages: messages(notices),
    })
}

#[utoipa::path(get, path = "/watchlist", responses((status = 200, body = WatchlistPage)))]
pub async fn show_watchlist(
    State(state): State<Arc<AppState>>,
    mut flash: IncomingFlash,
) -> ApiResult<Response> {
    let mut notices = flash.take();
    let output = state.watchlist_service.refresh(&mut notices).await?;
    let page = watchlist_page(&state, output, notices)?;
    Ok(render(StatusCode::OK, &flash, page))
}

#[utoipa::path(
    post,
    path = "/watchlist",
    request_body(content_type = "application/x-www-form-urlencoded", content = String),
    responses(
        (status = 303, description = "Added; redirects to /watchlist"),
        (status = 400, body = WatchlistPage, description = "Invalid form"),
        (status = 409, body = WatchlistPage, description = "Ticker already stored"),
        (status = 422, body = WatchlistPage, description = "Ticker rejected by the provider")
    )
)]
pub async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    mut flash: IncomingFlash,
    Form(form): Form<TickerForm>,
) -> ApiResult<Response> {
    let mut notices = flash.take();
    let output = state.watchlist_service.refresh(&mut notices).await?;

    // The redirected GET refreshes again, so only the add notices travel.
    let mut add_notices = Notices::new();
    let outcome = state
        .watchlist_service
        .add_ticker(form.ticker.as_deref(), &mut add_notices)
        .await?;

    let status = match outcome {
        AddTickerOutcome::Added(_) => return redirect_with_flash("/watchlist", add_notices),
        AddTickerOutcome::InvalidForm => StatusCode::BAD_REQUEST,
        AddTickerOutcome::Duplicate { .. } => StatusCode::CONFLICT,
        AddTickerOutcome::InvalidTicker { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };

    notices.extend(add_notices);
    let page = watchlist_page(&state, output, notices)?;
    Ok(render(status, &flash, page))
}

#[utoipa::path(
    post,
    path = "/watchlist/{id}/delete",
    params(("id" = i32, Path, description = "Watchlist entry id")),
    responses(
        (status = 303, description = "Deleted; redirects to /watchlist/list"),
        (status = 404, description = "No entry with this id")
    )
)]
pub async fn delete_from_watchlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Response> {
    let mut notices = Notices::new();
    state.watchlist_service.delete_entry(id, &mut notices).await?;
    redirect_with_flash("/watchlist/list", notices)
}

#[utoipa::path(get, path = "/watchlist/list", responses((status = 200, body = WatchlistListPage)))]
pub async fn list_watchlist(
    State(state): State<Arc<AppState>>,
    mut flash: IncomingFlash,
) -> ApiResult<Response> {
    let entries = state.watchlist_service.list_entries()?;
    let page = WatchlistListPage {
        entries: entries.into_iter().map(WatchlistEntryView::from).collect(),
        messages: messages(flash.take()),
    };
    Ok(render(StatusCode::OK, &flash, page))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/watchlist", get(show_watchlist).post(add_to_watchlist))
        .route("/watchlist/list", get(list_watchlist))
        .route("/watchlist/{id}/delete", post(delete_from_watchlist))
}
