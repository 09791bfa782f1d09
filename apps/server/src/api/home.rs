use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
    Form, Router,
};
use tickerwatch_core::notices::Notices;
use tickerwatch_core::quotes::QuoteLookup;

use crate::{
    flash::{render, IncomingFlash},
    main_lib::AppState,
    models::{messages, AboutPage, HomePage, PriceBarView, TickerForm},
};

const ABOUT_TITLE: &str = "About Tickerwatch";
const ABOUT_DESCRIPTION: &str = "Look up the last five trading days of any ticker, \
and keep a watchlist of the symbols you follow.";

fn home_page(lookup: QuoteLookup, notices: Notices) -> (StatusCode, HomePage) {
    let messages = messages(notices);
    match lookup {
        QuoteLookup::Prompt { ticker_message } => (
            StatusCode::OK,
            HomePage {
                ticker_message: Some(ticker_message),
                messages,
                ..Default::default()
            },
        ),
        QuoteLookup::EmptyTicker => (
            StatusCode::BAD_REQUEST,
            HomePage {
                messages,
                ..Default::default()
            },
        ),
        QuoteLookup::Failed { ticker, error } => (
            StatusCode::OK,
            HomePage {
                ticker: Some(ticker),
                error: Some(error),
                messages,
                ..Default::default()
            },
        ),
        QuoteLookup::Found { ticker, quote } => (
            StatusCode::OK,
            HomePage {
                ticker: Some(ticker),
                company_name: Some(quote.company_name),
                data: Some(quote.data.into_iter().map(PriceBarView::from).collect()),
                messages,
                ..Default::default()
            },
        ),
    }
}

#[utoipa::path(get, path = "/", responses((status = 200, body = HomePage)))]
pub async fn show_home(State(state): State<Arc<AppState>>, mut flash: IncomingFlash) -> Response {
    let notices = flash.take();
    let (status, page) = home_page(state.quote_service.prompt(), notices);
    render(status, &flash, page)
}

#[utoipa::path(
    post,
    path = "/",
    request_body(content_type = "application/x-www-form-urlencoded", content = String),
    responses(
        (status = 200, body = HomePage, description = "Lookup completed or failed inline"),
        (status = 400, body = HomePage, description = "Empty ticker")
    )
)]
pub async fn lookup_ticker(
    State(state): State<Arc<AppState>>,
    mut flash: IncomingFlash,
    Form(form): Form<TickerForm>,
) -> Response {
    let mut notices = flash.take();
    let lookup = state
        .quote_service
        .lookup(form.ticker.as_deref(), &mut notices)
        .await;
    let (status, page) = home_page(lookup, notices);
    render(status, &flash, page)
}

#[utoipa::path(get, path = "/about", responses((status = 200, body = AboutPage)))]
pub async fn show_about(mut flash: IncomingFlash) -> Response {
    let page = AboutPage {
        title: ABOUT_TITLE.to_string(),
        description: ABOUT_DESCRIPTION.to_string(),
        messages: messages(flash.take()),
    };
    render(StatusCode::OK, &flash, page)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(show_home).post(lookup_ticker))
        .route("/about", get(show_about))
}
