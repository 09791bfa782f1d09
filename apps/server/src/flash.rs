//! Notices that survive a redirect.
//!
//! A flow that ends in a redirect stores its notices in a `flash` cookie.
//! The next page render drains the cookie into its `messages` and clears it,
//! so each notice is shown exactly once.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use tickerwatch_core::notices::{Notice, Notices};

use crate::error::{ApiError, ApiResult};

pub const FLASH_COOKIE: &str = "flash";

const CLEAR_FLASH_COOKIE: &str = "flash=; Max-Age=0; Path=/";

/// Flash notices carried in by the current request.
#[derive(Debug, Default)]
pub struct IncomingFlash {
    notices: Vec<Notice>,
    present: bool,
}

impl IncomingFlash {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let raw = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .map(|(_, value)| value.to_string());

        let Some(raw) = raw else {
            return Self::default();
        };

        let notices = urlencoding::decode(&raw)
            .ok()
            .and_then(|json| serde_json::from_str::<Vec<Notice>>(&json).ok())
            .unwrap_or_else(|| {
                tracing::debug!("Ignoring malformed flash cookie");
                Vec::new()
            });

        Self {
            notices,
            present: true,
        }
    }

    /// Move the carried notices into a fresh per-request collection.
    pub fn take(&mut self) -> Notices {
        Notices::from(std::mem::take(&mut self.notices))
    }

    pub fn is_present(&self) -> bool {
        self.present
    }
}

impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Render a page body, clearing the flash cookie if the request carried one.
pub fn render<T: Serialize>(status: StatusCode, flash: &IncomingFlash, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    if flash.is_present() {
        response
            .headers_mut()
            .append(SET_COOKIE, HeaderValue::from_static(CLEAR_FLASH_COOKIE));
    }
    response
}

/// 303 to `location`, carrying `notices` to the next page.
pub fn redirect_with_flash(location: &str, notices: Notices) -> ApiResult<Response> {
    let notices: Vec<Notice> = notices.into_iter().collect();
    let json = serde_json::to_string(&notices)
        .map_err(|e| ApiError::Internal(format!("Failed to encode flash: {}", e)))?;
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        urlencoding::encode(&json)
    );
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::Internal(format!("Invalid flash cookie: {}", e)))?;

    let mut response = Redirect::to(location).into_response();
    response.headers_mut().append(SET_COOKIE, cookie);
    Ok(response)
}
