use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tickerwatch_core::errors::{DatabaseError, Error as CoreError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                CoreError::Database(DatabaseError::NotFound(what)) => {
                    (StatusCode::NOT_FOUND, what.clone())
                }
                CoreError::Database(DatabaseError::UniqueViolation(_)) => {
                    (StatusCode::CONFLICT, e.to_string())
                }
                CoreError::MarketData(_) => (StatusCode::BAD_GATEWAY, e.to_string()),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
        };
        if status.is_server_error() {
            tracing::error!("{}", msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_uses_bare_message() {
        let err = ApiError::from(CoreError::Database(DatabaseError::NotFound(
            "Watchlist entry 7 not found".into(),
        )));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
        assert_eq!(body["message"], "Watchlist entry 7 not found");
    }

    #[tokio::test]
    async fn test_query_failure_is_internal() {
        let err = ApiError::from(CoreError::Database(DatabaseError::QueryFailed(
            "disk I/O error".into(),
        )));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 500);
    }

    #[tokio::test]
    async fn test_conflict_and_provider_statuses() {
        let err = ApiError::from(CoreError::Database(DatabaseError::UniqueViolation(
            "watchlist.ticker".into(),
        )));
        let (status, _) = body_json(err).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let err = ApiError::from(CoreError::MarketData(
            tickerwatch_market_data::MarketDataError::NoData,
        ));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body["message"],
            "Market data operation failed: No data found for the given symbol."
        );
    }
}
