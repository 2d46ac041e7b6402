//! Defines the app level error type and its conversions to JSON and HTML responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error_pages::ErrorPage;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body could not be read as an expense.
    ///
    /// Only the shape of the payload is checked (e.g., a number where a
    /// number is expected), never the values themselves.
    #[error("invalid expense: {0}")]
    InvalidExpense(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

/// The JSON body sent to API clients when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// A human readable explanation of the failure.
    pub detail: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, detail) = match self {
            Error::InvalidExpense(reason) => (StatusCode::UNPROCESSABLE_ENTITY, reason),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status_code, Json(ErrorBody { detail })).into_response()
    }
}

impl Error {
    /// Convert the error into a full HTML error page.
    ///
    /// Used by the route handlers that serve pages rather than JSON.
    pub fn into_page_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => ErrorPage::internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response(),
            Error::DatabaseLockError => ErrorPage::default().into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::test_utils::{assert_content_type, parse_html_document, parse_json_body};

    use super::Error;

    #[tokio::test]
    async fn invalid_expense_is_unprocessable_entity() {
        let response = Error::InvalidExpense("missing field `amount`".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_content_type(&response, "application/json");
        let body = parse_json_body(response).await;
        assert_eq!(body["detail"], "missing field `amount`");
    }

    #[tokio::test]
    async fn sql_error_hides_details() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_json_body(response).await;
        let detail = body["detail"].as_str().expect("detail should be a string");
        assert!(
            !detail.contains("query"),
            "want SQL details hidden from the client, got {detail:?}"
        );
    }

    #[tokio::test]
    async fn lock_error_is_internal_server_error() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn page_response_is_html() {
        let response = Error::DatabaseLockError.into_page_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        let title = html
            .select(&scraper::Selector::parse("title").unwrap())
            .next()
            .expect("Could not find title")
            .text()
            .collect::<String>();
        assert!(title.starts_with("Internal Server Error"));
    }
}
