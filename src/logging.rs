//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Bodies longer than this many bytes are truncated in `info` level logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Request bodies larger than this are rejected before they are logged.
///
/// Matches the default body limit axum applies to the `Json` extractor.
pub const REQUEST_BODY_SIZE_LIMIT: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged at the `debug` level.
///
/// The bodies are passed on byte for byte, only the logged text is decoded
/// lossily.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, REQUEST_BODY_SIZE_LIMIT).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    // Responses come from this server's own handlers, so they are not capped.
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body_bytes) => body_bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Cut `body` to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting a character.
fn truncate_body(body: &str) -> &str {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return body;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Bytes,
        http::StatusCode,
        middleware,
        routing::post,
    };
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, Expense, build_router, endpoints};

    use super::{
        LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_SIZE_LIMIT, logging_middleware, truncate_body,
    };

    #[test]
    fn short_body_is_unchanged() {
        assert_eq!("hello", truncate_body("hello"));
    }

    #[test]
    fn long_body_is_truncated() {
        let body = "a".repeat(LOG_BODY_LENGTH_LIMIT * 2);

        assert_eq!(LOG_BODY_LENGTH_LIMIT, truncate_body(&body).len());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Each 'é' is two bytes, so the limit falls inside a character when offset by one.
        let body = format!("a{}", "é".repeat(LOG_BODY_LENGTH_LIMIT));

        let truncated = truncate_body(&body);

        assert!(truncated.len() <= LOG_BODY_LENGTH_LIMIT);
        assert!(body.starts_with(truncated));
    }

    #[tokio::test]
    async fn passes_request_and_response_bodies_through() {
        let app = Router::new()
            .route("/echo", post(|body: String| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);
        let body = "x".repeat(LOG_BODY_LENGTH_LIMIT + 10);

        let response = server.post("/echo").text(body.clone()).await;

        response.assert_status_ok();
        response.assert_text(body);
    }

    #[tokio::test]
    async fn passes_binary_request_body_through_unchanged() {
        let app = Router::new()
            .route("/echo", post(|body: Bytes| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);
        let body = Bytes::from_static(&[0xff, 0xfe, b'a', 0x80]);

        let response = server.post("/echo").bytes(body.clone()).await;

        response.assert_status_ok();
        assert_eq!(&body, response.as_bytes());
    }

    #[tokio::test]
    async fn invalid_utf8_expense_is_rejected_not_stored() {
        let connection = Connection::open_in_memory().unwrap();
        let state = AppState::new(connection, "Etc/UTC").expect("Could not create app state");
        let app = build_router(state).layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);
        let mut payload = br#"{"amount":1,"category":""#.to_vec();
        payload.push(0xff);
        payload.extend_from_slice(br#""}"#);

        server
            .post(endpoints::EXPENSES_API)
            .bytes(payload.into())
            .content_type("application/json")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let expenses = server.get(endpoints::EXPENSES_API).await.json::<Vec<Expense>>();
        assert!(expenses.is_empty(), "want no expenses stored, got {expenses:?}");
    }

    #[tokio::test]
    async fn oversized_request_body_is_rejected() {
        let app = Router::new()
            .route("/echo", post(|body: Bytes| async move { body }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);

        let response = server
            .post("/echo")
            .bytes(vec![b'a'; REQUEST_BODY_SIZE_LIMIT + 1].into())
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }
}
