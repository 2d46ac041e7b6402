//! Full HTML pages shown in place of the expenses page when something goes wrong.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// An error page with a large status code header and a suggested fix.
pub struct ErrorPage<'a> {
    pub status_code: StatusCode,
    pub title: &'a str,
    pub description: &'a str,
    pub fix: &'a str,
}

impl<'a> ErrorPage<'a> {
    pub fn not_found() -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            title: "Not Found",
            description: "Something's missing.",
            fix: "Sorry, we can't find that page. Your expenses are on the home page.",
        }
    }

    pub fn internal_server_error(description: &'a str, fix: &'a str) -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Internal Server Error",
            description,
            fix,
        }
    }
}

impl Default for ErrorPage<'_> {
    fn default() -> Self {
        Self::internal_server_error(
            "Sorry, something went wrong.",
            "Try again later or check the server logs",
        )
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        let page = error_view(
            self.title,
            self.status_code.as_str(),
            self.description,
            self.fix,
        );

        (self.status_code, Html(page.into_string())).into_response()
    }
}

/// The fallback route handler for paths that do not exist.
pub async fn get_404_not_found() -> Response {
    ErrorPage::not_found().into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::test_utils::{assert_content_type, assert_valid_html, parse_html_document};

    use super::{ErrorPage, get_404_not_found};

    #[tokio::test]
    async fn not_found_page_has_404_status() {
        let response = get_404_not_found().await;

        assert_eq!(StatusCode::NOT_FOUND, response.status());
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let header = html
            .select(&Selector::parse("h1").unwrap())
            .next()
            .expect("No h1 found")
            .text()
            .collect::<String>();
        assert_eq!("404", header.trim());
    }

    #[tokio::test]
    async fn internal_server_error_shows_fix() {
        let response =
            ErrorPage::internal_server_error("Database is down", "Restart the server")
                .into_response();

        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        let html = parse_html_document(response).await;
        let paragraphs: Vec<String> = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(vec!["Database is down", "Restart the server"], paragraphs);
    }
}
