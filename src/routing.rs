//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState, endpoints,
    error_pages::get_404_not_found,
    expense::{
        create_expense_endpoint, get_expenses_page, get_summary_endpoint, list_expenses_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// The API routes are served both with and without their trailing slash.
pub fn build_router(state: AppState) -> Router {
    let expenses_routes = get(list_expenses_endpoint).post(create_expense_endpoint);
    let summary_routes = get(get_summary_endpoint);

    Router::new()
        .route(endpoints::ROOT, get(get_expenses_page))
        .route(endpoints::EXPENSES_API, expenses_routes.clone())
        .route(endpoints::EXPENSES_API_NO_SLASH, expenses_routes)
        .route(endpoints::EXPENSES_SUMMARY_API, summary_routes.clone())
        .route(endpoints::EXPENSES_SUMMARY_API_NO_SLASH, summary_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}
