//! The API endpoints URIs.

/// The page with the form for recording expenses and the table of expenses.
pub const ROOT: &str = "/";

/// The route to create and list expenses.
pub const EXPENSES_API: &str = "/expenses/";
/// The route for the total amount spent.
pub const EXPENSES_SUMMARY_API: &str = "/expenses/summary/";

/// [EXPENSES_API] without the trailing slash, served by the same handlers.
pub const EXPENSES_API_NO_SLASH: &str = "/expenses";
/// [EXPENSES_SUMMARY_API] without the trailing slash, served by the same handlers.
pub const EXPENSES_SUMMARY_API_NO_SLASH: &str = "/expenses/summary";
