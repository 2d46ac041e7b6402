mod core;
mod create_endpoint;
mod expenses_page;
mod list_endpoint;
mod summary_endpoint;

pub use self::core::{Expense, SortOrder, create_expense, create_expense_table};
pub use create_endpoint::{ExpenseForm, MessageBody, create_expense_endpoint};
pub use expenses_page::get_expenses_page;
pub use list_endpoint::list_expenses_endpoint;
pub use summary_endpoint::{Summary, get_summary_endpoint};
