//! The page for recording expenses and displaying all recorded expenses.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::{
        Expense, SortOrder,
        core::{get_expenses, get_total_spent},
    },
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE, FORM_CONTAINER_STYLE,
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_amount,
    },
};

/// The state needed for the [get_expenses_page] route handler.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Submits the form as JSON so that the create endpoint sees the same
/// payload as any other API client. An empty date is left out so that the
/// server picks today's date.
const SUBMIT_EXPENSE_SCRIPT: &str = r#"
async function submitExpense(event) {
    event.preventDefault();

    const form = event.target;
    const payload = {
        amount: Number(form.elements.amount.value),
        category: form.elements.category.value,
        description: form.elements.description.value,
    };

    if (form.elements.date.value !== "") {
        payload.date = form.elements.date.value;
    }

    try {
        const response = await fetch(form.dataset.endpoint, {
            method: "POST",
            headers: { "Content-Type": "application/json" },
            body: JSON.stringify(payload),
        });

        if (response.ok) {
            window.location.reload();
            return;
        }

        const body = await response.json().catch(() => ({}));
        alert("Could not add expense: " + (body.detail ?? response.statusText));
    } catch (error) {
        alert("Could not add expense: " + error);
    }
}
"#;

fn expense_form() -> Markup {
    html!(
        form
            id="expense-form"
            data-endpoint=(endpoints::EXPENSES_API)
            onsubmit="submitExpense(event)"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    type="number"
                    name="amount"
                    id="amount"
                    step="any"
                    placeholder="0.00"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    type="text"
                    name="category"
                    id="category"
                    placeholder="e.g. food"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    type="text"
                    name="description"
                    id="description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    type="date"
                    name="date"
                    id="date"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    )
}

fn sort_buttons() -> Markup {
    html!(
        form method="get" action=(endpoints::ROOT) class="flex gap-2"
        {
            button type="submit" name="order_by" value="asc" class=(BUTTON_SECONDARY_STYLE)
            {
                "Sort ascending"
            }

            button type="submit" name="order_by" value="desc" class=(BUTTON_SECONDARY_STYLE)
            {
                "Sort descending"
            }
        }
    )
}

fn expenses_view(expenses: &[Expense], total_spent: f64) -> Markup {
    let table_row = |expense: &Expense| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    time datetime=(expense.date) { (expense.date) }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                }

                td class=(TABLE_CELL_STYLE) { (expense.description) }

                td class="px-6 py-4 text-right" { (format_amount(expense.amount)) }
            }
        )
    };

    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class=(FORM_CONTAINER_STYLE)
            {
                h1 class="text-xl font-bold mb-4" { "Add Expense" }

                (expense_form())
            }

            section class="w-full mt-8 space-y-4 lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h2 class="text-xl font-bold" { "Expenses" }

                    p
                    {
                        "Total spent: "
                        span id="total-spent" class="font-semibold" { (format_amount(total_spent)) }
                    }
                }

                (sort_buttons())

                div class="dark:bg-gray-800 overflow-x-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class="px-6 py-3 text-right" { "Amount" }
                            }
                        }

                        tbody
                        {
                            @for expense in expenses {
                                (table_row(expense))
                            }

                            @if expenses.is_empty() {
                                tr
                                {
                                    td
                                        colspan="4"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No expenses recorded yet."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    let script = HeadElement::ScriptSource(PreEscaped(SUBMIT_EXPENSE_SCRIPT.to_owned()));

    base("Expenses", &[script], &content)
}

/// Renders the page with the expense form and the table of expenses.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    // Largest expenses first unless the client asks otherwise.
    let order = SortOrder::from_query(&query, SortOrder::Descending);

    match render_expenses_page(&state, order) {
        Ok(page) => page.into_response(),
        Err(error) => error.into_page_response(),
    }
}

fn render_expenses_page(state: &ExpensesPageState, order: SortOrder) -> Result<Markup, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_expenses(order, &connection)
        .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;
    let total_spent = get_total_spent(&connection)
        .inspect_err(|error| tracing::error!("could not get total spent: {error}"))?;

    Ok(expenses_view(&expenses, total_spent))
}
