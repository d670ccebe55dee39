//! The page listing every category with its transaction count.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_database,
    category::{Category, CategoryId, get_all_categories},
    endpoints::{self, format_endpoint},
    html::{
        CATEGORY_BADGE_CLASS, LINK_CLASS, PAGE_CONTAINER_CLASS, TABLE_CELL_CLASS, TABLE_CLASS,
        TABLE_HEADER_CLASS, TABLE_ROW_CLASS, TABLE_WRAPPER_CLASS, base, edit_delete_action_links,
    },
    navigation::NavBar,
};

/// The state needed for the [get_categories_page] route handler.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// One row of the categories table.
#[derive(Debug)]
struct CategoryTableRow {
    category: Category,
    edit_url: String,
    transaction_count: u32,
}

/// Render the categories page with a transaction count per category.
pub async fn get_categories_page(
    State(state): State<CategoriesPageState>,
) -> Result<Response, Error> {
    let connection = lock_database(&state.db_connection)?;
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("could not list categories: {error}"))?;
    let counts = count_transactions_per_category(&connection).inspect_err(|error| {
        tracing::error!("could not count transactions per category: {error}")
    })?;

    let rows: Vec<CategoryTableRow> = categories
        .into_iter()
        .map(|category| CategoryTableRow {
            edit_url: format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id),
            transaction_count: *counts.get(&category.id).unwrap_or(&0),
            category,
        })
        .collect();

    Ok(categories_view(&rows).into_response())
}

/// Count transactions per category, skipping uncategorized rows.
fn count_transactions_per_category(
    connection: &Connection,
) -> Result<HashMap<CategoryId, u32>, Error> {
    let counts = connection
        .prepare(
            "SELECT category_id, COUNT(1) FROM \"transaction\"
             WHERE category_id IS NOT NULL GROUP BY category_id",
        )?
        .query_map((), |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<HashMap<CategoryId, u32>, rusqlite::Error>>();

    counts.map_err(Error::from)
}

fn confirm_delete_message(category: &Category, transaction_count: u32) -> String {
    format!(
        "Are you sure you want to delete '{}'? {} transaction(s) will become uncategorized.",
        category.name, transaction_count
    )
}

fn category_row(row: &CategoryTableRow) -> Markup {
    let delete_url = format_endpoint(endpoints::DELETE_CATEGORY, row.category.id);
    let action_links = edit_delete_action_links(
        &row.edit_url,
        &delete_url,
        &confirm_delete_message(&row.category, row.transaction_count),
        "closest tr",
        "delete",
    );

    html! {
        tr class=(TABLE_ROW_CLASS) {
            td class=(TABLE_CELL_CLASS) {
                span class=(CATEGORY_BADGE_CLASS) {
                    @if let Some(icon) = &row.category.icon {
                        (icon) " "
                    }
                    (row.category.name)
                }
            }
            td class=(TABLE_CELL_CLASS) { (row.transaction_count) }
            td class=(TABLE_CELL_CLASS) {
                div class="flex gap-4" { (action_links) }
            }
        }
    }
}

fn categories_view(rows: &[CategoryTableRow]) -> Markup {
    let new_category_url = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_CLASS) {
            section class="space-y-4" {
                header class="flex justify-between flex-wrap items-end" {
                    h1 class="text-xl font-bold" { "Categories" }
                    a href=(new_category_url) class=(LINK_CLASS) { "Create Category" }
                }

                (categories_cards_view(rows, new_category_url))

                section class=(TABLE_WRAPPER_CLASS) {
                    table class=(TABLE_CLASS) {
                        thead class=(TABLE_HEADER_CLASS) {
                            tr {
                                th scope="col" class=(TABLE_CELL_CLASS) { "Name" }
                                th scope="col" class=(TABLE_CELL_CLASS) { "Transactions" }
                                th scope="col" class=(TABLE_CELL_CLASS) { "Actions" }
                            }
                        }

                        tbody {
                            @for row in rows {
                                (category_row(row))
                            }

                            @if rows.is_empty() {
                                tr {
                                    td colspan="3" class="px-6 py-4 text-center text-gray-500 dark:text-gray-400" {
                                        "No categories created yet. "
                                        a href=(new_category_url) class=(LINK_CLASS) { "Create your first category" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Categories", &[], &content)
}

fn categories_cards_view(rows: &[CategoryTableRow], new_category_url: &str) -> Markup {
    html! {
        ul class="lg:hidden space-y-4" {
            @for row in rows {
                li data-category-card="true"
                    class="rounded border border-gray-200 bg-white px-4 py-3 shadow-sm dark:border-gray-700 dark:bg-gray-800"
                {
                    div class="flex items-start justify-between gap-3" {
                        span class=(CATEGORY_BADGE_CLASS) {
                            @if let Some(icon) = &row.category.icon {
                                (icon) " "
                            }
                            (row.category.name)
                        }
                        span class="text-sm tabular-nums text-gray-900 dark:text-white" {
                            (row.transaction_count)
                        }
                    }

                    div class="mt-2 flex items-center gap-4 text-sm" {
                        (edit_delete_action_links(
                            &row.edit_url,
                            &format_endpoint(endpoints::DELETE_CATEGORY, row.category.id),
                            &confirm_delete_message(&row.category, row.transaction_count),
                            "closest [data-category-card='true']",
                            "outerHTML",
                        ))
                    }
                }
            }

            @if rows.is_empty() {
                li class="rounded border border-dashed border-gray-300 bg-white px-4 py-6 text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800 dark:text-gray-400" {
                    "No categories created yet. "
                    a href=(new_category_url) class=(LINK_CLASS) { "Create your first category" }
                }
            }
        }
    }
}
