//! The transactions page, a paged table of every recorded transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    app_state::lock_database,
    endpoints::{self, format_endpoint},
    html::{
        CATEGORY_BADGE_CLASS, LINK_CLASS, PAGE_CONTAINER_CLASS, TABLE_CELL_CLASS, TABLE_CLASS,
        TABLE_HEADER_CLASS, TABLE_ROW_CLASS, TABLE_WRAPPER_CLASS, base, delete_action_button,
        format_currency,
    },
    navigation::NavBar,
    pagination::{PaginationConfig, PaginationItem, pagination_items},
    timezone::get_local_offset,
    transaction::{TransactionId, TransactionKind, count_transactions},
};

const PENDING_BADGE_CLASS: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-amber-800 bg-amber-100 rounded-full \
    dark:bg-amber-900 dark:text-amber-300";

const DATE_CELL_CLASS: &str =
    "px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white";

const CURRENT_PAGE_CLASS: &str = "block px-3 py-2 rounded-sm font-bold text-black dark:text-white";

const PAGE_LINK_CLASS: &str = "block px-3 py-2 rounded-sm text-emerald-600 hover:underline";

const TRANSACTION_CARD_CLASS: &str = "rounded border border-gray-200 bg-white px-4 py-3 \
    shadow-sm dark:border-gray-700 dark:bg-gray-800";

const EMPTY_CARD_CLASS: &str = "rounded border border-dashed border-gray-300 bg-white px-4 py-6 \
    text-center text-sm text-gray-500 dark:border-gray-700 dark:bg-gray-800 dark:text-gray-400";

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The shared database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Controls the page size and how many page links are shown.
    pub pagination_config: PaginationConfig,
    /// An IANA timezone name such as "America/Bogota".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Selects the slice of the transaction table to show.
#[derive(Deserialize)]
pub struct Pagination {
    /// The 1-based page number.
    pub page: Option<u64>,
    /// How many transactions to show per page.
    pub per_page: Option<u64>,
}

/// One row of the transactions table.
#[derive(Debug, PartialEq)]
struct TransactionTableRow {
    occurred_on: Date,
    kind: TransactionKind,
    amount: f64,
    description: String,
    category_name: Option<String>,
    category_icon: Option<String>,
    status: String,
    delete_url: String,
}

impl TransactionTableRow {
    /// The amount with the sign implied by the transaction kind.
    fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Render an overview of the user's transactions, most recent first.
///
/// Pending transactions are listed alongside posted ones even though they do
/// not count toward spend totals.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query_params): Query<Pagination>,
) -> Result<Response, Error> {
    let config = &state.pagination_config;
    let current_page = query_params.page.unwrap_or(config.default_page).max(1);
    let per_page = query_params.per_page.unwrap_or(config.default_page_size).max(1);

    let Some(local_offset) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Err(Error::InvalidTimezone(state.local_timezone.clone()));
    };

    let (page_count, transactions) = {
        let connection = lock_database(&state.db_connection)?;

        let transaction_count = count_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not count transactions: {error}"))?;
        let page_count = u64::from(transaction_count).div_ceil(per_page);

        let offset = (current_page - 1) * per_page;
        let rows = get_transaction_rows(per_page, offset, local_offset, &connection)
            .inspect_err(|error| tracing::error!("could not get transaction rows: {error}"))?;

        (page_count, rows)
    };

    let pagination = pagination_items(current_page, page_count, config.max_pages);

    Ok(transactions_view(&transactions, &pagination, per_page).into_response())
}

fn get_transaction_rows(
    limit: u64,
    offset: u64,
    local_offset: UtcOffset,
    connection: &Connection,
) -> Result<Vec<TransactionTableRow>, Error> {
    connection
        .prepare(
            "SELECT \"transaction\".id, \"transaction\".kind, \"transaction\".amount,
                \"transaction\".occurred_at, \"transaction\".description, \"transaction\".status,
                category.name, category.icon
             FROM \"transaction\"
             LEFT JOIN category ON category.id = \"transaction\".category_id
             ORDER BY \"transaction\".occurred_at DESC, \"transaction\".created_at DESC,
                \"transaction\".id DESC
             LIMIT :limit OFFSET :offset;",
        )?
        .query_map(
            &[(":limit", &(limit as i64)), (":offset", &(offset as i64))],
            |row| {
                let id: TransactionId = row.get(0)?;
                let kind_text: String = row.get(1)?;
                let kind = kind_text.parse::<TransactionKind>().map_err(|error| {
                    rusqlite::Error::FromSqlConversionFailure(
                        1,
                        rusqlite::types::Type::Text,
                        Box::new(error),
                    )
                })?;
                let occurred_at: OffsetDateTime = row.get(3)?;

                Ok(TransactionTableRow {
                    occurred_on: occurred_at.to_offset(local_offset).date(),
                    kind,
                    amount: row.get(2)?,
                    description: row.get(4)?,
                    status: row.get(5)?,
                    category_name: row.get(6)?,
                    category_icon: row.get(7)?,
                    delete_url: format_endpoint(endpoints::DELETE_TRANSACTION, id),
                })
            },
        )?
        .map(|row_result| row_result.map_err(Error::from))
        .collect()
}

fn confirm_delete_message(description: &str) -> String {
    if description.is_empty() {
        "Are you sure you want to delete this transaction? This cannot be undone.".to_owned()
    } else {
        format!(
            "Are you sure you want to delete the transaction '{description}'? \
            This cannot be undone."
        )
    }
}

fn amount_class(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "text-green-700 dark:text-green-300",
        TransactionKind::Expense => "text-red-700 dark:text-red-300",
    }
}

fn category_badge(row: &TransactionTableRow) -> Markup {
    html! {
        @if let Some(name) = &row.category_name {
            span class=(CATEGORY_BADGE_CLASS) {
                @if let Some(icon) = &row.category_icon { (icon) " " }
                (name)
            }
        } @else {
            span class="text-gray-400 dark:text-gray-500" { "Uncategorized" }
        }
    }
}

fn status_view(status: &str) -> Markup {
    html! {
        @match status {
            "pending" => { span class=(PENDING_BADGE_CLASS) { "Pending" } }
            "posted" | "" => { span class="text-gray-500 dark:text-gray-400" { "Posted" } }
            other => { span class="text-gray-500 dark:text-gray-400" { (other) } }
        }
    }
}

fn transactions_view(
    transactions: &[TransactionTableRow],
    pagination: &[PaginationItem],
    per_page: u64,
) -> Markup {
    let new_transaction_url = endpoints::NEW_TRANSACTION_VIEW;
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_CLASS) {
            section class="space-y-4" {
                header class="flex justify-between flex-wrap items-end" {
                    h1 class="text-xl font-bold" { "Transactions" }
                    a href=(new_transaction_url) class=(LINK_CLASS) { "New Transaction" }
                }

                (transaction_cards_view(transactions, new_transaction_url))
                (transaction_table_view(transactions, new_transaction_url))
                (pagination_view(pagination, per_page))
            }
        }
    };

    base("Transactions", &[], &content)
}

/// The table layout shown on large screens. Small screens get
/// [transaction_cards_view] instead.
fn transaction_table_view(
    transactions: &[TransactionTableRow],
    new_transaction_url: &str,
) -> Markup {
    html! {
        section class=(TABLE_WRAPPER_CLASS) {
            table class=(TABLE_CLASS) {
                thead class=(TABLE_HEADER_CLASS) {
                    tr {
                        th scope="col" class=(TABLE_CELL_CLASS) { "Date" }
                        th scope="col" class=(TABLE_CELL_CLASS) { "Description" }
                        th scope="col" class=(TABLE_CELL_CLASS) { "Category" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_CLASS) { "Status" }
                        th scope="col" class=(TABLE_CELL_CLASS) { "Actions" }
                    }
                }

                tbody {
                    @for transaction in transactions {
                        (transaction_row_view(transaction))
                    }

                    @if transactions.is_empty() {
                        (empty_table_row(new_transaction_url))
                    }
                }
            }
        }
    }
}

fn empty_table_row(new_transaction_url: &str) -> Markup {
    html! {
        tr {
            td colspan="6" class="px-6 py-4 text-center text-gray-500 dark:text-gray-400" {
                "No transactions found. Record a transaction "
                a href=(new_transaction_url) class=(LINK_CLASS) { "here" }
                "."
            }
        }
    }
}

fn transaction_row_view(row: &TransactionTableRow) -> Markup {
    let amount = format_currency(row.signed_amount());
    let confirm_message = confirm_delete_message(&row.description);

    html! {
        tr class=(TABLE_ROW_CLASS) {
            th scope="row" class=(DATE_CELL_CLASS) {
                time datetime=(row.occurred_on) { (row.occurred_on) }
            }
            td class=(TABLE_CELL_CLASS) { (row.description) }
            td class=(TABLE_CELL_CLASS) { (category_badge(row)) }
            td class={ "px-6 py-4 text-right whitespace-nowrap " (amount_class(row.kind)) } {
                (amount)
            }
            td class=(TABLE_CELL_CLASS) { (status_view(&row.status)) }
            td class=(TABLE_CELL_CLASS) {
                (delete_action_button(&row.delete_url, &confirm_message, "closest tr", "delete"))
            }
        }
    }
}

fn transaction_cards_view(
    transactions: &[TransactionTableRow],
    new_transaction_url: &str,
) -> Markup {
    html! {
        ul class="lg:hidden space-y-4" {
            @for transaction in transactions {
                (transaction_card(transaction))
            }

            @if transactions.is_empty() {
                li class=(EMPTY_CARD_CLASS) {
                    "No transactions found. Record a transaction "
                    a href=(new_transaction_url) class=(LINK_CLASS) { "here" }
                    "."
                }
            }
        }
    }
}

fn transaction_card(transaction: &TransactionTableRow) -> Markup {
    html! {
        li class=(TRANSACTION_CARD_CLASS) data-transaction-card="true" {
            div class="flex items-start justify-between gap-3" {
                div class="min-w-0 flex-1 truncate text-sm font-semibold text-gray-900 dark:text-white"
                {
                    @if transaction.description.is_empty() {
                        span class="italic text-gray-400 dark:text-gray-500" { "No description" }
                    } @else {
                        (transaction.description)
                    }
                }
                div class={ "shrink-0 text-sm tabular-nums text-right whitespace-nowrap " (amount_class(transaction.kind)) }
                {
                    (format_currency(transaction.signed_amount()))
                }
            }

            div class="mt-1 flex flex-wrap items-center gap-2 text-xs text-gray-500 dark:text-gray-400"
            {
                time datetime=(transaction.occurred_on) { (transaction.occurred_on) }
                (category_badge(transaction))
                (status_view(&transaction.status))
            }

            div class="mt-2 flex items-center gap-4 text-sm" {
                (delete_action_button(
                    &transaction.delete_url,
                    &confirm_delete_message(&transaction.description),
                    "closest [data-transaction-card='true']",
                    "outerHTML",
                ))
            }
        }
    }
}

fn pagination_view(pagination: &[PaginationItem], per_page: u64) -> Markup {
    html! {
        nav class="pagination flex justify-center" aria-label="Transaction pages" {
            ul class="pagination flex items-center gap-1 p-0 m-0" {
                @for item in pagination {
                    li { (pagination_item_view(item, per_page)) }
                }
            }
        }
    }
}

fn pagination_item_view(item: &PaginationItem, per_page: u64) -> Markup {
    let page_url =
        |page: u64| format!("{}?page={page}&per_page={per_page}", endpoints::TRANSACTIONS_VIEW);

    html! {
        @match item {
            PaginationItem::Current(page) => {
                p aria-current="page" class=(CURRENT_PAGE_CLASS) { (page) }
            }
            PaginationItem::Link(page) => {
                a href=(page_url(*page)) class=(PAGE_LINK_CLASS) { (page) }
            }
            PaginationItem::Gap => {
                span class="block px-3 py-2 text-gray-400 dark:text-gray-500" { "..." }
            }
            PaginationItem::Back(page) => {
                a href=(page_url(*page)) role="button" class=(PAGE_LINK_CLASS) { "Back" }
            }
            PaginationItem::Next(page) => {
                a href=(page_url(*page)) role="button" class=(PAGE_LINK_CLASS) { "Next" }
            }
        }
    }
}

#[cfg(test)]
mod get_transaction_rows_tests {
    use rusqlite::Connection;
    use time::{UtcOffset, macros::datetime};

    use crate::{
        account::create_account,
        category::{CategoryName, create_category},
        db::initialize,
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    use super::get_transaction_rows;

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().expect("could not open in-memory database");
        initialize(&connection).expect("could not initialize test DB");
        connection
    }

    #[test]
    fn rows_are_ordered_most_recent_first() {
        let connection = get_test_connection();
        let account = create_account("Main account", "COP", &connection)
            .expect("could not create test account");
        for (day, description) in [(1, "oldest"), (2, "middle"), (2, "newest")] {
            let expense = Transaction::build(account.id, TransactionKind::Expense, 1_000.0)
                .occurred_at(datetime!(2025-03-01 12:00 UTC).replace_day(day).unwrap())
                .description(description);
            create_transaction(expense, &connection).expect("could not record transaction");
        }

        let rows = get_transaction_rows(50, 0, UtcOffset::UTC, &connection).unwrap();

        let descriptions: Vec<&str> = rows.iter().map(|row| row.description.as_str()).collect();
        assert_eq!(descriptions, ["newest", "middle", "oldest"]);
    }

    #[test]
    fn respects_limit_and_offset() {
        let connection = get_test_connection();
        let account = create_account("Main account", "COP", &connection)
            .expect("could not create test account");
        for i in 1..=5 {
            let expense = Transaction::build(account.id, TransactionKind::Expense, i as f64)
                .occurred_at(datetime!(2025-03-01 12:00 UTC))
                .description(&format!("transaction {i}"));
            create_transaction(expense, &connection).expect("could not record transaction");
        }

        let rows = get_transaction_rows(2, 1, UtcOffset::UTC, &connection).unwrap();

        let descriptions: Vec<&str> = rows.iter().map(|row| row.description.as_str()).collect();
        assert_eq!(descriptions, ["transaction 4", "transaction 3"]);
    }

    #[test]
    fn joins_category_name_and_icon() {
        let connection = get_test_connection();
        let account = create_account("Main account", "COP", &connection)
            .expect("could not create test account");
        let category = create_category(CategoryName::new_unchecked("Food"), Some("🍽️"), &connection)
            .expect("could not create test category");
        let groceries = Transaction::build(account.id, TransactionKind::Expense, 12_500.0)
            .category_id(Some(category.id));
        create_transaction(groceries, &connection).expect("could not record transaction");
        let uncategorized = Transaction::build(account.id, TransactionKind::Expense, 8_000.0);
        create_transaction(uncategorized, &connection).expect("could not record transaction");

        let rows = get_transaction_rows(50, 0, UtcOffset::UTC, &connection).unwrap();

        let categorized = rows
            .iter()
            .find(|row| row.category_name.is_some())
            .expect("want a categorized row");
        assert_eq!(categorized.category_name.as_deref(), Some("Food"));
        assert_eq!(categorized.category_icon.as_deref(), Some("🍽️"));
        assert!(rows.iter().any(|row| row.category_name.is_none()));
    }
}

#[cfg(test)]
mod get_transactions_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use rusqlite::Connection;
    use scraper::{ElementRef, Html, Selector};
    use time::macros::datetime;

    use crate::{
        account::create_account,
        category::{CategoryName, create_category},
        db::initialize,
        endpoints,
        html::format_currency,
        pagination::{PaginationConfig, PaginationItem},
        test_utils::{assert_well_formed, parse_page},
        transaction::{Transaction, TransactionKind, create_transaction},
    };

    use super::{Pagination, TransactionsViewState, get_transactions_page};

    fn get_test_state() -> TransactionsViewState {
        let connection = Connection::open_in_memory().expect("could not open in-memory database");
        initialize(&connection).expect("could not initialize test DB");

        TransactionsViewState {
            db_connection: Arc::new(Mutex::new(connection)),
            pagination_config: PaginationConfig::default(),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn create_test_account(state: &TransactionsViewState) -> i64 {
        let connection = state.db_connection.lock().unwrap();
        let account = create_account("Main account", "COP", &connection)
            .expect("could not create test account");
        account.id
    }

    #[tokio::test]
    async fn transactions_page_displays_paged_data() {
        let state = TransactionsViewState {
            pagination_config: PaginationConfig {
                max_pages: 5,
                ..Default::default()
            },
            ..get_test_state()
        };
        let account_id = create_test_account(&state);
        {
            let connection = state.db_connection.lock().unwrap();
            // Same occurred_at for every row so the page order falls back to
            // insertion order, newest first.
            for i in 1..=36 {
                let expense = Transaction::build(account_id, TransactionKind::Expense, i as f64)
                    .occurred_at(datetime!(2025-10-05 12:00 UTC))
                    .description(&format!("entry {i}"));
                create_transaction(expense, &connection).expect("could not record transaction");
            }
        }
        let per_page = 4;
        let page = 6;
        // 36 entries over 9 pages, newest first, so page 6 covers IDs 16
        // down to 13.
        let want_descriptions = ["entry 16", "entry 15", "entry 14", "entry 13"];
        let want_pagination = [
            PaginationItem::Back(5),
            PaginationItem::Link(1),
            PaginationItem::Gap,
            PaginationItem::Link(4),
            PaginationItem::Link(5),
            PaginationItem::Current(6),
            PaginationItem::Link(7),
            PaginationItem::Link(8),
            PaginationItem::Gap,
            PaginationItem::Link(9),
            PaginationItem::Next(7),
        ];

        let response = get_transactions_page(
            State(state),
            Query(Pagination {
                page: Some(page),
                per_page: Some(per_page),
            }),
        )
        .await
        .unwrap();

        let html = parse_page(response).await;
        assert_well_formed(&html);
        let table = table_element(&html);
        assert_table_has_descriptions(table, &want_descriptions);
        let pagination = pagination_list(&html);
        assert_pagination_row(pagination, per_page, &want_pagination);
    }

    #[tokio::test]
    async fn transactions_page_displays_category_and_status() {
        let state = get_test_state();
        let account_id = create_test_account(&state);
        {
            let connection = state.db_connection.lock().unwrap();
            let food = create_category(CategoryName::new_unchecked("Food"), Some("🍽️"), &connection)
                .expect("could not create test category");
            let groceries = Transaction::build(account_id, TransactionKind::Expense, 50_000.0)
                .category_id(Some(food.id))
                .description("groceries");
            create_transaction(groceries, &connection).expect("could not record transaction");
            let salary = Transaction::build(account_id, TransactionKind::Income, 200_000.0)
                .description("salary")
                .status("pending");
            create_transaction(salary, &connection).expect("could not record transaction");
        }

        let response = get_transactions_page(
            State(state),
            Query(Pagination {
                page: None,
                per_page: None,
            }),
        )
        .await
        .unwrap();

        let html = parse_page(response).await;
        assert_well_formed(&html);

        let badge_selector = Selector::parse("tbody span.bg-emerald-100").unwrap();
        let badge_text = html
            .select(&badge_selector)
            .next()
            .expect("want a category badge in the table")
            .text()
            .collect::<String>();
        assert_eq!(
            badge_text.split_whitespace().collect::<Vec<_>>(),
            ["🍽️", "Food"]
        );

        let status_text = html
            .select(&Selector::parse("tbody span.bg-amber-100").unwrap())
            .next()
            .expect("want a pending badge in the table")
            .text()
            .collect::<String>();
        assert_eq!(status_text.trim(), "Pending");

        let cell_text = html
            .select(&Selector::parse("tbody td").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect::<Vec<_>>();
        assert!(
            cell_text.contains(&format_currency(-50_000.0)),
            "want expense shown as {} in table cells, got {cell_text:?}",
            format_currency(-50_000.0)
        );
        assert!(
            cell_text.contains(&format_currency(200_000.0)),
            "want income shown as {} in table cells, got {cell_text:?}",
            format_currency(200_000.0)
        );
    }

    #[tokio::test]
    async fn transactions_page_shows_empty_state() {
        let state = get_test_state();

        let response = get_transactions_page(
            State(state),
            Query(Pagination {
                page: None,
                per_page: None,
            }),
        )
        .await
        .unwrap();

        let html = parse_page(response).await;
        assert_well_formed(&html);

        let empty_cell_selector = Selector::parse("td[colspan='6']").unwrap();
        let cell = html
            .select(&empty_cell_selector)
            .next()
            .expect("want an empty-state cell spanning the table");
        let link = cell
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("want a link in the empty-state cell");
        assert_eq!(link.attr("href"), Some(endpoints::NEW_TRANSACTION_VIEW));
    }

    #[track_caller]
    fn table_element(html: &Html) -> ElementRef<'_> {
        let selector = Selector::parse("table").unwrap();
        html.select(&selector).next().expect("no table in page")
    }

    #[track_caller]
    fn assert_table_has_descriptions(table: ElementRef, want: &[&str]) {
        // The date cell is a <th>, so the description is the second column.
        let selector = Selector::parse("tbody tr > td:nth-child(2)").unwrap();
        let got: Vec<String> = table
            .select(&selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();

        assert_eq!(got, want, "want rows {want:?}, got {got:?}");
    }

    #[track_caller]
    fn pagination_list(html: &Html) -> ElementRef<'_> {
        let selector = Selector::parse("nav.pagination > ul.pagination").unwrap();
        html.select(&selector).next().expect("no pagination list")
    }

    /// Checks each `<li>` of the pagination list against `want_pagination`.
    #[track_caller]
    fn assert_pagination_row(
        pagination: ElementRef,
        per_page: u64,
        want_pagination: &[PaginationItem],
    ) {
        let items: Vec<ElementRef> = pagination.select(&Selector::parse("li").unwrap()).collect();
        assert_eq!(
            items.len(),
            want_pagination.len(),
            "want {} pagination items, got {}",
            want_pagination.len(),
            items.len()
        );

        for (item, want) in items.iter().zip(want_pagination) {
            match *want {
                PaginationItem::Current(page) => assert_current_page(item, page),
                PaginationItem::Link(page) => assert_page_link(item, page, per_page),
                PaginationItem::Gap => assert_gap(item),
                PaginationItem::Back(page) => assert_nav_button(item, "Back", page, per_page),
                PaginationItem::Next(page) => assert_nav_button(item, "Next", page, per_page),
            }
        }
    }

    #[track_caller]
    fn assert_current_page(item: &ElementRef<'_>, page: u64) {
        assert!(
            item_link(item).is_none(),
            "current page must not be a link: {}",
            item.html()
        );
        let marker = item
            .select(&Selector::parse("p[aria-current='page']").unwrap())
            .next()
            .unwrap_or_else(|| panic!("no current page marker in {}", item.html()));
        assert_eq!(element_text(&marker), page.to_string());
    }

    #[track_caller]
    fn assert_page_link(item: &ElementRef<'_>, page: u64, per_page: u64) {
        let link = find_link(item);
        assert_eq!(element_text(&link), page.to_string());
        assert_eq!(link.attr("href"), Some(page_url(page, per_page).as_str()));
    }

    #[track_caller]
    fn assert_gap(item: &ElementRef<'_>) {
        assert!(item_link(item).is_none(), "gap marker must not be a link");
        assert_eq!(element_text(item), "...");
    }

    /// Checks a back or next button: label, button role and page link.
    #[track_caller]
    fn assert_nav_button(item: &ElementRef<'_>, label: &str, page: u64, per_page: u64) {
        let link = find_link(item);

        assert_eq!(element_text(&link), label);
        assert_eq!(
            link.attr("role"),
            Some("button"),
            "{label} button should have role=\"button\""
        );
        assert_eq!(link.attr("href"), Some(page_url(page, per_page).as_str()));
    }

    fn item_link<'a>(item: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        item.select(&Selector::parse("a").unwrap()).next()
    }

    #[track_caller]
    fn find_link<'a>(item: &ElementRef<'a>) -> ElementRef<'a> {
        item_link(item).unwrap_or_else(|| panic!("no link in pagination item {}", item.html()))
    }

    fn element_text(element: &ElementRef<'_>) -> String {
        element.text().collect::<String>().trim().to_owned()
    }

    fn page_url(page: u64, per_page: u64) -> String {
        format!("{}?page={page}&per_page={per_page}", endpoints::TRANSACTIONS_VIEW)
    }
}
