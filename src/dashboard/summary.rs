//! Turns an account's ledger rows into the dashboard summary.
//!
//! Provides pure computations for the all-time balance, monthly income and
//! expense totals, the daily spending trend, the per-category breakdown, and
//! budget alerts and progress. Nothing here touches the database or the
//! clock: the caller hands over the rows and the time window, so the same
//! inputs always produce the same summary.

use std::collections::{BTreeMap, HashMap};

use time::{Date, Duration, OffsetDateTime, UtcOffset};

use crate::{
    budget::{Budget, BudgetLimit, month_start, next_month_start},
    category::{Category, CategoryId},
    dashboard::query::LedgerRow,
    html::format_currency_rounded,
};

/// How many slices the category breakdown keeps.
const BREAKDOWN_LIMIT: usize = 8;

/// The fraction of a limit at which spending counts as close to it.
const WARNING_RATIO: f64 = 0.8;

/// How far back the daily spending trend looks.
pub const TREND_WINDOW_DAYS: i64 = 30;

/// Display name for rows with no category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Display name for rows whose category no longer exists.
const UNKNOWN_CATEGORY_LABEL: &str = "Unknown category";

/// The time boundaries a summary is computed over.
///
/// The caller supplies every boundary, including "now", so the computation
/// itself carries no clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindow {
    /// First day of the month the totals, breakdown, and alerts cover.
    pub month_start: Date,
    /// First day of the following month, exclusive bound.
    pub next_month_start: Date,
    /// Earliest day included in the daily spending trend.
    pub trend_start: Date,
    /// The offset used to slice timestamps into calendar days.
    pub local_offset: UtcOffset,
}

impl SummaryWindow {
    /// The window covering the calendar month around `now` and the trailing
    /// thirty days, with days sliced at `local_offset`.
    pub fn around(now: OffsetDateTime, local_offset: UtcOffset) -> Self {
        let today = now.to_offset(local_offset).date();

        Self {
            month_start: month_start(today),
            next_month_start: next_month_start(today),
            trend_start: today - Duration::days(TREND_WINDOW_DAYS),
            local_offset,
        }
    }
}

/// Posted income and expense totals for a single month.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyTotals {
    pub income: f64,
    pub expense: f64,
    /// `income - expense`.
    pub net: f64,
}

/// Total posted expenses for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: Date,
    pub total: f64,
}

/// The month's spending attributed to one category.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownSlice {
    /// `None` is the uncategorized bucket.
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub total: f64,
}

/// How urgent a budget alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    /// Spending is within every configured limit.
    Ok,
    /// A limit is at least 80% used.
    Warning,
    /// A limit is met or exceeded.
    Danger,
}

/// A single budget alert.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertItem {
    pub severity: AlertSeverity,
    pub message: String,
    /// Stable identifier, unique within one summary.
    pub key: String,
}

/// How much of one category limit the month has used.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgressRow {
    pub category_id: CategoryId,
    pub category_name: String,
    pub limit: f64,
    /// Posted expenses against the category this month.
    pub spent: f64,
    /// `spent / limit` as a percentage, clamped to the range [0, 100].
    pub percentage: f64,
}

/// Everything the dashboard renders for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// All-time balance across every row, posted or not.
    pub balance: f64,
    /// Posted income and expenses for the month under review.
    pub monthly: MonthlyTotals,
    /// Posted expenses per day over the trend window, ascending and sparse.
    pub trend: Vec<TrendPoint>,
    /// The month's largest expense categories, at most eight.
    pub breakdown: Vec<BreakdownSlice>,
    /// Budget alerts for the month. Never empty.
    pub alerts: Vec<AlertItem>,
    /// Limit usage for every configured category limit.
    pub progress: Vec<BudgetProgressRow>,
    /// The newest rows regardless of status, newest first.
    pub recent: Vec<LedgerRow>,
}

/// The calendar day a row belongs to once sliced at `offset`.
fn local_day(row: &LedgerRow, offset: UtcOffset) -> Date {
    row.occurred_at.to_offset(offset).date()
}

/// The all-time account balance: income added, expenses subtracted, over
/// every row regardless of status or date.
///
/// Rows with an unrecognized kind contribute zero. An empty slice sums to
/// zero.
pub fn compute_balance(rows: &[LedgerRow]) -> f64 {
    rows.iter().map(LedgerRow::signed_amount).sum()
}

/// Posted income and expense totals for occurred-at days inside
/// `[month_start, next_month_start)`.
///
/// Non-posted rows and rows outside the month are skipped, never errors.
pub fn compute_monthly_totals(
    rows: &[LedgerRow],
    month_start: Date,
    next_month_start: Date,
    local_offset: UtcOffset,
) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();

    for row in rows {
        if !row.is_posted() {
            continue;
        }

        let day = local_day(row, local_offset);
        if day < month_start || day >= next_month_start {
            continue;
        }

        match row.kind.as_str() {
            "income" => totals.income += row.amount,
            "expense" => totals.expense += row.amount,
            _ => {}
        }
    }

    totals.net = totals.income - totals.expense;
    totals
}

/// Posted expenses summed per calendar day from `window_start` onward.
///
/// Days are sliced at `local_offset` and days without spending are omitted,
/// so the series is sparse: consumers must treat missing days as zero.
/// Points come back in ascending date order.
pub fn compute_daily_trend(
    rows: &[LedgerRow],
    window_start: Date,
    local_offset: UtcOffset,
) -> Vec<TrendPoint> {
    let mut totals_by_day = BTreeMap::new();

    for row in rows {
        if !row.is_posted() || row.kind != "expense" {
            continue;
        }

        let day = local_day(row, local_offset);
        if day < window_start {
            continue;
        }

        *totals_by_day.entry(day).or_insert(0.0) += row.amount;
    }

    totals_by_day
        .into_iter()
        .map(|(date, total)| TrendPoint { date, total })
        .collect()
}

/// Posted expenses grouped by category, largest total first.
///
/// `rows` should already be restricted to the month under review; status and
/// kind are filtered here. Rows without a category land in the uncategorized
/// bucket and ids that no longer resolve get a placeholder name, so no
/// spending is ever dropped. At most eight slices are returned and ties keep
/// their first-seen order.
pub fn compute_category_breakdown(
    rows: &[LedgerRow],
    categories: &[Category],
) -> Vec<BreakdownSlice> {
    let mut totals: Vec<(Option<CategoryId>, f64)> = Vec::new();
    let mut index_by_category: HashMap<Option<CategoryId>, usize> = HashMap::new();

    for row in rows {
        if !row.is_posted() || row.kind != "expense" {
            continue;
        }

        match index_by_category.get(&row.category_id) {
            Some(&index) => totals[index].1 += row.amount,
            None => {
                index_by_category.insert(row.category_id, totals.len());
                totals.push((row.category_id, row.amount));
            }
        }
    }

    // A stable sort keeps equal totals in encounter order.
    totals.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    totals.truncate(BREAKDOWN_LIMIT);

    totals
        .into_iter()
        .map(|(category_id, total)| BreakdownSlice {
            category_id,
            name: category_label(category_id, categories),
            total,
        })
        .collect()
}

/// Posted expense totals keyed by category id, with `None` keying the
/// uncategorized bucket.
///
/// Feeds the alert and progress computations, so `rows` should be restricted
/// to the month under review.
pub fn spent_by_category(rows: &[LedgerRow]) -> HashMap<Option<CategoryId>, f64> {
    let mut spent = HashMap::new();

    for row in rows {
        if !row.is_posted() || row.kind != "expense" {
            continue;
        }

        *spent.entry(row.category_id).or_insert(0.0) += row.amount;
    }

    spent
}

/// Threshold alerts for the month's budget limits.
///
/// A limit that is at least 80% used produces a warning, a limit that is met
/// or exceeded produces a danger alert, and limits at or below zero never
/// alert. The total limit and each category limit are checked independently.
/// When nothing fires, a single "ok" alert comes back so the list is never
/// empty.
pub fn compute_budget_alerts(
    total_spent: f64,
    total_limit: Option<f64>,
    spent_by_category: &HashMap<Option<CategoryId>, f64>,
    limits: &[BudgetLimit],
    categories: &[Category],
) -> Vec<AlertItem> {
    let mut alerts = Vec::new();

    if let Some(limit) = total_limit.filter(|limit| *limit > 0.0) {
        let ratio = total_spent / limit;

        if ratio >= 1.0 {
            alerts.push(AlertItem {
                severity: AlertSeverity::Danger,
                message: format!(
                    "Exceeded the total limit for the month: {} / {}",
                    format_currency_rounded(total_spent),
                    format_currency_rounded(limit)
                ),
                key: "total-danger".to_owned(),
            });
        } else if ratio >= WARNING_RATIO {
            alerts.push(AlertItem {
                severity: AlertSeverity::Warning,
                message: format!(
                    "Close to the total limit for the month: {} / {}",
                    format_currency_rounded(total_spent),
                    format_currency_rounded(limit)
                ),
                key: "total-warning".to_owned(),
            });
        }
    }

    for limit in limits {
        if limit.amount <= 0.0 {
            continue;
        }

        let spent = spent_by_category
            .get(&Some(limit.category_id))
            .copied()
            .unwrap_or(0.0);
        let ratio = spent / limit.amount;
        let name = category_label(Some(limit.category_id), categories);

        if ratio >= 1.0 {
            alerts.push(AlertItem {
                severity: AlertSeverity::Danger,
                message: format!(
                    "Exceeded {}: {} / {}",
                    name,
                    format_currency_rounded(spent),
                    format_currency_rounded(limit.amount)
                ),
                key: format!("cat-danger-{}", limit.category_id),
            });
        } else if ratio >= WARNING_RATIO {
            alerts.push(AlertItem {
                severity: AlertSeverity::Warning,
                message: format!(
                    "Close to the limit in {}: {} / {}",
                    name,
                    format_currency_rounded(spent),
                    format_currency_rounded(limit.amount)
                ),
                key: format!("cat-warning-{}", limit.category_id),
            });
        }
    }

    if alerts.is_empty() {
        alerts.push(AlertItem {
            severity: AlertSeverity::Ok,
            message: "No alerts for now.".to_owned(),
            key: "ok".to_owned(),
        });
    }

    alerts
}

/// Limit usage for every configured category limit, spent or not.
///
/// The percentage is clamped to 100 so overspending does not stretch the
/// progress bars; the raw overshoot only surfaces through the alert message.
/// Limits at or below zero report zero percent.
pub fn compute_budget_progress(
    spent_by_category: &HashMap<Option<CategoryId>, f64>,
    limits: &[BudgetLimit],
    categories: &[Category],
) -> Vec<BudgetProgressRow> {
    limits
        .iter()
        .map(|limit| {
            let spent = spent_by_category
                .get(&Some(limit.category_id))
                .copied()
                .unwrap_or(0.0);
            let percentage = if limit.amount > 0.0 {
                (spent / limit.amount * 100.0).min(100.0)
            } else {
                0.0
            };

            BudgetProgressRow {
                category_id: limit.category_id,
                category_name: category_label(Some(limit.category_id), categories),
                limit: limit.amount,
                spent,
                percentage,
            }
        })
        .collect()
}

/// Build the full dashboard summary for one account.
///
/// `rows` must hold every transaction of the account: the balance is an
/// all-time sum, while the monthly figures, breakdown, and alerts only look
/// at rows inside `window`. `recent_limit` caps the recent transaction list,
/// which keeps pending rows and sorts newest first.
pub fn assemble_summary(
    rows: &[LedgerRow],
    categories: &[Category],
    budget: Option<&Budget>,
    limits: &[BudgetLimit],
    window: &SummaryWindow,
    recent_limit: usize,
) -> Summary {
    let balance = compute_balance(rows);
    let monthly = compute_monthly_totals(
        rows,
        window.month_start,
        window.next_month_start,
        window.local_offset,
    );
    let trend = compute_daily_trend(rows, window.trend_start, window.local_offset);

    // The breakdown and the spend map see the same month slice as the
    // monthly totals, so their sums agree.
    let month_rows: Vec<LedgerRow> = rows
        .iter()
        .filter(|row| {
            let day = local_day(row, window.local_offset);
            day >= window.month_start && day < window.next_month_start
        })
        .cloned()
        .collect();

    let breakdown = compute_category_breakdown(&month_rows, categories);
    let spent = spent_by_category(&month_rows);

    let total_limit = budget.and_then(|budget| budget.total_limit);
    let alerts = compute_budget_alerts(monthly.expense, total_limit, &spent, limits, categories);
    let progress = compute_budget_progress(&spent, limits, categories);

    let recent = recent_rows(rows, recent_limit);

    Summary {
        balance,
        monthly,
        trend,
        breakdown,
        alerts,
        progress,
        recent,
    }
}

/// The newest `limit` rows, pending included, newest first.
///
/// Rows that happened at the same time prefer the one recorded most
/// recently.
fn recent_rows(rows: &[LedgerRow], limit: usize) -> Vec<LedgerRow> {
    let mut recent = rows.to_vec();
    recent.sort_by(|a, b| {
        b.occurred_at
            .cmp(&a.occurred_at)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
    recent.truncate(limit);
    recent
}

/// Resolve a category id to the name shown on the dashboard.
pub(super) fn category_label(category_id: Option<CategoryId>, categories: &[Category]) -> String {
    match category_id {
        None => UNCATEGORIZED_LABEL.to_owned(),
        Some(id) => categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.as_ref().to_owned())
            .unwrap_or_else(|| UNKNOWN_CATEGORY_LABEL.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::{
        OffsetDateTime,
        macros::{date, datetime, offset},
    };

    use crate::{
        budget::{Budget, BudgetLimit},
        category::{Category, CategoryId, CategoryName},
        dashboard::{
            query::LedgerRow,
            summary::{
                AlertSeverity, SummaryWindow, assemble_summary, compute_balance,
                compute_budget_alerts, compute_budget_progress, compute_category_breakdown,
                compute_daily_trend, compute_monthly_totals, spent_by_category,
            },
        },
    };

    fn ledger_row(kind: &str, amount: f64, occurred_at: OffsetDateTime) -> LedgerRow {
        LedgerRow {
            id: 0,
            category_id: None,
            kind: kind.to_owned(),
            amount,
            occurred_at,
            description: String::new(),
            status: "posted".to_owned(),
            created_at: occurred_at,
        }
    }

    fn expense(amount: f64, category_id: Option<CategoryId>) -> LedgerRow {
        let mut row = ledger_row("expense", amount, datetime!(2025-10-10 12:00:00 UTC));
        row.category_id = category_id;
        row
    }

    fn category(id: CategoryId, name: &str) -> Category {
        Category {
            id,
            name: CategoryName::new_unchecked(name),
            icon: None,
        }
    }

    fn limit(category_id: CategoryId, amount: f64) -> BudgetLimit {
        BudgetLimit {
            id: category_id,
            budget_id: 1,
            category_id,
            amount,
        }
    }

    fn october_window() -> SummaryWindow {
        SummaryWindow {
            month_start: date!(2025 - 10 - 01),
            next_month_start: date!(2025 - 11 - 01),
            trend_start: date!(2025 - 09 - 20),
            local_offset: offset!(UTC),
        }
    }

    #[test]
    fn balance_sums_income_minus_expenses_over_all_rows() {
        let pending = ledger_row("expense", 30_000.0, datetime!(2025-10-12 09:00:00 UTC));
        let rows = vec![
            ledger_row("income", 200_000.0, datetime!(2025-10-01 09:00:00 UTC)),
            ledger_row("expense", 50_000.0, datetime!(2023-02-03 09:00:00 UTC)),
            LedgerRow {
                status: "pending".to_owned(),
                ..pending
            },
        ];

        // Balance counts every row regardless of status or date.
        assert_eq!(compute_balance(&rows), 120_000.0);
    }

    #[test]
    fn balance_ignores_rows_with_unknown_kind() {
        let rows = vec![
            ledger_row("income", 100_000.0, datetime!(2025-10-01 09:00:00 UTC)),
            ledger_row("transfer", 99_999.0, datetime!(2025-10-02 09:00:00 UTC)),
        ];

        assert_eq!(compute_balance(&rows), 100_000.0);
    }

    #[test]
    fn balance_of_no_rows_is_zero() {
        assert_eq!(compute_balance(&[]), 0.0);
    }

    #[test]
    fn monthly_totals_split_income_and_expenses() {
        let rows = vec![
            ledger_row("expense", 50_000.0, datetime!(2025-10-03 10:00:00 UTC)),
            ledger_row("expense", 30_000.0, datetime!(2025-10-15 10:00:00 UTC)),
            ledger_row("income", 200_000.0, datetime!(2025-10-01 10:00:00 UTC)),
        ];

        let totals = compute_monthly_totals(
            &rows,
            date!(2025 - 10 - 01),
            date!(2025 - 11 - 01),
            offset!(UTC),
        );

        assert_eq!(totals.income, 200_000.0);
        assert_eq!(totals.expense, 80_000.0);
        assert_eq!(totals.net, 120_000.0);
    }

    #[test]
    fn monthly_totals_skip_pending_and_out_of_month_rows() {
        let pending = ledger_row("expense", 1_000_000.0, datetime!(2025-10-10 10:00:00 UTC));
        let rows = vec![
            ledger_row("expense", 40_000.0, datetime!(2025-10-10 10:00:00 UTC)),
            // The end of the window is exclusive.
            ledger_row("expense", 70_000.0, datetime!(2025-11-01 00:00:00 UTC)),
            ledger_row("expense", 90_000.0, datetime!(2025-09-30 10:00:00 UTC)),
            LedgerRow {
                status: "pending".to_owned(),
                ..pending
            },
        ];

        let totals = compute_monthly_totals(
            &rows,
            date!(2025 - 10 - 01),
            date!(2025 - 11 - 01),
            offset!(UTC),
        );

        assert_eq!(totals.expense, 40_000.0);
        assert_eq!(totals.income, 0.0);
    }

    #[test]
    fn daily_trend_groups_expenses_by_day_ascending() {
        let rows = vec![
            ledger_row("expense", 10_000.0, datetime!(2025-10-05 18:00:00 UTC)),
            ledger_row("expense", 5_000.0, datetime!(2025-10-02 09:00:00 UTC)),
            ledger_row("expense", 2_500.0, datetime!(2025-10-05 08:00:00 UTC)),
            ledger_row("income", 300_000.0, datetime!(2025-10-03 09:00:00 UTC)),
            // Before the window, must not appear.
            ledger_row("expense", 99_000.0, datetime!(2025-09-01 09:00:00 UTC)),
        ];

        let trend = compute_daily_trend(&rows, date!(2025 - 09 - 20), offset!(UTC));

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, date!(2025 - 10 - 02));
        assert_eq!(trend[0].total, 5_000.0);
        assert_eq!(trend[1].date, date!(2025 - 10 - 05));
        assert_eq!(trend[1].total, 12_500.0);
    }

    #[test]
    fn daily_trend_slices_days_at_the_local_offset() {
        // 02:00 UTC on the 3rd is still the evening of the 2nd at UTC-5.
        let rows = vec![ledger_row("expense", 8_000.0, datetime!(2025-10-03 02:00:00 UTC))];

        let trend = compute_daily_trend(&rows, date!(2025 - 09 - 20), offset!(-5));

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].date, date!(2025 - 10 - 02));
    }

    #[test]
    fn daily_trend_skips_pending_rows() {
        let pending = ledger_row("expense", 42_000.0, datetime!(2025-10-04 10:00:00 UTC));
        let rows = vec![LedgerRow {
            status: "pending".to_owned(),
            ..pending
        }];

        let trend = compute_daily_trend(&rows, date!(2025 - 09 - 20), offset!(UTC));

        assert!(trend.is_empty());
    }

    #[test]
    fn breakdown_groups_by_category_and_sorts_descending() {
        let categories = vec![category(1, "Food"), category(2, "Transport")];
        let rows = vec![
            expense(50_000.0, Some(1)),
            expense(20_000.0, Some(2)),
            expense(30_000.0, Some(1)),
        ];

        let breakdown = compute_category_breakdown(&rows, &categories);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].name, "Food");
        assert_eq!(breakdown[0].total, 80_000.0);
        assert_eq!(breakdown[1].name, "Transport");
        assert_eq!(breakdown[1].total, 20_000.0);
    }

    #[test]
    fn breakdown_buckets_uncategorized_and_unknown_categories() {
        let categories = vec![category(1, "Food")];
        let rows = vec![expense(10_000.0, None), expense(4_000.0, Some(999))];

        let breakdown = compute_category_breakdown(&rows, &categories);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category_id, None);
        assert_eq!(breakdown[0].name, "Uncategorized");
        assert_eq!(breakdown[0].total, 10_000.0);
        assert_eq!(breakdown[1].category_id, Some(999));
        assert_eq!(breakdown[1].name, "Unknown category");
    }

    #[test]
    fn breakdown_keeps_the_eight_largest_categories() {
        let categories: Vec<Category> = (1..=10)
            .map(|id| category(id, &format!("Category {id}")))
            .collect();
        let rows: Vec<LedgerRow> = (1..=10)
            .map(|id| expense(1_000.0 * id as f64, Some(id)))
            .collect();

        let breakdown = compute_category_breakdown(&rows, &categories);

        assert_eq!(breakdown.len(), 8);
        assert_eq!(breakdown[0].total, 10_000.0);
        assert_eq!(breakdown[7].total, 3_000.0);
    }

    #[test]
    fn breakdown_keeps_tied_categories_in_encounter_order() {
        let categories = vec![category(1, "Food"), category(2, "Transport")];
        let rows = vec![expense(5_000.0, Some(2)), expense(5_000.0, Some(1))];

        let breakdown = compute_category_breakdown(&rows, &categories);

        assert_eq!(breakdown[0].name, "Transport");
        assert_eq!(breakdown[1].name, "Food");
    }

    #[test]
    fn breakdown_skips_pending_rows() {
        let pending = expense(25_000.0, Some(1));
        let rows = vec![LedgerRow {
            status: "pending".to_owned(),
            ..pending
        }];

        let breakdown = compute_category_breakdown(&rows, &[category(1, "Food")]);

        assert!(breakdown.is_empty());
    }

    #[test]
    fn spent_by_category_keys_uncategorized_rows_under_none() {
        let rows = vec![expense(10_000.0, None), expense(3_000.0, Some(1))];

        let spent = spent_by_category(&rows);

        assert_eq!(spent.get(&None), Some(&10_000.0));
        assert_eq!(spent.get(&Some(1)), Some(&3_000.0));
    }

    #[test]
    fn alerts_warn_at_eighty_percent_of_a_category_limit() {
        let categories = vec![category(1, "Food")];
        let spent = HashMap::from([(Some(1), 80_000.0)]);

        let alerts =
            compute_budget_alerts(80_000.0, None, &spent, &[limit(1, 100_000.0)], &categories);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].key, "cat-warning-1");
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
        assert!(
            alerts[0].message.contains("Food"),
            "message should name the category: {}",
            alerts[0].message
        );
    }

    #[test]
    fn alerts_escalate_to_danger_when_a_limit_is_exceeded() {
        let categories = vec![category(1, "Food")];
        let spent = HashMap::from([(Some(1), 80_000.0)]);

        let alerts =
            compute_budget_alerts(80_000.0, None, &spent, &[limit(1, 70_000.0)], &categories);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].key, "cat-danger-1");
        assert_eq!(alerts[0].severity, AlertSeverity::Danger);
        assert!(
            alerts[0].message.contains("$80,000"),
            "message should show the spent amount: {}",
            alerts[0].message
        );
    }

    #[test]
    fn alerts_cover_the_total_limit() {
        let spent = HashMap::new();

        let warning = compute_budget_alerts(95_000.0, Some(100_000.0), &spent, &[], &[]);
        assert_eq!(warning.len(), 1);
        assert_eq!(warning[0].key, "total-warning");

        let danger = compute_budget_alerts(120_000.0, Some(100_000.0), &spent, &[], &[]);
        assert_eq!(danger.len(), 1);
        assert_eq!(danger[0].key, "total-danger");
        assert_eq!(danger[0].severity, AlertSeverity::Danger);
    }

    #[test]
    fn alerts_skip_limits_at_or_below_zero() {
        let categories = vec![category(1, "Food")];
        let spent = HashMap::from([(Some(1), 500_000.0)]);
        let limits = vec![limit(1, 0.0)];

        let alerts = compute_budget_alerts(500_000.0, Some(-1.0), &spent, &limits, &categories);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].key, "ok");
    }

    #[test]
    fn alerts_emit_one_ok_entry_only_when_nothing_fires() {
        let quiet = compute_budget_alerts(10_000.0, Some(100_000.0), &HashMap::new(), &[], &[]);
        assert_eq!(quiet.len(), 1);
        assert_eq!(quiet[0].key, "ok");
        assert_eq!(quiet[0].severity, AlertSeverity::Ok);

        let noisy = compute_budget_alerts(90_000.0, Some(100_000.0), &HashMap::new(), &[], &[]);
        assert!(noisy.iter().all(|alert| alert.key != "ok"));
    }

    #[test]
    fn progress_clamps_the_percentage_at_one_hundred() {
        let categories = vec![category(1, "Food")];
        let spent = HashMap::from([(Some(1), 80_000.0)]);

        let progress = compute_budget_progress(&spent, &[limit(1, 70_000.0)], &categories);

        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].spent, 80_000.0);
        assert_eq!(progress[0].limit, 70_000.0);
        assert_eq!(progress[0].percentage, 100.0);
    }

    #[test]
    fn progress_reports_unspent_and_unlimited_categories() {
        let categories = vec![category(1, "Food"), category(2, "Transport")];
        let spent = HashMap::new();
        let limits = vec![limit(1, 50_000.0), limit(2, 0.0)];

        let progress = compute_budget_progress(&spent, &limits, &categories);

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].category_name, "Food");
        assert_eq!(progress[0].spent, 0.0);
        assert_eq!(progress[0].percentage, 0.0);
        assert_eq!(progress[1].percentage, 0.0);
    }

    #[test]
    fn progress_percentage_reflects_partial_use() {
        let categories = vec![category(1, "Food")];
        let spent = HashMap::from([(Some(1), 30_000.0)]);

        let progress = compute_budget_progress(&spent, &[limit(1, 120_000.0)], &categories);

        assert_eq!(progress[0].percentage, 25.0);
    }

    #[test]
    fn summary_of_no_rows_is_zeroed_with_one_ok_alert() {
        let summary = assemble_summary(&[], &[], None, &[], &october_window(), 10);

        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.monthly.income, 0.0);
        assert_eq!(summary.monthly.expense, 0.0);
        assert!(summary.trend.is_empty());
        assert!(summary.breakdown.is_empty());
        assert!(summary.progress.is_empty());
        assert!(summary.recent.is_empty());
        assert_eq!(summary.alerts.len(), 1);
        assert_eq!(summary.alerts[0].key, "ok");
    }

    #[test]
    fn summary_keeps_pending_rows_out_of_totals_but_in_recent() {
        let pending = ledger_row("expense", 1_000_000.0, datetime!(2025-10-20 10:00:00 UTC));
        let rows = vec![
            ledger_row("expense", 10_000.0, datetime!(2025-10-05 10:00:00 UTC)),
            LedgerRow {
                status: "pending".to_owned(),
                ..pending
            },
        ];
        let budget = Budget {
            id: 1,
            account_id: 1,
            month: date!(2025 - 10 - 01),
            total_limit: Some(500_000.0),
        };

        let summary = assemble_summary(&rows, &[], Some(&budget), &[], &october_window(), 10);

        assert_eq!(summary.monthly.expense, 10_000.0);
        // A million pending pesos would trip the limit if it counted.
        assert_eq!(summary.alerts[0].key, "ok");
        assert_eq!(summary.recent.len(), 2);
        assert_eq!(summary.recent[0].status, "pending");
        assert_eq!(summary.recent[0].amount, 1_000_000.0);
    }

    #[test]
    fn summary_breakdown_matches_the_monthly_expense() {
        let categories = vec![category(1, "Food"), category(2, "Transport")];
        let rows = vec![
            expense(50_000.0, Some(1)),
            expense(20_000.0, Some(2)),
            expense(5_000.0, None),
            // Outside the month, so neither figure should include it.
            ledger_row("expense", 77_000.0, datetime!(2025-09-15 10:00:00 UTC)),
        ];

        let summary = assemble_summary(&rows, &categories, None, &[], &october_window(), 10);

        let breakdown_total: f64 = summary.breakdown.iter().map(|slice| slice.total).sum();
        assert_eq!(breakdown_total, summary.monthly.expense);
        assert_eq!(summary.monthly.expense, 75_000.0);
    }

    #[test]
    fn summary_recent_rows_are_newest_first_and_capped() {
        let mut first = ledger_row("expense", 1.0, datetime!(2025-10-01 10:00:00 UTC));
        first.id = 1;
        let mut second = ledger_row("expense", 2.0, datetime!(2025-10-02 10:00:00 UTC));
        second.id = 2;
        let mut third = ledger_row("expense", 3.0, datetime!(2025-10-03 10:00:00 UTC));
        third.id = 3;

        let summary = assemble_summary(
            &[first, third, second],
            &[],
            None,
            &[],
            &october_window(),
            2,
        );

        assert_eq!(summary.recent.len(), 2);
        assert_eq!(summary.recent[0].id, 3);
        assert_eq!(summary.recent[1].id, 2);
    }

    #[test]
    fn summary_recent_ties_fall_back_to_the_recorded_order() {
        let occurred_at = datetime!(2025-10-02 10:00:00 UTC);
        let mut earlier = ledger_row("expense", 1.0, occurred_at);
        earlier.id = 1;
        earlier.created_at = datetime!(2025-10-02 10:00:00 UTC);
        let mut later = ledger_row("expense", 2.0, occurred_at);
        later.id = 2;
        later.created_at = datetime!(2025-10-02 11:00:00 UTC);

        let summary = assemble_summary(&[earlier, later], &[], None, &[], &october_window(), 10);

        assert_eq!(summary.recent[0].id, 2);
        assert_eq!(summary.recent[1].id, 1);
    }

    #[test]
    fn summary_is_identical_across_calls_with_the_same_inputs() {
        let categories = vec![category(1, "Food")];
        let rows = vec![
            expense(50_000.0, Some(1)),
            ledger_row("income", 200_000.0, datetime!(2025-10-01 10:00:00 UTC)),
        ];
        let budget = Budget {
            id: 1,
            account_id: 1,
            month: date!(2025 - 10 - 01),
            total_limit: Some(100_000.0),
        };
        let limits = vec![limit(1, 60_000.0)];
        let window = october_window();

        let first = assemble_summary(&rows, &categories, Some(&budget), &limits, &window, 10);
        let second = assemble_summary(&rows, &categories, Some(&budget), &limits, &window, 10);

        assert_eq!(first, second);
    }

    #[test]
    fn summary_window_spans_the_month_and_trailing_thirty_days() {
        let now = datetime!(2025-10-15 12:00:00 UTC);

        let window = SummaryWindow::around(now, offset!(UTC));

        assert_eq!(window.month_start, date!(2025 - 10 - 01));
        assert_eq!(window.next_month_start, date!(2025 - 11 - 01));
        assert_eq!(window.trend_start, date!(2025 - 09 - 15));
    }

    #[test]
    fn summary_window_uses_the_local_date_around_midnight() {
        // 03:00 UTC on November 1st is still October 31st at UTC-5.
        let now = datetime!(2025-11-01 03:00:00 UTC);

        let window = SummaryWindow::around(now, offset!(-5));

        assert_eq!(window.month_start, date!(2025 - 10 - 01));
        assert_eq!(window.next_month_start, date!(2025 - 11 - 01));
    }
}
