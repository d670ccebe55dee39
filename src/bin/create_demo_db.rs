use std::{error::Error, path::Path, process::exit};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use biyu::{
    Transaction, TransactionKind, create_transaction, get_all_accounts, get_all_categories,
    initialize_db, provision_defaults, save_budget,
};

/// A utility for creating a populated demo database for the BiYú server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Where to write the SQLite database file.
    #[arg(long, short)]
    output_path: String,
}

/// The daily spending the demo cycles through, as description, category, and
/// amount triples.
const SPENDING_TEMPLATES: [(&str, &str, f64); 6] = [
    ("Groceries", "Food", 48_000.0),
    ("Bus fare", "Transport", 5_800.0),
    ("Lunch out", "Food", 23_000.0),
    ("Movie night", "Fun", 35_000.0),
    ("Pharmacy", "Health", 27_500.0),
    ("Cleaning supplies", "Home", 31_000.0),
];

/// Build a demo ledger: salary, six weeks of spending, and a budget.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path.extension().is_none_or(|extension| extension.is_empty()) {
        eprintln!("The output path needs a file extension, e.g. 'demo.db'.");
        exit(1);
    }

    if output_path.is_file() {
        eprintln!("A file already exists at {output_path:#?}");
        exit(1);
    }

    println!("Creating the demo database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize_db(&connection)?;
    provision_defaults(&connection)?;

    let account = get_all_accounts(&connection)?
        .into_iter()
        .next()
        .ok_or("provisioning did not create an account")?;
    let categories = get_all_categories(&connection)?;
    let category_id = |name: &str| {
        categories
            .iter()
            .find(|category| category.name.as_ref() == name)
            .map(|category| category.id)
    };

    println!("Recording six weeks of transactions...");
    let now = OffsetDateTime::now_utc();

    for days_ago in [35, 5] {
        create_transaction(
            Transaction::build(account.id, TransactionKind::Income, 2_600_000.0)
                .occurred_at(now - Duration::days(days_ago))
                .description("Salary"),
            &connection,
        )?;
    }

    for days_ago in 0..42usize {
        let (description, category, amount) =
            SPENDING_TEMPLATES[days_ago % SPENDING_TEMPLATES.len()];

        create_transaction(
            Transaction::build(account.id, TransactionKind::Expense, amount)
                .category_id(category_id(category))
                .occurred_at(now - Duration::days(days_ago as i64))
                .description(description),
            &connection,
        )?;
    }

    // One uncategorized expense and one that has not settled yet.
    create_transaction(
        Transaction::build(account.id, TransactionKind::Expense, 64_000.0)
            .occurred_at(now - Duration::days(3))
            .description("Street food"),
        &connection,
    )?;
    create_transaction(
        Transaction::build(account.id, TransactionKind::Expense, 1_200_000.0)
            .description("Rent")
            .status("pending"),
        &connection,
    )?;

    println!("Saving this month's budget...");
    let mut limits = Vec::new();
    if let Some(food) = category_id("Food") {
        limits.push((food, 900_000.0));
    }
    if let Some(fun) = category_id("Fun") {
        limits.push((fun, 250_000.0));
    }
    save_budget(
        account.id,
        now.date(),
        Some(2_200_000.0),
        &limits,
        &connection,
    )?;

    println!("Done!");

    Ok(())
}
