//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
    db::is_constraint_violation,
};

/// Create a category and return it with its generated ID.
///
/// The icon is an optional emoji shown next to the category name.
///
/// # Errors
/// Returns [Error::DuplicateCategoryName] when a category with the same name
/// already exists (names are compared case-insensitively, ignoring
/// surrounding whitespace), or [Error::SqlError] for any other SQL failure.
pub fn create_category(
    name: CategoryName,
    icon: Option<&str>,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .execute(
            "INSERT INTO category (name, icon) VALUES (?1, ?2);",
            (name.as_ref(), icon),
        )
        .map_err(|error| {
            if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
                Error::DuplicateCategoryName(name.as_ref().to_string())
            } else {
                Error::from(error)
            }
        })?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name,
        icon: icon.map(|icon| icon.to_string()),
    })
}

/// Retrieve a single category by ID.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    let category = connection
        .prepare("SELECT id, name, icon FROM category WHERE id = :id;")?
        .query_one(&[(":id", &category_id)], map_row)?;

    Ok(category)
}

/// Retrieve all categories ordered alphabetically by name.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    let mut statement =
        connection.prepare("SELECT id, name, icon FROM category ORDER BY name ASC;")?;
    let categories = statement
        .query_map([], map_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(categories)
}

/// Update a category's name and icon. Returns an error if the category doesn't exist.
///
/// # Errors
/// Returns:
/// - [Error::UpdateMissingCategory] when `category_id` does not match an
///   existing category,
/// - [Error::DuplicateCategoryName] when the new name collides with another
///   category,
/// - [Error::SqlError] for any other SQL failure.
pub fn update_category(
    category_id: CategoryId,
    new_name: CategoryName,
    new_icon: Option<&str>,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "UPDATE category SET name = ?1, icon = ?2 WHERE id = ?3",
            (new_name.as_ref(), new_icon, category_id),
        )
        .map_err(|error| {
            if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
                Error::DuplicateCategoryName(new_name.as_ref().to_string())
            } else {
                Error::from(error)
            }
        })?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by ID. Returns an error if the category doesn't exist.
///
/// Transactions referencing the deleted category fall back to the
/// uncategorized bucket (their category id is set to NULL).
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
///
/// Category names are logically identified by their normalized form, so the
/// unique index is over `LOWER(TRIM(name))` rather than the raw column.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            icon TEXT
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_category_name_normalized
            ON category(LOWER(TRIM(name)));",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let raw_name: String = row.get(1)?;

    Ok(Category {
        id: row.get(0)?,
        name: CategoryName::new_unchecked(&raw_name),
        icon: row.get(2)?,
    })
}
