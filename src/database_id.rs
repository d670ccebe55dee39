//! The integer type shared by all database row IDs.

/// SQLite row IDs are 64-bit integers; every table's ID column maps to this.
pub type DatabaseId = i64;
