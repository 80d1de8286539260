use std::path::{Path, PathBuf};

use crate::sqlite::{ColumnConstraint, ColumnDefinition, DataType, TableDefinition};

pub const DEFAULT_TABLE: &str = "user";

/// Blood-sugar bounds used by the low/high retrieval filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Readings strictly below this are low.
    pub low: i32,
    /// Readings strictly above this are high.
    pub high: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { low: 50, high: 200 }
    }
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Definition of the readings table
    pub table: TableDefinition,
    pub thresholds: Thresholds,
}

impl StoreConfig {
    /// Create a config for the `user` table at `db_path` with default thresholds
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            table: readings_table(DEFAULT_TABLE),
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, low: i32, high: i32) -> Self {
        self.thresholds = Thresholds { low, high };
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table.name
    }
}

/// The readings table layout: `id, email, bloodsugar, date, time, notes`.
pub fn readings_table(name: &str) -> TableDefinition {
    use ColumnConstraint::*;

    TableDefinition::new(name)
        .add_column(
            ColumnDefinition::new("id", DataType::Integer)
                .with_constraint(NotNull)
                .with_constraint(PrimaryKey)
                .with_constraint(AutoIncrement),
        )
        .add_column(ColumnDefinition::new("email", DataType::Text).with_constraint(NotNull))
        .add_column(ColumnDefinition::new("bloodsugar", DataType::Integer).with_constraint(NotNull))
        .add_column(ColumnDefinition::new("date", DataType::Text).with_constraint(NotNull))
        .add_column(ColumnDefinition::new("time", DataType::Text).with_constraint(NotNull))
        .add_column(ColumnDefinition::new("notes", DataType::Text).with_constraint(Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::new("/tmp/readings.db");
        assert_eq!(config.table_name(), "user");
        assert_eq!(config.thresholds, Thresholds { low: 50, high: 200 });
        assert_eq!(config.db_path, PathBuf::from("/tmp/readings.db"));
    }

    #[test]
    fn test_readings_table_ddl() {
        assert_eq!(
            readings_table("user").create_sql(),
            "CREATE TABLE user (id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT, \
             email TEXT NOT NULL, bloodsugar INTEGER NOT NULL, date TEXT NOT NULL, \
             time TEXT NOT NULL, notes TEXT NULL)"
        );
    }

    #[test]
    fn test_with_thresholds() {
        let config = StoreConfig::new("x.db").with_thresholds(70, 180);
        assert_eq!(config.thresholds.low, 70);
        assert_eq!(config.thresholds.high, 180);
    }
}
