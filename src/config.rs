//! Command line and environment configuration shared by the binaries.

use std::path::PathBuf;

use rusqlite::Connection;

/// The default name of the table that expenses are kept in.
pub const DEFAULT_TABLE_NAME: &str = "expense-tracker";

/// Where expenses are stored.
#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// File path to the SQLite database. Created if it does not exist.
    #[arg(long, env = "EXPENSE_DB_PATH", default_value = "expenses.db")]
    pub db_path: PathBuf,

    /// The name of the table that expenses are kept in.
    #[arg(long, env = "EXPENSE_TABLE_NAME", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,
}

impl StoreConfig {
    /// Open a connection to the configured database.
    ///
    /// # Errors
    /// Returns an error if the database file cannot be opened or created.
    pub fn open(&self) -> Result<Connection, rusqlite::Error> {
        Connection::open(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{DEFAULT_TABLE_NAME, StoreConfig};

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[command(flatten)]
        store: StoreConfig,
    }

    #[test]
    fn parses_flags() {
        let args = TestArgs::try_parse_from([
            "test",
            "--db-path",
            "/tmp/costs.db",
            "--table-name",
            "costs",
        ])
        .unwrap();

        assert_eq!(
            args.store,
            StoreConfig {
                db_path: PathBuf::from("/tmp/costs.db"),
                table_name: "costs".to_owned(),
            }
        );
    }

    #[test]
    fn table_name_has_default() {
        let args = TestArgs::try_parse_from(["test", "--db-path", "costs.db"]).unwrap();

        assert_eq!(args.store.table_name, DEFAULT_TABLE_NAME);
    }

    #[test]
    fn opens_database_file() {
        let directory = std::env::temp_dir().join(format!("expense-tracker-{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        let config = StoreConfig {
            db_path: directory.join("open.db"),
            table_name: DEFAULT_TABLE_NAME.to_owned(),
        };

        let connection = config.open();

        assert!(connection.is_ok());
        std::fs::remove_dir_all(directory).unwrap();
    }
}
