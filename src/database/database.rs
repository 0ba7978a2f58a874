use log::info;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio_rusqlite::Connection;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),
    #[error("Database connection error: {0}")]
    Connection(String),
}

/// Async key-value store over a local SQLite file. The history ledger is
/// persisted as one blob under a single key.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Connection>,
}

impl Database {
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        let db = Self {
            conn: Arc::new(conn),
        };
        db.initialize().await?;
        Ok(db)
    }

    pub async fn in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        let db = Self {
            conn: Arc::new(conn),
        };
        db.initialize().await?;
        Ok(db)
    }

    async fn initialize(&self) -> Result<(), DatabaseError> {
        // Create tables if they don't exist
        self.conn
            .call(|conn| {
                conn.execute_batch(
                    "CREATE TABLE IF NOT EXISTS app_storage (
                        id INTEGER PRIMARY KEY,
                        key TEXT UNIQUE NOT NULL,
                        value TEXT NOT NULL,
                        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
                    );",
                )
            })
            .await?;

        info!("Database initialized successfully");
        Ok(())
    }

    pub async fn set_value(&self, key: String, value: String) -> Result<(), DatabaseError> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT OR REPLACE INTO app_storage (key, value) VALUES (?1, ?2)",
                    [&key, &value],
                )
            })
            .await?;

        Ok(())
    }

    pub async fn get_value(&self, key: String) -> Result<Option<String>, DatabaseError> {
        let result = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM app_storage WHERE key = ?")?;
                let mut rows = stmt.query([&key])?;

                if let Some(row) = rows.next()? {
                    Ok(Some(row.get::<_, String>(0)?))
                } else {
                    Ok(None)
                }
            })
            .await?;

        Ok(result)
    }
}
