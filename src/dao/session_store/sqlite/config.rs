use std::path::PathBuf;

/// Runtime configuration describing where the SQLite database lives.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl SqliteConfig {
    /// Construct a configuration for an explicit database path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: 5,
        }
    }

    /// Build a configuration from the `TRIVIA_SQLITE_PATH` environment
    /// variable, falling back to the conventional location.
    pub fn from_env() -> Self {
        let path = std::env::var_os("TRIVIA_SQLITE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data/db.sqlite3"));
        Self::new(path)
    }
}
