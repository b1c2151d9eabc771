use crate::TestDb;
use std::borrow::Cow;
use tempfile::TempDir;
use thiserror::Error;

/// A file-backed sqlite database in a temp directory, removed on drop.
pub struct SqliteDb {
    // Held so the directory outlives the connection
    #[allow(dead_code)]
    temp_dir: TempDir,
    uri: String,
}

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SqliteDb {
    pub fn new() -> Result<Self, SqliteError> {
        let temp_dir = TempDir::with_prefix("anketo-test-db")?;
        let path = temp_dir.path().join("anketo.sqlite");
        let path = path
            .to_str()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidData, "non-utf8 temp path"))?;
        let uri = format!("sqlite://{path}?mode=rwc");

        tracing::debug!(uri, "created test database");
        Ok(Self { temp_dir, uri })
    }
}

impl TestDb for SqliteDb {
    fn db_uri(&self) -> Cow<'_, str> {
        self.uri.as_str().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_create_and_drop() {
        let db = SqliteDb::new().unwrap();
        assert!(db.db_uri().starts_with("sqlite://"));
        drop(db);
    }
}
