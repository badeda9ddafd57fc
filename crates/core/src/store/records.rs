//! Favicon record CRUD operations on SQLite.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

use super::connection::FaviconDb;
use super::{FaviconRecord, FaviconStore, NewFavicon};
use crate::Error;

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FaviconRecord> {
    Ok(FaviconRecord { id: row.get(0)?, url: row.get(1)?, favicon_url: row.get(2)?, last_modified: row.get(3)? })
}

impl FaviconDb {
    /// Get a record by id.
    ///
    /// Returns None if no record has that id.
    pub async fn get(&self, id: i64) -> Result<Option<FaviconRecord>, Error> {
        self.conn
            .call(move |conn| -> Result<Option<FaviconRecord>, Error> {
                let result = conn.query_row(
                    "SELECT id, url, favicon_url, last_modified FROM favicons WHERE id = ?1",
                    params![id],
                    record_from_row,
                );

                match result {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM favicons", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl FaviconStore for FaviconDb {
    async fn find_one(&self, url: &str) -> Result<Option<FaviconRecord>, Error> {
        let url = url.to_string();
        self.conn
            .call(move |conn| -> Result<Option<FaviconRecord>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, url, favicon_url, last_modified FROM favicons
                     WHERE url = ?1 ORDER BY id ASC LIMIT 1",
                )?;

                match stmt.query_row(params![url], record_from_row) {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    async fn insert_one(&self, record: NewFavicon) -> Result<i64, Error> {
        let last_modified = now();
        self.conn
            .call(move |conn| -> Result<i64, Error> {
                conn.execute(
                    "INSERT INTO favicons (id, url, favicon_url, last_modified) VALUES (?1, ?2, ?3, ?4)",
                    params![record.id, record.url, record.favicon_url, last_modified],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(Error::from)
    }

    async fn update_one(&self, id: i64, favicon_url: &str) -> Result<bool, Error> {
        let favicon_url = favicon_url.to_string();
        let last_modified = now();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let changed = conn.execute(
                    "UPDATE favicons SET favicon_url = ?1, last_modified = ?2 WHERE id = ?3",
                    params![favicon_url, last_modified, id],
                )?;
                Ok(changed > 0)
            })
            .await
            .map_err(Error::from)
    }

    async fn max_id(&self) -> Result<i64, Error> {
        self.conn
            .call(|conn| -> Result<i64, Error> {
                let max: i64 = conn.query_row("SELECT COALESCE(MAX(id), -1) FROM favicons", [], |row| row.get(0))?;
                Ok(max)
            })
            .await
            .map_err(Error::from)
    }

    async fn drop_collection(&self) -> Result<(), Error> {
        self.conn
            .call(|conn| -> Result<(), Error> {
                let deleted = conn.execute("DELETE FROM favicons", [])?;
                tracing::info!(deleted, "dropped favicon collection");
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_favicon(id: i64, url: &str) -> NewFavicon {
        NewFavicon { id, url: url.to_string(), favicon_url: format!("{url}/favicon.ico") }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = FaviconDb::open_in_memory().await.unwrap();
        let rowid = db.insert_one(new_favicon(7, "http://www.example.com")).await.unwrap();
        assert_eq!(rowid, 7);

        let found = db.find_one("http://www.example.com").await.unwrap().unwrap();
        assert_eq!(found.id, 7);
        assert_eq!(found.favicon_url, "http://www.example.com/favicon.ico");
        assert!(chrono::DateTime::parse_from_rfc3339(&found.last_modified).is_ok());
    }

    #[tokio::test]
    async fn test_find_missing() {
        let db = FaviconDb::open_in_memory().await.unwrap();
        assert!(db.find_one("http://www.nowhere.test").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_max_id_empty_is_minus_one() {
        let db = FaviconDb::open_in_memory().await.unwrap();
        assert_eq!(db.max_id().await.unwrap(), -1);

        db.insert_one(new_favicon(3, "http://www.a.test")).await.unwrap();
        db.insert_one(new_favicon(11, "http://www.b.test")).await.unwrap();
        assert_eq!(db.max_id().await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_restamps() {
        let db = FaviconDb::open_in_memory().await.unwrap();
        db.insert_one(new_favicon(0, "http://www.example.com")).await.unwrap();
        let before = db.get(0).await.unwrap().unwrap();

        assert!(db.update_one(0, "http://www.example.com/new.png").await.unwrap());

        let after = db.get(0).await.unwrap().unwrap();
        assert_eq!(after.id, 0);
        assert_eq!(after.url, before.url);
        assert_eq!(after.favicon_url, "http://www.example.com/new.png");
        assert!(after.last_modified >= before.last_modified);
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let db = FaviconDb::open_in_memory().await.unwrap();
        assert!(!db.update_one(42, "http://www.example.com/favicon.ico").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let db = FaviconDb::open_in_memory().await.unwrap();
        db.insert_one(new_favicon(1, "http://www.a.test")).await.unwrap();
        let err = db.insert_one(new_favicon(1, "http://www.b.test")).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::StoreFailure);
    }

    #[tokio::test]
    async fn test_drop_collection() {
        let db = FaviconDb::open_in_memory().await.unwrap();
        db.insert_one(new_favicon(1, "http://www.a.test")).await.unwrap();
        db.insert_one(new_favicon(2, "http://www.b.test")).await.unwrap();
        assert_eq!(db.count().await.unwrap(), 2);

        db.drop_collection().await.unwrap();
        assert_eq!(db.count().await.unwrap(), 0);
        assert_eq!(db.max_id().await.unwrap(), -1);
    }
}
