//! Counting fakes for the store and discovery capabilities.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::store::{FaviconRecord, FaviconStore, NewFavicon};
use crate::{Discover, Error};

#[derive(Debug, Default)]
pub struct Calls {
    pub find: AtomicUsize,
    pub insert: AtomicUsize,
    pub update: AtomicUsize,
    pub max_id: AtomicUsize,
    pub drop: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        [&self.find, &self.insert, &self.update, &self.max_id, &self.drop].iter().map(|c| Self::get(c)).sum()
    }

    pub fn writes(&self) -> usize {
        Self::get(&self.insert) + Self::get(&self.update)
    }
}

/// In-memory store that records every call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub records: Mutex<Vec<FaviconRecord>>,
    pub updated_ids: Mutex<Vec<i64>>,
    pub calls: Calls,
    pub fail: AtomicBool,
}

impl MemoryStore {
    pub fn with_records(records: &[(i64, &str, &str)]) -> Self {
        let store = Self::default();
        store.records.lock().unwrap().extend(records.iter().map(|(id, url, favicon_url)| FaviconRecord {
            id: *id,
            url: url.to_string(),
            favicon_url: favicon_url.to_string(),
            last_modified: "2024-01-01T00:00:00+00:00".to_string(),
        }));
        store
    }

    pub fn snapshot(&self) -> Vec<FaviconRecord> {
        self.records.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), Error> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Database(tokio_rusqlite::Error::ConnectionClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl FaviconStore for MemoryStore {
    async fn find_one(&self, url: &str) -> Result<Option<FaviconRecord>, Error> {
        self.calls.find.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        tokio::task::yield_now().await;
        Ok(self.records.lock().unwrap().iter().find(|r| r.url == url).cloned())
    }

    async fn insert_one(&self, record: NewFavicon) -> Result<i64, Error> {
        self.calls.insert.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        tokio::task::yield_now().await;
        let mut records = self.records.lock().unwrap();
        records.push(FaviconRecord {
            id: record.id,
            url: record.url,
            favicon_url: record.favicon_url,
            last_modified: chrono::Utc::now().to_rfc3339(),
        });
        Ok(record.id)
    }

    async fn update_one(&self, id: i64, favicon_url: &str) -> Result<bool, Error> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.updated_ids.lock().unwrap().push(id);
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.favicon_url = favicon_url.to_string();
                record.last_modified = chrono::Utc::now().to_rfc3339();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn max_id(&self) -> Result<i64, Error> {
        self.calls.max_id.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        tokio::task::yield_now().await;
        Ok(self.records.lock().unwrap().iter().map(|r| r.id).max().unwrap_or(-1))
    }

    async fn drop_collection(&self) -> Result<(), Error> {
        self.calls.drop.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.records.lock().unwrap().clear();
        Ok(())
    }
}

/// Discovery fake answering from a fixed table, falling back to `default`.
#[derive(Debug, Default)]
pub struct FakeDiscover {
    pub answers: HashMap<String, Result<Option<String>, String>>,
    pub default: Option<String>,
    pub calls: AtomicUsize,
    pub delay: Option<Duration>,
}

impl FakeDiscover {
    pub fn found(favicon_url: &str) -> Self {
        Self { default: Some(favicon_url.to_string()), ..Default::default() }
    }

    pub fn nothing() -> Self {
        Self::default()
    }

    pub fn answer(mut self, url: &str, answer: Result<Option<&str>, &str>) -> Self {
        let answer = answer.map(|found| found.map(str::to_string)).map_err(str::to_string);
        self.answers.insert(url.to_string(), answer);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Discover for FakeDiscover {
    async fn discover(&self, url: &str) -> Result<Option<String>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.answers.get(url) {
            Some(Ok(found)) => Ok(found.clone()),
            Some(Err(msg)) => Err(Error::HttpError(msg.clone())),
            None => Ok(self.default.clone()),
        }
    }
}
