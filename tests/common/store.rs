//! In-memory stores standing in for PostgreSQL.

use async_trait::async_trait;
use chores_api::db::{Chore, ChoreStore, DbError, NameRecord};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Build a chore from an ISO date string.
pub fn chore(date: &str, name: &str, description: &str) -> Chore {
    Chore {
        date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date")),
        name: Some(name.to_string()),
        description: Some(description.to_string()),
    }
}

/// Accepts ISO dates and US-style month/day/year, like a default
/// PostgreSQL `DateStyle`.
fn parse_date(token: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
}

/// Store backed by vectors. Counts every call so tests can assert that
/// rejected requests never reached it.
#[derive(Default)]
pub struct MemoryStore {
    chores: Vec<Chore>,
    names: Vec<Option<String>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new(chores: Vec<Chore>, names: &[&str]) -> Self {
        Self {
            chores,
            names: names.iter().map(|n| Some(n.to_string())).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Add a row to the names table whose `name` is NULL.
    pub fn with_null_name(mut self) -> Self {
        self.names.push(None);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Rows ordered the way `ORDER BY date ASC` would return them,
    /// NULL dates last.
    fn sorted<'a>(&self, rows: impl Iterator<Item = &'a Chore>) -> Vec<Chore> {
        let mut rows: Vec<Chore> = rows.cloned().collect();
        rows.sort_by_key(|c| (c.date.is_none(), c.date));
        rows
    }
}

#[async_trait]
impl ChoreStore for MemoryStore {
    async fn all_chores(&self) -> Result<Vec<Chore>, DbError> {
        self.record_call();
        Ok(self.sorted(self.chores.iter()))
    }

    async fn chores_for(&self, name: &str) -> Result<Vec<Chore>, DbError> {
        self.record_call();
        Ok(self.sorted(
            self.chores
                .iter()
                .filter(|c| c.name.as_deref() == Some(name)),
        ))
    }

    async fn chore_on(
        &self,
        name: &str,
        date: &str,
    ) -> Result<Option<Option<String>>, DbError> {
        self.record_call();
        let date = parse_date(date).ok_or_else(|| {
            DbError::Query(sqlx::Error::Protocol(format!(
                "invalid input syntax for type date: \"{date}\""
            )))
        })?;
        Ok(self
            .chores
            .iter()
            .find(|c| c.name.as_deref() == Some(name) && c.date == Some(date))
            .map(|c| c.description.clone()))
    }

    async fn names(&self) -> Result<Vec<NameRecord>, DbError> {
        self.record_call();
        Ok(self
            .names
            .iter()
            .map(|name| NameRecord { name: name.clone() })
            .collect())
    }
}

/// Store whose database is never reachable.
pub struct FailingStore;

#[async_trait]
impl ChoreStore for FailingStore {
    async fn all_chores(&self) -> Result<Vec<Chore>, DbError> {
        Err(DbError::NotConfigured)
    }

    async fn chores_for(&self, _name: &str) -> Result<Vec<Chore>, DbError> {
        Err(DbError::NotConfigured)
    }

    async fn chore_on(
        &self,
        _name: &str,
        _date: &str,
    ) -> Result<Option<Option<String>>, DbError> {
        Err(DbError::NotConfigured)
    }

    async fn names(&self) -> Result<Vec<NameRecord>, DbError> {
        Err(DbError::NotConfigured)
    }
}
