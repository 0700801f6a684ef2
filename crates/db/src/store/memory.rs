use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use contact_core::contact::{ContactSubmission, MessageFilter};
use contact_core::cursor::CursorKey;
use contact_core::pagination::{PageSource, Seek};
use contact_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use super::{MessageStore, StoreError};
use crate::models::contact_message::ContactMessage;

/// Process-local [`MessageStore`].
///
/// Mirrors the PostgreSQL behaviour that matters to pagination: ids are
/// assigned monotonically and timestamps are kept at microsecond precision,
/// so cursors round-trip exactly. [`set_offline`](Self::set_offline) makes
/// every operation fail, for exercising outage paths.
#[derive(Default)]
pub struct InMemoryMessageStore {
    inner: RwLock<Inner>,
    offline: AtomicBool,
}

#[derive(Default)]
struct Inner {
    last_id: DbId,
    rows: Vec<ContactMessage>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with an explicit creation time.
    pub async fn insert_at(
        &self,
        input: &ContactSubmission,
        created_at: Timestamp,
    ) -> ContactMessage {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let row = ContactMessage {
            id: inner.last_id,
            name: input.name.clone(),
            email: input.email.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            consent: input.consent,
            source: input.source.clone(),
            created_at: created_at.trunc_subsecs(6),
        };
        inner.rows.push(row.clone());
        row
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store is offline".into()));
        }
        Ok(())
    }
}

fn matches(filter: &MessageFilter, row: &ContactMessage) -> bool {
    filter.matches(&row.name, &row.email, &row.subject)
}

#[async_trait]
impl PageSource for InMemoryMessageStore {
    type Record = ContactMessage;
    type Filter = MessageFilter;
    type Error = StoreError;

    async fn fetch_range(
        &self,
        filter: &MessageFilter,
        seek: Option<Seek>,
        limit: i64,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        self.check_online()?;
        let inner = self.inner.read().await;

        let mut rows: Vec<ContactMessage> = inner
            .rows
            .iter()
            .filter(|row| matches(filter, row))
            .filter(|row| seek.map_or(true, |s| s.admits(row.cursor_key())))
            .cloned()
            .collect();

        match seek {
            Some(Seek::Newer(_)) => rows.sort_by_key(CursorKey::cursor_key),
            _ => rows.sort_by_key(|row| std::cmp::Reverse(row.cursor_key())),
        }
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn exists_beyond(&self, filter: &MessageFilter, seek: Seek) -> Result<bool, StoreError> {
        self.check_online()?;
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .iter()
            .any(|row| matches(filter, row) && seek.admits(row.cursor_key())))
    }

    async fn count(&self, filter: &MessageFilter) -> Result<i64, StoreError> {
        self.check_online()?;
        let inner = self.inner.read().await;
        let count = inner.rows.iter().filter(|row| matches(filter, row)).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn create(&self, input: &ContactSubmission) -> Result<ContactMessage, StoreError> {
        self.check_online()?;
        Ok(self.insert_at(input, Utc::now()).await)
    }

    async fn delete_many(&self, ids: &[DbId]) -> Result<u64, StoreError> {
        self.check_online()?;
        let mut inner = self.inner.write().await;
        let before = inner.rows.len();
        inner.rows.retain(|row| !ids.contains(&row.id));
        Ok((before - inner.rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
