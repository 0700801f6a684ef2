use async_trait::async_trait;
use contact_core::contact::{ContactSubmission, MessageFilter};
use contact_core::pagination::{PageSource, Seek};
use contact_core::types::DbId;

use super::{MessageStore, StoreError};
use crate::models::contact_message::ContactMessage;
use crate::repositories::ContactMessageRepo;
use crate::DbPool;

/// [`MessageStore`] backed by the `contact_messages` table.
#[derive(Clone)]
pub struct PgMessageStore {
    pool: DbPool,
}

impl PgMessageStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageSource for PgMessageStore {
    type Record = ContactMessage;
    type Filter = MessageFilter;
    type Error = StoreError;

    async fn fetch_range(
        &self,
        filter: &MessageFilter,
        seek: Option<Seek>,
        limit: i64,
    ) -> Result<Vec<ContactMessage>, StoreError> {
        Ok(ContactMessageRepo::list_range(&self.pool, filter, seek, limit).await?)
    }

    async fn exists_beyond(&self, filter: &MessageFilter, seek: Seek) -> Result<bool, StoreError> {
        Ok(ContactMessageRepo::exists_beyond(&self.pool, filter, seek).await?)
    }

    async fn count(&self, filter: &MessageFilter) -> Result<i64, StoreError> {
        Ok(ContactMessageRepo::count(&self.pool, filter).await?)
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn create(&self, input: &ContactSubmission) -> Result<ContactMessage, StoreError> {
        Ok(ContactMessageRepo::create(&self.pool, input).await?)
    }

    async fn delete_many(&self, ids: &[DbId]) -> Result<u64, StoreError> {
        Ok(ContactMessageRepo::delete_many(&self.pool, ids).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
