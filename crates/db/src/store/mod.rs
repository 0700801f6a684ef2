//! The storage seam behind the HTTP layer.
//!
//! [`MessageStore`] extends the paginator's [`PageSource`] with the remaining
//! operations the API needs, so handlers hold an `Arc<dyn MessageStore>` and
//! never see which backend is behind it.

use async_trait::async_trait;
use contact_core::contact::{ContactSubmission, MessageFilter};
use contact_core::pagination::PageSource;
use contact_core::types::DbId;

use crate::models::contact_message::ContactMessage;

mod memory;
mod postgres;

pub use memory::InMemoryMessageStore;
pub use postgres::PgMessageStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait MessageStore:
    PageSource<Record = ContactMessage, Filter = MessageFilter, Error = StoreError>
{
    /// Persist a cleaned submission; storage assigns `id` and `created_at`.
    async fn create(&self, input: &ContactSubmission) -> Result<ContactMessage, StoreError>;

    /// Delete by id, returning how many rows went away.
    async fn delete_many(&self, ids: &[DbId]) -> Result<u64, StoreError>;

    /// Cheap reachability check for the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
