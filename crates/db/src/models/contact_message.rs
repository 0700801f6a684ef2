//! Contact message entity model.

use contact_core::cursor::{Cursor, CursorKey};
use contact_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub consent: bool,
    pub source: String,
    pub created_at: Timestamp,
}

impl CursorKey for ContactMessage {
    fn cursor_key(&self) -> Cursor {
        Cursor::new(self.created_at, self.id)
    }
}

/// Response of the bulk-delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteCount {
    pub deleted: u64,
}
