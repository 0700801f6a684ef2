//! Opaque position tokens for cursor pagination.
//!
//! A [`Cursor`] is the `(created_at, id)` pair of the record sitting on a page
//! boundary. On the wire it travels as base64url over a compact JSON object:
//!
//! ```text
//! {"created_at":"2024-05-01T12:30:00.123456+00:00","id":42}
//! ```
//!
//! Tokens are emitted without `=` padding. Decoding accepts padded and
//! unpadded input, and rejects anything that does not yield a well-formed,
//! offset-aware timestamp plus an integer id.

use std::cmp::Ordering;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::types::{DbId, Timestamp};

/// base64url, unpadded on encode, padding-agnostic on decode.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Reasons a caller-supplied cursor or navigation direction is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("cursor is not valid base64url")]
    Encoding,

    #[error("cursor payload is malformed: {0}")]
    Payload(String),

    #[error("cursor timestamp '{0}' is not an offset-aware ISO-8601 datetime")]
    Timestamp(String),

    #[error("direction must be 'next' or 'prev', got '{0}'")]
    Direction(String),
}

/// A position in the `(created_at DESC, id DESC)` ordering.
///
/// `Ord` compares `created_at` first and breaks ties on `id`, so a greater
/// cursor is a newer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub created_at: Timestamp,
    pub id: DbId,
}

#[derive(Deserialize)]
struct RawPayload {
    created_at: String,
    id: DbId,
}

impl Cursor {
    pub const fn new(created_at: Timestamp, id: DbId) -> Self {
        Self { created_at, id }
    }

    /// Encode into the opaque token handed to clients.
    pub fn encode(&self) -> String {
        let payload = serde_json::json!({
            "created_at": isoformat(&self.created_at),
            "id": self.id,
        });
        TOKEN_ENGINE.encode(payload.to_string())
    }

    /// Decode a client-supplied token.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = TOKEN_ENGINE
            .decode(token.trim())
            .map_err(|_| CursorError::Encoding)?;

        let raw: RawPayload =
            serde_json::from_slice(&bytes).map_err(|e| CursorError::Payload(e.to_string()))?;

        let created_at = DateTime::parse_from_rfc3339(&raw.created_at)
            .map_err(|_| CursorError::Timestamp(raw.created_at.clone()))?
            .with_timezone(&Utc);

        Ok(Self::new(created_at, raw.id))
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then(self.id.cmp(&other.id))
    }
}

/// Implemented by anything that can sit on a page boundary.
pub trait CursorKey {
    fn cursor_key(&self) -> Cursor;
}

impl CursorKey for Cursor {
    fn cursor_key(&self) -> Cursor {
        *self
    }
}

/// ISO-8601 with an explicit `+00:00` offset; the fraction is written as
/// microseconds and omitted entirely when zero.
fn isoformat(ts: &Timestamp) -> String {
    let format = if ts.timestamp_subsec_nanos() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    ts.to_rfc3339_opts(format, false)
}
