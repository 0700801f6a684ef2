//! Cursor pagination over a `(created_at DESC, id DESC)` ordered collection.
//!
//! The algorithm is storage-agnostic: a backend implements [`PageSource`]
//! (ordered range fetch, existence probe, count) and [`paginate`] turns a
//! parsed [`PageRequest`] into a [`Page`].
//!
//! Cursors are positions, not offsets, so a page stays stable when rows are
//! inserted or deleted elsewhere in the set. There is no snapshot spanning two
//! requests though: a row inserted or deleted between fetching page N and
//! page N+1 can still show up twice or be skipped relative to a snapshot view.

use std::num::IntErrorKind;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;

use crate::cursor::{Cursor, CursorError, CursorKey};

// ---------------------------------------------------------------------------
// Page size
// ---------------------------------------------------------------------------

/// Page size used when the client sends none, or something non-numeric.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page a client can ask for.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Turn the raw `limit` query value into a page size in `[1, MAX_PAGE_SIZE]`.
///
/// Never fails: missing or non-numeric input falls back to
/// [`DEFAULT_PAGE_SIZE`], integers too large for `i64` saturate.
pub fn clamp_limit(raw: Option<&str>) -> i64 {
    raw.and_then(parse_integer)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

fn parse_integer(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Navigation relative to a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Towards older records.
    #[default]
    Next,
    /// Towards newer records.
    Prev,
}

impl FromStr for Direction {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            other => Err(CursorError::Direction(other.to_string())),
        }
    }
}

/// A range relative to a boundary record, exclusive of the boundary itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seek {
    /// `created_at < c.created_at OR (created_at = c.created_at AND id < c.id)`.
    Older(Cursor),
    /// `created_at > c.created_at OR (created_at = c.created_at AND id > c.id)`.
    Newer(Cursor),
}

impl Seek {
    pub const fn boundary(&self) -> Cursor {
        match self {
            Self::Older(c) | Self::Newer(c) => *c,
        }
    }

    /// Whether a record at `key` lies inside this range.
    pub fn admits(&self, key: Cursor) -> bool {
        match self {
            Self::Older(c) => key < *c,
            Self::Newer(c) => key > *c,
        }
    }
}

/// A validated pagination request. Building one is the only place input
/// shape is checked, so a bad cursor never reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    /// `None` for the first (newest) page.
    pub seek: Option<Seek>,
}

impl PageRequest {
    /// Build a request from raw query values.
    ///
    /// Blank `cursor` and `direction` values count as absent. `direction` is
    /// only looked at when a cursor is present and defaults to
    /// [`Direction::Next`].
    pub fn parse(
        limit: Option<&str>,
        cursor: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Self, CursorError> {
        let limit = clamp_limit(limit);

        let Some(token) = cursor.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(Self { limit, seek: None });
        };

        let position = Cursor::decode(token)?;
        let direction = match direction.map(str::trim).filter(|d| !d.is_empty()) {
            Some(d) => d.parse()?,
            None => Direction::default(),
        };

        let seek = match direction {
            Direction::Next => Seek::Older(position),
            Direction::Prev => Seek::Newer(position),
        };

        Ok(Self {
            limit,
            seek: Some(seek),
        })
    }

    /// First page of `limit` records.
    pub fn first(limit: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            seek: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Storage seam
// ---------------------------------------------------------------------------

/// The three storage primitives the paginator needs.
///
/// `fetch_range` ordering contract:
///
/// | `seek`          | rows                         | order                     |
/// |-----------------|------------------------------|---------------------------|
/// | `None`          | all matching                 | `created_at DESC, id DESC`|
/// | `Some(Older)`   | strictly older than boundary | `created_at DESC, id DESC`|
/// | `Some(Newer)`   | strictly newer than boundary | `created_at ASC, id ASC`  |
///
/// In every case at most `limit` rows, nearest to the boundary first.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Record: CursorKey + Send;
    type Filter: Send + Sync;
    type Error: Send;

    async fn fetch_range(
        &self,
        filter: &Self::Filter,
        seek: Option<Seek>,
        limit: i64,
    ) -> Result<Vec<Self::Record>, Self::Error>;

    /// Whether any record matching `filter` lies in `seek`.
    async fn exists_beyond(&self, filter: &Self::Filter, seek: Seek) -> Result<bool, Self::Error>;

    /// Number of records matching `filter`, ignoring position.
    async fn count(&self, filter: &Self::Filter) -> Result<i64, Self::Error>;
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One page of results, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub limit: i64,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
}

/// Fetch one page.
///
/// Boundary cursors come from existence probes rather than from `count` or
/// from whether the page came back full: exactly `limit` remaining rows fill
/// the page with nothing after it.
pub async fn paginate<S>(
    source: &S,
    filter: &S::Filter,
    request: &PageRequest,
) -> Result<Page<S::Record>, S::Error>
where
    S: PageSource + ?Sized,
{
    let count = source.count(filter).await?;

    let mut results = source
        .fetch_range(filter, request.seek, request.limit)
        .await?;
    if matches!(request.seek, Some(Seek::Newer(_))) {
        results.reverse();
    }

    let edges = results
        .first()
        .zip(results.last())
        .map(|(first, last)| (first.cursor_key(), last.cursor_key()));

    let (prev_cursor, next_cursor) = match edges {
        Some((newest, oldest)) => {
            let prev = source
                .exists_beyond(filter, Seek::Newer(newest))
                .await?
                .then(|| newest.encode());
            let next = source
                .exists_beyond(filter, Seek::Older(oldest))
                .await?
                .then(|| oldest.encode());
            (prev, next)
        }
        None => (None, None),
    };

    Ok(Page {
        count,
        limit: request.limit,
        results,
        next_cursor,
        prev_cursor,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
