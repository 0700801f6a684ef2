//! Domain logic for the contact backend.
//!
//! Everything in this crate is free of I/O: the cursor codec, the generic
//! cursor paginator, contact-message validation and shared primitive types.
//! Storage backends live in `contact_db` and plug in through
//! [`pagination::PageSource`].

pub mod contact;
pub mod cursor;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
