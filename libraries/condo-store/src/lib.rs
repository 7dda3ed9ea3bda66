//! Condo Control Local Store
//!
//! Holds the current application snapshot plus session user, and persists
//! the two durable keys the app needs across reloads: the remote document
//! id and the session mirror.
//!
//! The in-memory [`StateStore`] is the source of truth for rendering.
//! Mutations are optimistic: they are visible to readers synchronously,
//! before any remote call resolves, and are never rolled back when a sync
//! attempt fails.

#![forbid(unsafe_code)]

mod cache;
mod error;
mod state;

pub use cache::{LocalCache, SessionMirror};
pub use error::{Result, StoreError};
pub use state::StateStore;
