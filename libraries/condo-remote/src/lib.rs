//! Condo Control Remote Store Client
//!
//! HTTP client for a single-document JSON blob store (jsonblob-style API)
//! plus a best-effort public-address lookup.
//!
//! The store holds one opaque JSON document per id, with whole-document
//! replace semantics: no partial updates, no pagination, no auth beyond the
//! id acting as a bearer secret. Whoever holds the id can read and
//! overwrite the whole snapshot, so ids are never logged above debug level.
//!
//! # Example
//!
//! ```ignore
//! use condo_core::Snapshot;
//! use condo_remote::DocumentClient;
//!
//! let client = DocumentClient::new("https://jsonblob.com/api/jsonBlob")?;
//!
//! // Mint a fresh document seeded with the fixed house list
//! let id = client.create(&Snapshot::seed()).await?;
//!
//! // Read it back and overwrite it unconditionally (last-write-wins)
//! let snapshot = client.fetch(&id).await?;
//! client.replace(&id, &snapshot).await?;
//! ```

#![forbid(unsafe_code)]

mod client;
mod error;
mod lookup;

pub use client::DocumentClient;
pub use error::{RemoteStoreError, Result};
pub use lookup::{AddressLookup, DEFAULT_LOOKUP_URL};
