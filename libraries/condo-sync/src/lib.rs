//! Condo Control Synchronizer
//!
//! Bridges the local state store and the remote document store: owns the
//! document-id lifecycle, pulls the remote snapshot on login, applies
//! mutations optimistically, and pushes the full snapshot back under a
//! min-interval throttle.
//!
//! Failure semantics are deliberately simple: local data is authoritative
//! for this device, sync failures only flip a status indicator, and there
//! is no automatic retry loop. Recovery rides on the next mutation or an
//! explicit refresh.

#![forbid(unsafe_code)]

mod error;
mod status;
mod synchronizer;
mod throttle;

// Public exports
pub use error::{Result, SyncError};
pub use status::{PullOutcome, SyncStatus};
pub use synchronizer::Synchronizer;
pub use throttle::{PushThrottle, PUSH_MIN_INTERVAL};
