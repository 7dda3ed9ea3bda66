use condo_core::ValidationError;
use thiserror::Error;

/// Errors surfaced by mutation entry points.
///
/// Remote failures never appear here: they are recorded on the sync status
/// indicator and the optimistic local mutation stands.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Administrator access required")]
    NotAuthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
