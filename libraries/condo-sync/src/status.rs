/// Sync status surfaced to the view layer.
///
/// Derived solely from synchronizer state; a view renders it as a badge
/// and must never block mutation entry points on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// A pull or push is in flight
    Syncing,
    /// The last sync attempt failed; data keeps saving on this device
    LocalMode,
    /// Last sync succeeded
    CloudActive,
}

/// Result of a pull cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// Remote document fetched and adopted
    Loaded,
    /// No known id; a fresh document was created from the seed snapshot
    Created,
    /// The manually supplied code does not exist or has expired
    InvalidCode,
    /// Remote unreachable, or stale-id recovery left this cycle errored
    Offline,
    /// A pull was already in flight; this request was ignored
    AlreadySyncing,
}
