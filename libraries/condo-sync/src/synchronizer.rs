use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use condo_core::{
    Expense, ExpenseDraft, Payment, PaymentDraft, Snapshot, Suggestion, SuggestionStatus, User,
    ValidationError,
};
use condo_remote::{AddressLookup, DocumentClient, RemoteStoreError};
use condo_store::{LocalCache, SessionMirror, StateStore};

use crate::error::{Result, SyncError};
use crate::status::{PullOutcome, SyncStatus};
use crate::throttle::{PushThrottle, PUSH_MIN_INTERVAL};

/// Orchestrates the local store, the durable cache and the remote document
/// store.
///
/// Cheap to clone and share: all state lives behind an `Arc`. Mutations
/// commit locally first and schedule a throttled background push of the
/// full snapshot; remote failures never roll a mutation back.
#[derive(Clone)]
pub struct Synchronizer {
    inner: Arc<Inner>,
}

struct Inner {
    client: DocumentClient,
    cache: LocalCache,
    lookup: Option<AddressLookup>,
    store: RwLock<StateStore>,
    /// In-memory copy of the remote document id. Loaded from the cache at
    /// startup, authoritative over it afterwards.
    document_id: Mutex<Option<String>>,
    throttle: Mutex<PushThrottle>,
    /// Handles of scheduled push tasks, awaited by [`Synchronizer::settle`].
    tasks: Mutex<JoinSet<()>>,
    /// Count of in-flight pulls and pushes, for the status badge.
    active: AtomicUsize,
    /// Re-entrancy guard: only one pull cycle at a time.
    pull_active: AtomicBool,
    /// Whether the most recent sync attempt failed.
    last_error: AtomicBool,
}

/// Increments the in-flight counter for its scope.
struct ActivityGuard<'a>(&'a AtomicUsize);

impl<'a> ActivityGuard<'a> {
    fn begin(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for ActivityGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Releases the pull re-entrancy flag on every exit path.
struct PullGuard<'a>(&'a AtomicBool);

impl Drop for PullGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Synchronizer {
    /// Build a synchronizer without public-address lookup. The local store
    /// starts from the seed snapshot and the document id is restored from
    /// the cache when present.
    pub fn new(client: DocumentClient, cache: LocalCache) -> Self {
        Self::with_options(client, cache, None)
    }

    pub fn with_options(
        client: DocumentClient,
        cache: LocalCache,
        lookup: Option<AddressLookup>,
    ) -> Self {
        let document_id = cache.document_id();
        Self {
            inner: Arc::new(Inner {
                client,
                cache,
                lookup,
                store: RwLock::new(StateStore::with_snapshot(Snapshot::seed())),
                document_id: Mutex::new(document_id),
                throttle: Mutex::new(PushThrottle::new(PUSH_MIN_INTERVAL)),
                tasks: Mutex::new(JoinSet::new()),
                active: AtomicUsize::new(0),
                pull_active: AtomicBool::new(false),
                last_error: AtomicBool::new(false),
            }),
        }
    }

    /// Start a session and pull the remote document. The session is opened
    /// even when the pull ends offline; data keeps saving locally.
    pub async fn login(&self, user: User, manual_id: Option<&str>) -> PullOutcome {
        info!(username = %user.username, role = ?user.role, "Opening session");
        self.inner.store.write().await.set_user(Some(user));
        self.pull(manual_id).await
    }

    /// End the session. Local data stays on this device.
    pub async fn logout(&self) {
        info!("Closing session");
        self.inner.store.write().await.set_user(None);
    }

    /// Run one pull cycle.
    ///
    /// The candidate id is, in order: `manual_id`, the in-memory id, the
    /// cached id. With no candidate a fresh document is created from the
    /// seed snapshot. A manual id that does not resolve is reported as
    /// invalid without touching the stored id; a stored id that stopped
    /// resolving is forgotten and a replacement document is created, with
    /// the cycle still reported as errored.
    pub async fn pull(&self, manual_id: Option<&str>) -> PullOutcome {
        let inner = &self.inner;
        if inner.pull_active.swap(true, Ordering::SeqCst) {
            debug!("Pull already in flight, ignoring");
            return PullOutcome::AlreadySyncing;
        }
        let _pull = PullGuard(&inner.pull_active);
        let _activity = ActivityGuard::begin(&inner.active);

        let manual = manual_id.map(str::trim).filter(|s| !s.is_empty());
        let current = inner.document_id.lock().await.clone();
        let candidate = match manual.map(str::to_string).or(current) {
            Some(id) => Some(id),
            None => inner.cached_document_id().await,
        };

        let Some(id) = candidate else {
            return match inner.create_seed_document().await {
                Ok(id) => {
                    info!(id = %id, "Created fresh remote document");
                    inner.last_error.store(false, Ordering::SeqCst);
                    PullOutcome::Created
                }
                Err(e) => {
                    error!(error = %e, "Could not create remote document, staying local");
                    inner.last_error.store(true, Ordering::SeqCst);
                    PullOutcome::Offline
                }
            };
        };

        match inner.client.fetch(&id).await {
            Ok(mut snapshot) => {
                // A document stored before the house list existed gets the
                // seed houses grafted in.
                if snapshot.houses.is_empty() {
                    snapshot.houses = condo_core::seed::seed_houses();
                }
                *inner.document_id.lock().await = Some(id.clone());
                inner.persist_document_id(&id).await;
                inner.store.write().await.replace_snapshot(snapshot);
                inner.mirror_session().await;
                inner.last_error.store(false, Ordering::SeqCst);
                PullOutcome::Loaded
            }
            Err(RemoteStoreError::NotFound(_)) if manual.is_some() => {
                warn!(id = %id, "Supplied linking code does not resolve");
                inner.last_error.store(true, Ordering::SeqCst);
                PullOutcome::InvalidCode
            }
            Err(RemoteStoreError::NotFound(_)) => {
                warn!(id = %id, "Stored document id went stale, minting a replacement");
                *inner.document_id.lock().await = None;
                inner.forget_document_id().await;
                if let Err(e) = inner.create_seed_document().await {
                    error!(error = %e, "Replacement document creation failed");
                }
                // The cycle is reported errored even when recovery worked,
                // so the user sees the data loss.
                inner.last_error.store(true, Ordering::SeqCst);
                PullOutcome::Offline
            }
            Err(e) => {
                error!(error = %e, "Pull failed, keeping local data");
                inner.last_error.store(true, Ordering::SeqCst);
                PullOutcome::Offline
            }
        }
    }

    /// Validate and record a payment, then schedule a push.
    pub async fn record_payment(&self, draft: PaymentDraft) -> Result<Payment> {
        let inner = &self.inner;
        let payment = {
            let mut store = inner.store.write().await;
            if store.user().is_none() {
                return Err(SyncError::NotLoggedIn);
            }
            let house = draft.house_id.trim();
            if !house.is_empty() && !store.snapshot().house_exists(house) {
                return Err(ValidationError::UnknownHouse(house.to_string()).into());
            }
            let payment = draft.build()?;
            store.append_payment(payment.clone());
            payment
        };
        inner.mirror_session().await;
        self.schedule_push().await;
        Ok(payment)
    }

    /// Delete a payment. Administrator only; unknown ids are a no-op that
    /// still schedules a push.
    pub async fn delete_payment(&self, id: &str) -> Result<()> {
        let inner = &self.inner;
        {
            let mut store = inner.store.write().await;
            Self::require_admin(&store)?;
            store.remove_payment(id);
        }
        inner.mirror_session().await;
        self.schedule_push().await;
        Ok(())
    }

    /// Validate and record an expense. Administrator only.
    pub async fn record_expense(&self, draft: ExpenseDraft) -> Result<Expense> {
        let inner = &self.inner;
        let expense = {
            let mut store = inner.store.write().await;
            Self::require_admin(&store)?;
            let expense = draft.build()?;
            store.append_expense(expense.clone());
            expense
        };
        inner.mirror_session().await;
        self.schedule_push().await;
        Ok(expense)
    }

    /// Record a suggestion for the logged-in user's house (or the admin
    /// sentinel). The public-address lookup is best effort and runs only
    /// after the message has passed validation.
    pub async fn submit_suggestion(&self, message: &str) -> Result<Suggestion> {
        let inner = &self.inner;
        let house = {
            let store = inner.store.read().await;
            let user = store.user().ok_or(SyncError::NotLoggedIn)?;
            user.suggestion_house().to_string()
        };
        let mut suggestion = Suggestion::build(house, message, None)?;
        if let Some(lookup) = &inner.lookup {
            suggestion.ip_address = lookup.public_address().await;
        }
        let suggestion = {
            let mut store = inner.store.write().await;
            if store.user().is_none() {
                return Err(SyncError::NotLoggedIn);
            }
            store.append_suggestion(suggestion.clone());
            suggestion
        };
        inner.mirror_session().await;
        self.schedule_push().await;
        Ok(suggestion)
    }

    /// Change a suggestion's status. Administrator only; unknown ids are a
    /// no-op that still schedules a push.
    pub async fn set_suggestion_status(&self, id: &str, status: SuggestionStatus) -> Result<()> {
        let inner = &self.inner;
        {
            let mut store = inner.store.write().await;
            Self::require_admin(&store)?;
            store.update_suggestion_status(id, status);
        }
        inner.mirror_session().await;
        self.schedule_push().await;
        Ok(())
    }

    /// Current status for the badge.
    pub fn status(&self) -> SyncStatus {
        if self.inner.active.load(Ordering::SeqCst) > 0 {
            SyncStatus::Syncing
        } else if self.inner.last_error.load(Ordering::SeqCst) {
            SyncStatus::LocalMode
        } else {
            SyncStatus::CloudActive
        }
    }

    /// The linking code for this device, once known.
    pub async fn document_id(&self) -> Option<String> {
        self.inner.document_id.lock().await.clone()
    }

    /// Clone of the current snapshot, for rendering.
    pub async fn snapshot(&self) -> Snapshot {
        self.inner.store.read().await.snapshot().clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.inner.store.read().await.user().cloned()
    }

    /// Wait for every scheduled push task to finish.
    pub async fn settle(&self) {
        let mut tasks = self.inner.tasks.lock().await;
        while tasks.join_next().await.is_some() {}
    }

    fn require_admin(store: &StateStore) -> Result<()> {
        let user = store.user().ok_or(SyncError::NotLoggedIn)?;
        if user.is_admin() {
            Ok(())
        } else {
            Err(SyncError::NotAuthorized)
        }
    }

    /// Schedule a background push. The snapshot is captured when the task
    /// runs, not when it is scheduled, so pushes coalesced by the throttle
    /// still carry every mutation committed before the surviving push.
    async fn schedule_push(&self) {
        let inner = Arc::clone(&self.inner);
        self.inner
            .tasks
            .lock()
            .await
            .spawn(async move { inner.push_now().await });
    }
}

impl Inner {
    /// Create a fresh remote document from the seed snapshot and adopt its
    /// id. The local store is left untouched; it already holds whatever the
    /// device has, seed included.
    async fn create_seed_document(&self) -> std::result::Result<String, RemoteStoreError> {
        let id = self.client.create(&Snapshot::seed()).await?;
        *self.document_id.lock().await = Some(id.clone());
        self.persist_document_id(&id).await;
        Ok(id)
    }

    // The cache is plain-file I/O, so its calls run on the blocking pool
    // rather than a runtime thread. Failures are logged and swallowed; a
    // mutation never fails because the local disk cache did.

    async fn cached_document_id(&self) -> Option<String> {
        let cache = self.cache.clone();
        tokio::task::spawn_blocking(move || cache.document_id())
            .await
            .unwrap_or_default()
    }

    async fn persist_document_id(&self, id: &str) {
        let cache = self.cache.clone();
        let id = id.to_string();
        match tokio::task::spawn_blocking(move || cache.store_document_id(&id)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Failed to persist document id"),
            Err(e) => warn!(error = %e, "Document id write task failed"),
        }
    }

    async fn forget_document_id(&self) {
        let cache = self.cache.clone();
        match tokio::task::spawn_blocking(move || cache.clear_document_id()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Failed to clear cached document id"),
            Err(e) => warn!(error = %e, "Document id write task failed"),
        }
    }

    /// Rewrite the durable session mirror. Skipped when logged out; the
    /// mirror always reflects an authenticated session.
    async fn mirror_session(&self) {
        let mirror = {
            let store = self.store.read().await;
            let Some(user) = store.user() else { return };
            SessionMirror {
                user: Some(user.clone()),
                snapshot: store.snapshot().clone(),
            }
        };
        let cache = self.cache.clone();
        match tokio::task::spawn_blocking(move || cache.write_session(&mirror)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Failed to write session mirror"),
            Err(e) => warn!(error = %e, "Session mirror task failed"),
        }
    }

    /// One push attempt: gate on session, document id and throttle, then
    /// replace the remote document with the current snapshot.
    async fn push_now(&self) {
        let Some(id) = self.document_id.lock().await.clone() else {
            debug!("No document id yet, push skipped");
            return;
        };
        if self.store.read().await.user().is_none() {
            debug!("No session, push skipped");
            return;
        }
        if !self.throttle.lock().await.try_acquire() {
            debug!("Push throttled, next push carries the latest snapshot");
            return;
        }

        let _activity = ActivityGuard::begin(&self.active);
        let mut snapshot = self.store.read().await.snapshot().clone();
        snapshot.last_update = Some(Utc::now().timestamp_millis());

        match self.client.replace(&id, &snapshot).await {
            Ok(()) => {
                debug!(id = %id, "Snapshot pushed");
                self.last_error.store(false, Ordering::SeqCst);
            }
            Err(e) => {
                error!(error = %e, "Push failed, local data remains authoritative");
                self.last_error.store(true, Ordering::SeqCst);
            }
        }
    }
}
