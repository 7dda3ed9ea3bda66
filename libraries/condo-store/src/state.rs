use condo_core::{Expense, Payment, Snapshot, Suggestion, SuggestionStatus, User};
use tracing::debug;

/// Single mutable snapshot of the domain model plus session user.
///
/// All collections are ordered most-recent-first; appends insert at the
/// head. Ids are caller-supplied and assumed unique. Mutations commit
/// synchronously; persistence is the synchronizer's concern.
#[derive(Debug, Default)]
pub struct StateStore {
    user: Option<User>,
    snapshot: Snapshot,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            user: None,
            snapshot,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Replace the session user. Clearing it is a logout and leaves the
    /// snapshot untouched.
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Full overwrite after a successful remote pull.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        debug!(
            payments = snapshot.payments.len(),
            expenses = snapshot.expenses.len(),
            suggestions = snapshot.suggestions.len(),
            "Replacing snapshot"
        );
        self.snapshot = snapshot;
    }

    pub fn append_payment(&mut self, payment: Payment) {
        self.snapshot.payments.insert(0, payment);
    }

    /// Remove a payment by id; no-op if absent.
    pub fn remove_payment(&mut self, id: &str) {
        self.snapshot.payments.retain(|p| p.id != id);
    }

    pub fn append_expense(&mut self, expense: Expense) {
        self.snapshot.expenses.insert(0, expense);
    }

    pub fn append_suggestion(&mut self, suggestion: Suggestion) {
        self.snapshot.suggestions.insert(0, suggestion);
    }

    /// Set the status of the matching suggestion; no-op if absent.
    pub fn update_suggestion_status(&mut self, id: &str, status: SuggestionStatus) {
        if let Some(suggestion) = self.snapshot.suggestions.iter_mut().find(|s| s.id == id) {
            suggestion.status = status;
        }
    }
}
