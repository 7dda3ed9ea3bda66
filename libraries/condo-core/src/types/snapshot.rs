/// Application snapshot, the unit of remote persistence
use serde::{Deserialize, Serialize};

use crate::seed::seed_houses;
use crate::types::{Expense, House, Payment, Suggestion, ADMIN_HOUSE};

/// The aggregate `{houses, payments, expenses, suggestions}` transferred to
/// and from the remote document store as a whole. There is no partial
/// update protocol.
///
/// Invariant: every `Payment.house_id`, and every `Suggestion.house_id`
/// other than the admin sentinel, references a house in `houses`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub houses: Vec<House>,

    #[serde(default)]
    pub payments: Vec<Payment>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    #[serde(default)]
    pub suggestions: Vec<Suggestion>,

    /// Epoch-millis stamp written on push. Informational only; the store
    /// has last-write-wins semantics and no conflict detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<i64>,
}

impl Snapshot {
    /// Snapshot seeded with the fixed house list and empty collections,
    /// used when creating a fresh remote document.
    pub fn seed() -> Self {
        Self {
            houses: seed_houses(),
            ..Self::default()
        }
    }

    pub fn house_exists(&self, id: &str) -> bool {
        self.houses.iter().any(|h| h.id == id)
    }

    /// Check the referential invariant. Used by tests and debug assertions,
    /// not enforced on the wire: a remote document is adopted as-is.
    pub fn references_are_consistent(&self) -> bool {
        self.payments.iter().all(|p| self.house_exists(&p.house_id))
            && self
                .suggestions
                .iter()
                .all(|s| s.house_id == ADMIN_HOUSE || self.house_exists(&s.house_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentDraft, PaymentType};

    #[test]
    fn seed_snapshot_has_houses_and_empty_collections() {
        let snapshot = Snapshot::seed();
        assert_eq!(snapshot.houses.len(), 90);
        assert!(snapshot.payments.is_empty());
        assert!(snapshot.expenses.is_empty());
        assert!(snapshot.suggestions.is_empty());
        assert!(snapshot.last_update.is_none());
    }

    #[test]
    fn consistency_check_spots_dangling_references() {
        let mut snapshot = Snapshot::seed();
        assert!(snapshot.references_are_consistent());

        let payment = PaymentDraft {
            house_id: "TH99Z".into(),
            amount_bs: Some(100.0),
            exchange_rate: Some(50.0),
            payment_type: PaymentType::Ordinary,
            extraordinary_reason: None,
            bank_reference: "123456".into(),
            receipt_ref: None,
        }
        .build()
        .unwrap();
        snapshot.payments.push(payment);
        assert!(!snapshot.references_are_consistent());
    }

    #[test]
    fn deserializes_document_with_missing_collections() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"houses": []}"#).unwrap();
        assert!(snapshot.houses.is_empty());
        assert!(snapshot.suggestions.is_empty());
    }
}
