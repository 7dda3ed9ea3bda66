//! Condo Control Core
//!
//! Platform-agnostic domain types, validation, and helpers for the
//! condominium administration app.
//!
//! This crate defines:
//! - **Domain Types**: `House`, `Payment`, `Expense`, `Suggestion`, `User`,
//!   and the aggregate `Snapshot` that is the unit of remote persistence
//! - **Validation**: draft builders that reject malformed input before any
//!   state mutation or network call
//! - **Helpers**: currency conversion, seed house list, id tokens
//!
//! # Example
//!
//! ```rust
//! use condo_core::{PaymentDraft, PaymentType, Snapshot};
//!
//! let snapshot = Snapshot::seed();
//! let payment = PaymentDraft {
//!     house_id: "TH01A".into(),
//!     amount_bs: Some(500.0),
//!     exchange_rate: Some(50.0),
//!     payment_type: PaymentType::Ordinary,
//!     extraordinary_reason: None,
//!     bank_reference: "123456".into(),
//!     receipt_ref: None,
//! }
//! .build()
//! .unwrap();
//!
//! assert_eq!(payment.total_usd, 10.00);
//! assert!(snapshot.house_exists(&payment.house_id));
//! ```

#![forbid(unsafe_code)]

pub mod currency;
pub mod error;
pub mod ident;
pub mod seed;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ValidationError};
pub use types::{
    Expense, ExpenseCategory, ExpenseDraft, House, Payment, PaymentDraft, PaymentType, Snapshot,
    Suggestion, SuggestionStatus, User, UserRole, ADMIN_HOUSE,
};
