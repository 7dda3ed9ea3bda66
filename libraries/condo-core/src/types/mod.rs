//! Domain types shared across the workspace.

mod expense;
mod house;
mod payment;
mod snapshot;
mod suggestion;
mod user;

pub use expense::{Expense, ExpenseCategory, ExpenseDraft};
pub use house::House;
pub use payment::{Payment, PaymentDraft, PaymentType};
pub use snapshot::Snapshot;
pub use suggestion::{Suggestion, SuggestionStatus, ADMIN_HOUSE};
pub use user::{User, UserRole};
