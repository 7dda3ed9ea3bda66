/// Expense domain type
use crate::currency::convert_to_usd;
use crate::error::{Result, ValidationError};
use crate::ident;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed expense categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Maintenance,
    Services,
    Repairs,
    Cleaning,
    Security,
    Gardening,
    Other,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Maintenance => "maintenance",
            Self::Services => "services",
            Self::Repairs => "repairs",
            Self::Cleaning => "cleaning",
            Self::Security => "security",
            Self::Gardening => "gardening",
            Self::Other => "other",
        };
        f.write_str(label)
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maintenance" => Ok(Self::Maintenance),
            "services" => Ok(Self::Services),
            "repairs" => Ok(Self::Repairs),
            "cleaning" => Ok(Self::Cleaning),
            "security" => Ok(Self::Security),
            "gardening" => Ok(Self::Gardening),
            "other" => Ok(Self::Other),
            _ => Err(format!("unknown expense category: {s}")),
        }
    }
}

/// A recorded condominium expense. Append-only: no delete entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Client-generated time-based token
    pub id: String,

    /// Free-text description
    pub concept: String,

    /// One of the fixed categories
    pub category: ExpenseCategory,

    /// Normalized amount in USD
    pub amount: f64,

    /// Original amount in Bs.
    pub amount_bs: f64,

    /// Exchange rate used for normalization
    pub exchange_rate: f64,

    /// Issue date
    pub date: DateTime<Utc>,

    /// Opaque invoice reference from the blob-storage collaborator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_ref: Option<String>,
}

/// Form input for a new expense, validated by [`ExpenseDraft::build`].
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub concept: String,
    pub category: ExpenseCategory,
    pub amount_bs: Option<f64>,
    pub exchange_rate: Option<f64>,
    pub invoice_ref: Option<String>,
}

impl ExpenseDraft {
    /// Validate the draft and build the expense record.
    pub fn build(self) -> Result<Expense> {
        let concept = self.concept.trim();
        if concept.is_empty() {
            return Err(ValidationError::EmptyConcept);
        }
        let amount_bs = self
            .amount_bs
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or(ValidationError::InvalidAmount)?;
        let exchange_rate = self
            .exchange_rate
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or(ValidationError::InvalidExchangeRate)?;

        Ok(Expense {
            id: ident::next_token(),
            concept: concept.to_string(),
            category: self.category,
            amount: convert_to_usd(Some(amount_bs), Some(exchange_rate)),
            amount_bs,
            exchange_rate,
            date: Utc::now(),
            invoice_ref: self.invoice_ref,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_normalized_amount() {
        let expense = ExpenseDraft {
            concept: "Elevator service".into(),
            category: ExpenseCategory::Maintenance,
            amount_bs: Some(1500.0),
            exchange_rate: Some(50.0),
            invoice_ref: None,
        }
        .build()
        .unwrap();

        assert_eq!(expense.amount, 30.00);
        assert_eq!(expense.category, ExpenseCategory::Maintenance);
    }

    #[test]
    fn rejects_blank_concept() {
        let err = ExpenseDraft {
            concept: "  ".into(),
            category: ExpenseCategory::Other,
            amount_bs: Some(10.0),
            exchange_rate: Some(1.0),
            invoice_ref: None,
        }
        .build()
        .unwrap_err();
        assert_eq!(err, ValidationError::EmptyConcept);
    }

    #[test]
    fn category_parses_from_str() {
        assert_eq!(
            "Gardening".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Gardening
        );
        assert!("landscaping".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&ExpenseCategory::Security).unwrap();
        assert_eq!(json, "\"security\"");
    }
}
