/// Suggestion domain type
use crate::error::{Result, ValidationError};
use crate::ident;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel house id used when the administrator authors a suggestion.
pub const ADMIN_HOUSE: &str = "admin";

/// Lifecycle status of a suggestion. Pending suggestions can be marked
/// reviewed or resolved, and reset back to pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    #[default]
    Pending,
    Reviewed,
    Resolved,
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Resolved => "resolved",
        };
        f.write_str(label)
    }
}

impl FromStr for SuggestionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "reviewed" => Ok(Self::Reviewed),
            "resolved" => Ok(Self::Resolved),
            _ => Err(format!("unknown suggestion status: {s}")),
        }
    }
}

/// A resident (or admin) suggestion. Never deleted; only the status field
/// is mutated, and only by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Client-generated time-based token
    pub id: String,

    /// House of the author, or [`ADMIN_HOUSE`]
    pub house_id: String,

    /// Free-text message
    pub message: String,

    /// Submission date
    pub date: DateTime<Utc>,

    /// Lifecycle status
    #[serde(default)]
    pub status: SuggestionStatus,

    /// Public network address of the submitter, when the lookup succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl Suggestion {
    /// Validate and build a new pending suggestion.
    pub fn build(
        house_id: impl Into<String>,
        message: &str,
        ip_address: Option<String>,
    ) -> Result<Self> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(Self {
            id: ident::next_token(),
            house_id: house_id.into(),
            message: message.to_string(),
            date: Utc::now(),
            status: SuggestionStatus::Pending,
            ip_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_pending() {
        let s = Suggestion::build("TH05B", "  Fix the gate light  ", None).unwrap();
        assert_eq!(s.status, SuggestionStatus::Pending);
        assert_eq!(s.message, "Fix the gate light");
        assert!(s.ip_address.is_none());
    }

    #[test]
    fn rejects_blank_message() {
        assert_eq!(
            Suggestion::build("TH05B", "   ", None).unwrap_err(),
            ValidationError::EmptyMessage
        );
    }

    #[test]
    fn status_round_trips_as_lowercase() {
        let json = serde_json::to_string(&SuggestionStatus::Reviewed).unwrap();
        assert_eq!(json, "\"reviewed\"");
        assert_eq!(
            "resolved".parse::<SuggestionStatus>().unwrap(),
            SuggestionStatus::Resolved
        );
    }
}
