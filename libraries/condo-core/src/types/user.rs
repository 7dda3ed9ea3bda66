/// Session user domain type
use serde::{Deserialize, Serialize};

use crate::types::ADMIN_HOUSE;

/// Role of the logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Resident,
}

/// The logged-in user. Exists only for the duration of a session and is
/// never part of the remote snapshot (it is mirrored to the local cache
/// only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub role: UserRole,

    /// Display name
    pub username: String,

    /// Credential string used to authenticate (matched by an external
    /// collaborator; stored for the session only)
    pub condo_key: String,

    /// Associated house for residents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// House id to stamp on authored suggestions: the resident's house, or
    /// the admin sentinel.
    pub fn suggestion_house(&self) -> &str {
        self.house_id.as_deref().unwrap_or(ADMIN_HOUSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_suggestions_use_sentinel() {
        let admin = User {
            role: UserRole::Admin,
            username: "Admin".into(),
            condo_key: "Admin1".into(),
            house_id: None,
        };
        assert!(admin.is_admin());
        assert_eq!(admin.suggestion_house(), ADMIN_HOUSE);
    }

    #[test]
    fn resident_suggestions_use_their_house() {
        let resident = User {
            role: UserRole::Resident,
            username: "TH01A".into(),
            condo_key: "VecinoTH".into(),
            house_id: Some("TH01A".into()),
        };
        assert!(!resident.is_admin());
        assert_eq!(resident.suggestion_house(), "TH01A");
    }
}
