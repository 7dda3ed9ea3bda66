/// House domain type
use serde::{Deserialize, Serialize};

/// A house in the condominium.
///
/// Houses come from the fixed seed list and are never deleted at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    /// Stable human-readable code, e.g. `TH01A`
    pub id: String,

    /// Display name (same as the code for seeded houses)
    pub name: String,

    /// Owner name, may be blank
    #[serde(default)]
    pub owner: String,

    /// Running balance. Currently unused; retained in the stored schema.
    #[serde(default)]
    pub balance: f64,

    /// Street grouping, e.g. `Calle A`
    #[serde(default)]
    pub street: String,
}
