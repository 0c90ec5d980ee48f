//! Family preset models.

use serde::{Deserialize, Serialize};

use super::{Household, Preferences};

/// A named household with leave preferences, used as a shortcut when
/// exploring plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyPreset {
    /// Short name of the preset.
    pub name: String,
    /// What the preset illustrates.
    #[serde(default)]
    pub description: String,
    /// The household's leave preferences.
    pub preferences: Preferences,
    /// The household's incomes and circumstances.
    pub household: Household,
}
