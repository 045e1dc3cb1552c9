//! Contributor and affiliation document model.
//!
//! # Responsibility
//! - Mirror the user data YAML document (`users -> affiliations`).
//! - Define the flat export record understood by the storage boundary.
//!
//! # Invariants
//! - Loaded documents are read-only; nothing in core mutates them.
//! - `end` is not required to be on or after `start`; inverted periods pass
//!   through unchanged.

use crate::model::date::CalendarDate;
use serde::{Deserialize, Serialize};

/// One period during which a contributor belonged to one organization.
///
/// Omitted fields decode to an empty organization and `0001-01-01` dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub start: CalendarDate,
    #[serde(default)]
    pub end: CalendarDate,
}

/// One contributor entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Required key; an empty string is accepted as-is.
    pub github_login: String,
    #[serde(default)]
    pub affiliations: Vec<Affiliation>,
    /// Carried through the document but not exported.
    #[serde(default)]
    pub email_addresses: Vec<String>,
}

/// Root of the user data document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub users: Vec<UserInfo>,
}

impl UserData {
    /// Total number of affiliations across all users.
    pub fn affiliation_count(&self) -> usize {
        self.users.iter().map(|user| user.affiliations.len()).sum()
    }

    /// Serializes the document back into its YAML form.
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Flattened export record: one affiliation paired with its owner's login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAffiliation {
    pub user_login: String,
    pub organization: String,
    pub start_time: CalendarDate,
    pub end_time: CalendarDate,
}
