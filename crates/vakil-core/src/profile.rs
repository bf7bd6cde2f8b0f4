//! Saved user profile used to prefill the wizard.

use serde::{Deserialize, Serialize};

/// Prefill seed from the external profile collaborator.
///
/// Field names match the stored profile record. Every field may be empty;
/// a missing or incomplete profile never blocks wizard entry, it only
/// means the corresponding inputs start blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub full_name: String,
    pub address: String,
    pub age: u32,
    /// Default territorial jurisdiction, e.g. the user's home district court.
    pub jurisdiction: String,
}
