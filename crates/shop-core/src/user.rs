//! # User Types
//!
//! Account documents keyed by email. Profiles carry arbitrary fields; the
//! only behavior-bearing field is `role`.

use crate::store::Document;
use serde::{Deserialize, Serialize};

/// Account role. Anything other than `admin` grants nothing; documents are
/// schemaless, so a stray role string reads as `None` rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    None,
}

/// An account document.
///
/// Created and updated through the upsert-by-email path; never explicitly
/// deleted. Role transitions happen only through the admin-gated promotion
/// endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique key
    pub email: String,

    /// Missing role deserializes to `Role::None`
    #[serde(default)]
    pub role: Role,

    /// Arbitrary profile fields (name, address, ...)
    #[serde(flatten)]
    pub profile: Document,
}

impl User {
    /// The role-field comparison. An earlier revision of this check compared
    /// the whole account against the string "admin" and never matched.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
