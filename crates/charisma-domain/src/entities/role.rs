//! Role entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifecycle status of a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleStatus {
    /// Role can be assigned
    #[default]
    Active,
    /// Role is temporarily unused
    Inactive,
    /// Role was disabled by an operator
    Disabled,
}

impl RoleStatus {
    /// Wire representation of the status
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for RoleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "disabled" => Ok(Self::Disabled),
            other => Err(Error::invalid_argument(format!(
                "unknown role status '{other}'"
            ))),
        }
    }
}

/// A named set of permissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Unique identifier
    pub id: String,
    /// Unique display name
    pub name: String,
    /// Lifecycle status
    pub status: RoleStatus,
    /// Identifier of the user that created the role
    pub created_by: Option<String>,
    /// Granted permission names
    pub permissions: Vec<String>,
    /// Owning business, if the role is business-scoped
    pub business_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Create a new active role with a fresh identifier
    pub fn new<S: Into<String>>(name: S) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            status: RoleStatus::default(),
            created_by: None,
            permissions: Vec::new(),
            business_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the role grants the given permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Mark the role as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
