//! Actor roles and the acting identity passed into every engine operation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Role of the caller. Wire strings are capitalised (`"Supervisor"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Anonymous,
    User,
    Supervisor,
    Manager,
}

/// Every role, in ascending order of privilege.
pub const ALL_ROLES: [Role; 4] = [Role::Anonymous, Role::User, Role::Supervisor, Role::Manager];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "Anonymous",
            Self::User => "User",
            Self::Supervisor => "Supervisor",
            Self::Manager => "Manager",
        }
    }

    /// Supervisor and Manager share the administrative capability set.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Supervisor | Self::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ROLES
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown role '{s}'")))
    }
}

/// The identity performing an operation.
///
/// `id` is `None` only for anonymous callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Option<DbId>,
    pub role: Role,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self {
            id: None,
            role: Role::Anonymous,
        }
    }

    pub fn user(id: DbId, role: Role) -> Self {
        Self { id: Some(id), role }
    }

    /// True when this actor created the ticket (`created_by == actor.id`).
    pub fn owns(&self, created_by: Option<DbId>) -> bool {
        match (self.id, created_by) {
            (Some(me), Some(owner)) => me == owner,
            _ => false,
        }
    }
}
