use crate::types::DbId;

/// Why a policy check refused an operation.
///
/// The two reasons are distinct user-visible conditions: a role that may
/// never perform the operation versus a role that may, but not on a ticket
/// somebody else created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenialReason {
    RoleNotPermitted,
    NotTicketOwner,
}

impl DenialReason {
    /// Wire-stable reason code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleNotPermitted => "ROLE_NOT_PERMITTED",
            Self::NotTicketOwner => "NOT_TICKET_OWNER",
        }
    }
}

impl std::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by a [`crate::store::TicketStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness or foreign-key rule rejected the write.
    #[error("Store conflict: {0}")]
    Conflict(String),

    /// A persisted row could not be mapped back into a domain value.
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Any other backend failure (connection, I/O, driver).
    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden ({reason}): {message}")]
    Forbidden {
        reason: DenialReason,
        message: String,
    },

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A caller broke an internal contract (e.g. distributing points to an
    /// empty assignee set). Never expected in practice.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn forbidden(reason: DenialReason, message: impl Into<String>) -> Self {
        Self::Forbidden {
            reason,
            message: message.into(),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
