//! Role-indexed authorization policy.
//!
//! The rules live in one immutable table built on first use. Every check
//! looks the actor's role up in it; there are no per-role branches at call
//! sites.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::error::{CoreError, DenialReason};
use crate::roles::{Actor, Role};
use crate::ticket::{InitialType, Ticket, TicketStatus};
use crate::types::DbId;

/// Message for an anonymous submission without a contact email.
pub const CONTACT_REQUIRED_MESSAGE: &str = "contact email required for anonymous users";

/// Operations that are granted per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Edit title/description/details of any ticket.
    EditAny,
    /// Edit tickets the actor created.
    EditOwn,
    /// Cancel tickets the actor created.
    CancelOwn,
    CancelAny,
    /// Move tickets between non-cancel statuses.
    ChangeStatus,
    OverrideFields,
    Classify,
    UpdateAssessment,
    AssignSelf,
    AssignOthers,
    Comment,
    /// Look up users by name or email, e.g. to pick assignees.
    SearchUsers,
}

#[derive(Debug, Clone)]
pub struct RoleRules {
    pub creatable_types: HashSet<InitialType>,
    /// Creation requires a non-empty contact email.
    pub requires_contact: bool,
    pub capabilities: HashSet<Capability>,
}

impl RoleRules {
    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

pub struct PolicyTable {
    rules: HashMap<Role, RoleRules>,
}

static POLICY: LazyLock<PolicyTable> = LazyLock::new(PolicyTable::build);

impl PolicyTable {
    fn build() -> Self {
        use Capability::*;

        let staff = RoleRules {
            creatable_types: InitialType::ALL.into_iter().collect(),
            requires_contact: false,
            capabilities: [
                EditAny,
                EditOwn,
                CancelOwn,
                CancelAny,
                ChangeStatus,
                OverrideFields,
                Classify,
                UpdateAssessment,
                AssignSelf,
                AssignOthers,
                Comment,
                SearchUsers,
            ]
            .into_iter()
            .collect(),
        };

        let rules = HashMap::from([
            (
                Role::Anonymous,
                RoleRules {
                    creatable_types: HashSet::from([InitialType::IssueReport]),
                    requires_contact: true,
                    capabilities: HashSet::new(),
                },
            ),
            (
                Role::User,
                RoleRules {
                    creatable_types: HashSet::from([
                        InitialType::ChangeRequestNormal,
                        InitialType::ServiceRequestDataExtraction,
                        InitialType::ServiceRequestAdvisory,
                        InitialType::ServiceRequestGeneral,
                        InitialType::IssueReport,
                    ]),
                    requires_contact: false,
                    capabilities: [
                        EditOwn,
                        CancelOwn,
                        ChangeStatus,
                        AssignSelf,
                        Comment,
                        SearchUsers,
                    ]
                    .into_iter()
                        .collect(),
                },
            ),
            (Role::Supervisor, staff.clone()),
            (Role::Manager, staff),
        ]);

        Self { rules }
    }

    /// The shared process-wide table.
    pub fn global() -> &'static PolicyTable {
        &POLICY
    }

    pub fn rules(&self, role: Role) -> &RoleRules {
        // Built with an entry for every role.
        &self.rules[&role]
    }

    pub fn can(&self, role: Role, capability: Capability) -> bool {
        self.rules(role).can(capability)
    }
}

fn rules(actor: &Actor) -> &'static RoleRules {
    PolicyTable::global().rules(actor.role)
}

fn role_denied(actor: &Actor, what: &str) -> CoreError {
    CoreError::forbidden(
        DenialReason::RoleNotPermitted,
        format!("Role {} may not {what}", actor.role),
    )
}

fn not_owner(what: &str) -> CoreError {
    CoreError::forbidden(
        DenialReason::NotTicketOwner,
        format!("Only the ticket creator may {what}"),
    )
}

/// Anything but a logged-in user is refused with an auth error.
fn require_identity(actor: &Actor) -> Result<DbId, CoreError> {
    actor
        .id
        .ok_or_else(|| CoreError::Unauthorized("Authentication required".into()))
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Ticket creation by type. Anonymous callers must also supply contact info;
/// a missing email is reported as a validation failure, distinct from either
/// forbidden reason.
pub fn authorize_create(
    actor: &Actor,
    initial_type: InitialType,
    contact_email: Option<&str>,
) -> Result<(), CoreError> {
    let rules = rules(actor);
    if rules.requires_contact && contact_email.map_or(true, |e| e.trim().is_empty()) {
        return Err(CoreError::Validation(CONTACT_REQUIRED_MESSAGE.into()));
    }
    if !rules.creatable_types.contains(&initial_type) {
        return Err(role_denied(actor, &format!("create {initial_type} tickets")));
    }
    Ok(())
}

/// Title/description/details edits.
pub fn authorize_edit(actor: &Actor, ticket: &Ticket) -> Result<(), CoreError> {
    let rules = rules(actor);
    if rules.can(Capability::EditAny) {
        return Ok(());
    }
    if !rules.can(Capability::EditOwn) {
        return Err(role_denied(actor, "edit tickets"));
    }
    if !actor.owns(ticket.created_by) {
        return Err(not_owner("edit it"));
    }
    Ok(())
}

/// Status transitions. Cancelling is owner-restricted for non-staff; other
/// moves only need the status capability.
pub fn authorize_status_change(
    actor: &Actor,
    ticket: &Ticket,
    to: TicketStatus,
) -> Result<(), CoreError> {
    let rules = rules(actor);
    if to == TicketStatus::Canceled {
        if rules.can(Capability::CancelAny) {
            return Ok(());
        }
        if !rules.can(Capability::CancelOwn) {
            return Err(role_denied(actor, "cancel tickets"));
        }
        if !actor.owns(ticket.created_by) {
            return Err(not_owner("cancel it"));
        }
        return Ok(());
    }
    if !rules.can(Capability::ChangeStatus) {
        return Err(role_denied(actor, "change ticket status"));
    }
    Ok(())
}

pub fn authorize_field_override(actor: &Actor) -> Result<(), CoreError> {
    if rules(actor).can(Capability::OverrideFields) {
        Ok(())
    } else {
        Err(role_denied(actor, "override ticket fields"))
    }
}

pub fn authorize_classify(actor: &Actor) -> Result<(), CoreError> {
    if rules(actor).can(Capability::Classify) {
        Ok(())
    } else {
        Err(role_denied(actor, "classify tickets"))
    }
}

pub fn authorize_assessment_update(actor: &Actor) -> Result<(), CoreError> {
    if rules(actor).can(Capability::UpdateAssessment) {
        Ok(())
    } else {
        Err(role_denied(actor, "update priority assessments"))
    }
}

fn authorize_assignment_change(
    actor: &Actor,
    user_ids: &[DbId],
    verb: &str,
) -> Result<(), CoreError> {
    let rules = rules(actor);
    if rules.can(Capability::AssignOthers) {
        return Ok(());
    }
    if !rules.can(Capability::AssignSelf) {
        return Err(role_denied(actor, &format!("{verb} tickets")));
    }
    let me = require_identity(actor)?;
    if user_ids.iter().any(|id| *id != me) {
        return Err(role_denied(actor, &format!("{verb} other users")));
    }
    Ok(())
}

/// Users may only put themselves on a ticket; staff may assign anyone.
pub fn authorize_assign(actor: &Actor, user_ids: &[DbId]) -> Result<(), CoreError> {
    authorize_assignment_change(actor, user_ids, "assign")
}

pub fn authorize_unassign(actor: &Actor, user_ids: &[DbId]) -> Result<(), CoreError> {
    authorize_assignment_change(actor, user_ids, "unassign")
}

pub fn authorize_comment(actor: &Actor) -> Result<(), CoreError> {
    if rules(actor).can(Capability::Comment) {
        Ok(())
    } else {
        Err(role_denied(actor, "comment on tickets"))
    }
}

pub fn authorize_search_users(actor: &Actor) -> Result<(), CoreError> {
    if rules(actor).can(Capability::SearchUsers) {
        Ok(())
    } else {
        Err(role_denied(actor, "search users"))
    }
}
