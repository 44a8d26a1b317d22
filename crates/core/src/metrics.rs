//! Leaderboard and dashboard aggregates.
//!
//! The in-memory store computes these with the functions below; the
//! Postgres store produces the same shapes with SQL aggregation.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::roles::Role;
use crate::ticket::{InitialType, ResolvedType, Ticket, TicketStatus, UserScore, UserSummary};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRanking {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub total_points: f64,
    pub tickets_completed: i64,
    /// 1-based position.
    pub rank: i64,
}

/// Every user ordered by summed points (descending), ties broken by name.
pub fn rank_users(users: &[UserSummary], scores: &[UserScore], limit: usize) -> Vec<UserRanking> {
    let mut totals: HashMap<DbId, (f64, i64)> = HashMap::new();
    for score in scores {
        let entry = totals.entry(score.user_id).or_insert((0.0, 0));
        entry.0 += score.points;
        entry.1 += 1;
    }

    let mut rows: Vec<UserRanking> = users
        .iter()
        .map(|u| {
            let (total_points, tickets_completed) = totals.get(&u.id).copied().unwrap_or((0.0, 0));
            UserRanking {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                role: u.role,
                total_points,
                tickets_completed,
                rank: 0,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_points
            .total_cmp(&a.total_points)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows.truncate(limit);
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as i64 + 1;
    }
    rows
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub const BUCKET_REJECTED: &str = "Rejected";
pub const BUCKET_UNCLASSIFIED: &str = "Unclassified";
pub const BUCKET_EMERGENCY_CHANGE: &str = "Emergency Change";
pub const BUCKET_DATA_CORRECTION: &str = "Data Correction";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total: i64,
    pub status_counts: BTreeMap<String, i64>,
    pub priority_counts: BTreeMap<String, i64>,
    pub category_counts: BTreeMap<String, i64>,
    pub issue_report_counts: BTreeMap<String, i64>,
}

/// Issue-report breakdown bucket, or `None` for other ticket types.
pub fn issue_report_bucket(ticket: &Ticket) -> Option<&'static str> {
    if ticket.initial_type != InitialType::IssueReport {
        return None;
    }
    Some(match (ticket.status, ticket.resolved_type) {
        (TicketStatus::Canceled, _) => BUCKET_REJECTED,
        (_, None) => BUCKET_UNCLASSIFIED,
        (_, Some(ResolvedType::EmergencyChange)) => BUCKET_EMERGENCY_CHANGE,
        (_, Some(ResolvedType::DataCorrection)) => BUCKET_DATA_CORRECTION,
    })
}

pub fn summarize<'a>(tickets: impl IntoIterator<Item = &'a Ticket>) -> MetricsSummary {
    let mut summary = MetricsSummary::default();
    for t in tickets {
        summary.total += 1;
        *summary
            .status_counts
            .entry(t.status.as_str().to_string())
            .or_default() += 1;
        *summary
            .priority_counts
            .entry(t.priority.as_str().to_string())
            .or_default() += 1;
        *summary
            .category_counts
            .entry(t.category().to_string())
            .or_default() += 1;
        if let Some(bucket) = issue_report_bucket(t) {
            *summary
                .issue_report_counts
                .entry(bucket.to_string())
                .or_default() += 1;
        }
    }
    summary
}
