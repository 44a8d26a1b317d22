//! Repository for the `tickets` table.

use sqlx::PgPool;
use tms_core::search::TicketFilter;
use tms_core::ticket::{NewTicket, Ticket};
use tms_core::types::DbId;

use crate::models::ticket::TicketRow;

/// Column list for `tickets` queries.
const COLUMNS: &str = "\
    id, code, created_by, contact_email, contact_phone, \
    initial_type, resolved_type, status, title, description, details, \
    impact_score, urgency_score, final_score, red_flag, priority, effort_score, \
    red_flags_data, impact_assessment_data, urgency_timeline_data, effort_data, \
    created_at, updated_at, closed_at";

/// A bind value produced by the list filter builder.
#[derive(Debug, Clone, PartialEq)]
enum FilterArg {
    Text(String),
    Id(DbId),
}

/// Escape `LIKE` wildcards so user text matches literally.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Build the `WHERE` clause for `filter` and the values to bind, in order.
fn filter_clause(filter: &TicketFilter) -> (String, Vec<FilterArg>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut args: Vec<FilterArg> = Vec::new();

    if let Some(status) = filter.status {
        args.push(FilterArg::Text(status.as_str().to_string()));
        conditions.push(format!("status = ${}", args.len()));
    }
    if let Some(priority) = filter.priority {
        args.push(FilterArg::Text(priority.as_str().to_string()));
        conditions.push(format!("priority = ${}", args.len()));
    }
    if let Some(initial_type) = filter.initial_type {
        args.push(FilterArg::Text(initial_type.as_str().to_string()));
        conditions.push(format!("initial_type = ${}", args.len()));
    }
    if let Some(created_by) = filter.created_by {
        args.push(FilterArg::Id(created_by));
        conditions.push(format!("created_by = ${}", args.len()));
    }
    if let Some(assignee) = filter.assignee_id {
        args.push(FilterArg::Id(assignee));
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM ticket_assignments ta \
             WHERE ta.ticket_id = tickets.id AND ta.assignee_id = ${})",
            args.len()
        ));
    }
    if let Some(term) = filter.search_term() {
        args.push(FilterArg::Text(like_pattern(term)));
        let idx = args.len();
        conditions.push(format!("(title ILIKE ${idx} OR description ILIKE ${idx})"));
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, args)
}

/// Provides persistence operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new pending ticket; the database assigns `code`.
    pub async fn create(pool: &PgPool, input: &NewTicket) -> Result<TicketRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets \
                (id, created_by, contact_email, contact_phone, initial_type, status, \
                 title, description, details, impact_score, urgency_score, final_score, \
                 red_flag, priority, red_flags_data, impact_assessment_data, \
                 urgency_timeline_data, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, $8, $9, $10, $11, \
                     $12, $13, $14, $15, $16, $17, $17) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketRow>(&query)
            .bind(input.id)
            .bind(input.created_by)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(input.initial_type.as_str())
            .bind(&input.title)
            .bind(&input.description)
            .bind(sqlx::types::Json(&input.details))
            .bind(input.impact_score)
            .bind(input.urgency_score)
            .bind(input.final_score)
            .bind(input.red_flag)
            .bind(input.priority.as_str())
            .bind(&input.red_flags_data)
            .bind(&input.impact_assessment_data)
            .bind(&input.urgency_timeline_data)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TicketRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, TicketRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every mutable column. Returns `None` if the ticket is gone.
    pub async fn update(pool: &PgPool, ticket: &Ticket) -> Result<Option<TicketRow>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET \
                contact_email = $2, contact_phone = $3, initial_type = $4, \
                resolved_type = $5, status = $6, title = $7, description = $8, \
                details = $9, impact_score = $10, urgency_score = $11, \
                final_score = $12, red_flag = $13, priority = $14, effort_score = $15, \
                red_flags_data = $16, impact_assessment_data = $17, \
                urgency_timeline_data = $18, effort_data = $19, \
                updated_at = $20, closed_at = $21 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketRow>(&query)
            .bind(ticket.id)
            .bind(&ticket.contact_email)
            .bind(&ticket.contact_phone)
            .bind(ticket.initial_type.as_str())
            .bind(ticket.resolved_type.map(|r| r.as_str()))
            .bind(ticket.status.as_str())
            .bind(&ticket.title)
            .bind(&ticket.description)
            .bind(sqlx::types::Json(&ticket.details))
            .bind(ticket.impact_score)
            .bind(ticket.urgency_score)
            .bind(ticket.final_score)
            .bind(ticket.red_flag)
            .bind(ticket.priority.as_str())
            .bind(ticket.effort_score)
            .bind(&ticket.red_flags_data)
            .bind(&ticket.impact_assessment_data)
            .bind(&ticket.urgency_timeline_data)
            .bind(&ticket.effort_data)
            .bind(ticket.updated_at)
            .bind(ticket.closed_at)
            .fetch_optional(pool)
            .await
    }

    /// List tickets matching `filter`, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &TicketFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TicketRow>, sqlx::Error> {
        let (where_clause, args) = filter_clause(filter);
        let param_idx = args.len() + 1;
        let query = format!(
            "SELECT {COLUMNS} FROM tickets {where_clause} \
             ORDER BY created_at DESC, code DESC \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, TicketRow>(&query);
        for arg in args {
            q = match arg {
                FilterArg::Text(s) => q.bind(s),
                FilterArg::Id(id) => q.bind(id),
            };
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count tickets matching `filter`.
    pub async fn count_filtered(pool: &PgPool, filter: &TicketFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, args) = filter_clause(filter);
        let query = format!("SELECT COUNT(*) FROM tickets {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for arg in args {
            q = match arg {
                FilterArg::Text(s) => q.bind(s),
                FilterArg::Id(id) => q.bind(id),
            };
        }
        q.fetch_one(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tms_core::ticket::{Priority, TicketStatus};

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (clause, args) = filter_clause(&TicketFilter::default());
        assert!(clause.is_empty());
        assert!(args.is_empty());
    }

    #[test]
    fn placeholders_follow_bind_order() {
        let assignee = uuid::Uuid::now_v7();
        let (clause, args) = filter_clause(&TicketFilter {
            status: Some(TicketStatus::Pending),
            priority: Some(Priority::P1),
            assignee_id: Some(assignee),
            q: Some("vpn".into()),
            ..Default::default()
        });
        assert!(clause.starts_with("WHERE status = $1 AND priority = $2"));
        assert!(clause.contains("ta.assignee_id = $3"));
        assert!(clause.contains("title ILIKE $4 OR description ILIKE $4"));
        assert_eq!(
            args,
            vec![
                FilterArg::Text("pending".into()),
                FilterArg::Text("P1".into()),
                FilterArg::Id(assignee),
                FilterArg::Text("%vpn%".into()),
            ]
        );
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
