//! Repository for the `users` table.

use sqlx::PgPool;
use tms_core::roles::Role;
use tms_core::search::UserFilter;
use tms_core::types::DbId;

use crate::models::user::UserRow;
use crate::repositories::ticket_repo::like_pattern;

const COLUMNS: &str = "id, name, email, role";

/// Build the `WHERE` clause for a user lookup and its text binds, in order.
fn search_clause(filter: &UserFilter) -> (String, Vec<String>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut args: Vec<String> = Vec::new();

    if let Some(term) = filter.search_term() {
        args.push(like_pattern(term));
        let idx = args.len();
        conditions.push(format!("(name ILIKE ${idx} OR email ILIKE ${idx})"));
    }
    if let Some(role) = filter.role {
        args.push(role.as_str().to_string());
        conditions.push(format!("role = ${}", args.len()));
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, args)
}

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Users matching `filter`, ordered by name.
    pub async fn search(
        pool: &PgPool,
        filter: &UserFilter,
        limit: i64,
    ) -> Result<Vec<UserRow>, sqlx::Error> {
        let (where_clause, args) = search_clause(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM users {where_clause} ORDER BY name ASC LIMIT ${}",
            args.len() + 1
        );
        let mut q = sqlx::query_as::<_, UserRow>(&query);
        for arg in args {
            q = q.bind(arg);
        }
        q.bind(limit).fetch_all(pool).await
    }

    /// Register a user. Used by operator tooling; the service itself never
    /// creates users.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, role) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(name)
            .bind(email)
            .bind(role.as_str())
            .fetch_one(pool)
            .await
    }
}
