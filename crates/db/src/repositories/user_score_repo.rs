//! Repository for the `user_scores` table.

use sqlx::PgPool;
use tms_core::distribution::PointShare;
use tms_core::types::{DbId, Timestamp};

use crate::models::metrics::RankingRow;
use crate::models::user_score::UserScoreRow;

const COLUMNS: &str = "user_id, ticket_id, points, awarded_at";

pub struct UserScoreRepo;

impl UserScoreRepo {
    /// Delete every score row for the ticket and insert `shares`, within a
    /// transaction.
    pub async fn replace_for_ticket(
        pool: &PgPool,
        ticket_id: DbId,
        shares: &[PointShare],
        awarded_at: Timestamp,
    ) -> Result<Vec<UserScoreRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM user_scores WHERE ticket_id = $1")
            .bind(ticket_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO user_scores (user_id, ticket_id, points, awarded_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let mut rows = Vec::with_capacity(shares.len());
        for share in shares {
            let row = sqlx::query_as::<_, UserScoreRow>(&query)
                .bind(share.user_id)
                .bind(ticket_id)
                .bind(share.points)
                .bind(awarded_at)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok(rows)
    }

    /// Returns the number of rows deleted.
    pub async fn delete_for_ticket(pool: &PgPool, ticket_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_scores WHERE ticket_id = $1")
            .bind(ticket_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_for_ticket(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<UserScoreRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_scores WHERE ticket_id = $1 ORDER BY awarded_at, user_id"
        );
        sqlx::query_as::<_, UserScoreRow>(&query)
            .bind(ticket_id)
            .fetch_all(pool)
            .await
    }

    /// Top users by summed points, ties broken by name.
    pub async fn rankings(pool: &PgPool, limit: i64) -> Result<Vec<RankingRow>, sqlx::Error> {
        sqlx::query_as::<_, RankingRow>(
            "SELECT u.id, u.name, u.email, u.role, \
                    COALESCE(SUM(us.points), 0)::DOUBLE PRECISION AS total_points, \
                    COUNT(us.ticket_id) AS tickets_completed, \
                    ROW_NUMBER() OVER (ORDER BY COALESCE(SUM(us.points), 0) DESC, u.name ASC) AS rank \
             FROM users u \
             LEFT JOIN user_scores us ON us.user_id = u.id \
             GROUP BY u.id, u.name, u.email, u.role \
             ORDER BY total_points DESC, u.name ASC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
