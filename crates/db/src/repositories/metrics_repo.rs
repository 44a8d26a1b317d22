//! Dashboard aggregates over `tickets`.

use sqlx::PgPool;

use crate::models::metrics::CountRow;

pub struct MetricsRepo;

impl MetricsRepo {
    pub async fn total(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tickets")
            .fetch_one(pool)
            .await
    }

    pub async fn status_counts(pool: &PgPool) -> Result<Vec<CountRow>, sqlx::Error> {
        sqlx::query_as::<_, CountRow>(
            "SELECT status AS key, COUNT(*) AS count FROM tickets GROUP BY status",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn priority_counts(pool: &PgPool) -> Result<Vec<CountRow>, sqlx::Error> {
        sqlx::query_as::<_, CountRow>(
            "SELECT priority AS key, COUNT(*) AS count FROM tickets GROUP BY priority",
        )
        .fetch_all(pool)
        .await
    }

    /// Counts by resolved type when classified, else by initial type.
    pub async fn category_counts(pool: &PgPool) -> Result<Vec<CountRow>, sqlx::Error> {
        sqlx::query_as::<_, CountRow>(
            "SELECT COALESCE(resolved_type, initial_type) AS key, COUNT(*) AS count \
             FROM tickets \
             GROUP BY COALESCE(resolved_type, initial_type)",
        )
        .fetch_all(pool)
        .await
    }

    /// Issue reports bucketed as rejected, unclassified or by resolved type.
    pub async fn issue_report_counts(pool: &PgPool) -> Result<Vec<CountRow>, sqlx::Error> {
        sqlx::query_as::<_, CountRow>(
            "SELECT bucket AS key, COUNT(*) AS count FROM ( \
                SELECT CASE \
                    WHEN status = 'canceled' THEN 'Rejected' \
                    WHEN resolved_type IS NULL THEN 'Unclassified' \
                    WHEN resolved_type = 'EMERGENCY_CHANGE' THEN 'Emergency Change' \
                    ELSE 'Data Correction' \
                END AS bucket \
                FROM tickets \
                WHERE initial_type = 'ISSUE_REPORT' \
             ) b \
             GROUP BY bucket",
        )
        .fetch_all(pool)
        .await
    }
}
