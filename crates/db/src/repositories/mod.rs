//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod audit_repo;
pub mod comment_repo;
pub mod metrics_repo;
pub mod ticket_repo;
pub mod user_repo;
pub mod user_score_repo;

pub use assignment_repo::AssignmentRepo;
pub use audit_repo::AuditLogRepo;
pub use comment_repo::CommentRepo;
pub use metrics_repo::MetricsRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;
pub use user_score_repo::UserScoreRepo;
