pub mod assignments;
pub mod metrics;
pub mod scoring;
pub mod tickets;
pub mod users;
