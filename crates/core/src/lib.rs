//! Domain core for the ticket management service: scoring, workflow,
//! authorization, point distribution and change narration, plus the
//! persistence seam the engine runs on.

pub mod audit;
pub mod distribution;
pub mod effort;
pub mod engine;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod narration;
pub mod policy;
pub mod priority;
pub mod roles;
pub mod search;
pub mod store;
pub mod ticket;
pub mod types;
pub mod workflow;
