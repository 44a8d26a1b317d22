use std::sync::Arc;

use tms_core::engine::TicketEngine;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the engine holds its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Ticket operations over the configured record store.
    pub engine: TicketEngine,
    pub config: Arc<ServerConfig>,
}
