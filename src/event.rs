//! Denial notification events.

use crate::context::RequestContext;

/// Event published when a guarded call is denied.
///
/// Carries a snapshot of the originating request context for external
/// subscribers (metrics, auditing). Delivery is fire-and-forget; a missing
/// subscriber is not an error.
#[derive(Debug, Clone)]
pub struct RateLimitedEvent {
    /// Qualified name of the guarded operation
    pub operation: String,
    /// Remote address of the denied caller
    pub remote_address: String,
    /// Session identifier, when the caller had one
    pub session_id: Option<String>,
    /// Whether the caller used a programmatic/REST profile
    pub rest: bool,
}

impl RateLimitedEvent {
    pub(crate) fn new(operation: &str, context: &RequestContext) -> Self {
        Self {
            operation: operation.to_string(),
            remote_address: context.remote_address.clone(),
            session_id: context.session_id.clone(),
            rest: context.rest,
        }
    }
}
