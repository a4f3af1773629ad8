//! Denial handling strategies.
//!
//! A denial handler is a capability, not a fixed behavior: the engine
//! delegates denied calls to whatever handler is registered, and callers may
//! supply their own.

mod default;
mod message;

pub use default::DefaultDenialHandler;
pub use message::{MessageSource, DEFAULT_MESSAGE_CODE, DEFAULT_MESSAGE_TEXT};

use serde::Serialize;

use crate::context::RequestContext;
use crate::error::Result;
use crate::limit::LimitPolicy;

/// Structured denial payload for programmatic callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestDenial {
    /// HTTP-equivalent status code
    pub status: u16,
    /// Resolved denial message
    pub message: String,
}

/// Response produced in place of the guarded operation when a call is
/// denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialResponse {
    /// Redirect the caller to the given target
    Redirect(String),
    /// Write the message directly to the response channel
    Message(String),
    /// Structured error payload with a forbidden status
    Rest(RestDenial),
}

/// Strategy invoked when the limit window is open.
pub trait DenialHandler: Send + Sync {
    /// Produce a response for the denied call, or fail.
    fn handle(
        &self,
        context: Option<&RequestContext>,
        policy: &LimitPolicy,
    ) -> Result<DenialResponse>;
}
