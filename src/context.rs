//! Request context and identity resolution.
//!
//! The context is a read-only snapshot supplied by whatever intercepts the
//! guarded call (HTTP middleware, an explicit handler call). It is passed
//! explicitly through the call chain; the limiter never consults ambient
//! state.

/// Read-only view of the calling context for one guarded call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Remote address of the caller
    pub remote_address: String,
    /// Session identifier, when the caller has one
    pub session_id: Option<String>,
    /// Whether the caller uses a programmatic/REST profile; only consulted
    /// by the default denial handler
    pub rest: bool,
    /// Caller locale for denial message resolution
    pub locale: Option<String>,
}

impl RequestContext {
    /// Create a context for a browser-style caller at the given address.
    pub fn new(remote_address: impl Into<String>) -> Self {
        Self {
            remote_address: remote_address.into(),
            session_id: None,
            rest: false,
            locale: None,
        }
    }

    /// Attach a session identifier.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Mark the caller as programmatic/REST-style.
    pub fn as_rest(mut self) -> Self {
        self.rest = true;
        self
    }

    /// Attach the caller locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// External identity collaborator used by username key mode.
///
/// Registering an implementation is a configuration concern; a policy that
/// keys by username while no resolver is registered is a fatal error, not a
/// soft skip.
pub trait IdentityResolver: Send + Sync {
    /// Resolve the username of the current caller, if any.
    fn username(&self, context: Option<&RequestContext>) -> Option<String>;
}
