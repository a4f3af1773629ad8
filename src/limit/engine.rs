//! Core admission decision engine.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::config::RategateConfig;
use crate::context::{IdentityResolver, RequestContext};
use crate::denial::{DefaultDenialHandler, DenialHandler, DenialResponse};
use crate::error::{RategateError, Result};
use crate::event::RateLimitedEvent;
use crate::store::LimiterStore;

use super::key::build_identifier;
use super::policy::LimitPolicy;

/// Capacity of the denial notification channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Format of the informational window-open timestamp stored at the key.
const WINDOW_OPENED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of a guarded call.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The call was admitted; carries the guarded operation's output
    Admitted(T),
    /// The call was denied; carries the handler-produced response
    Denied(DenialResponse),
}

impl<T> Outcome<T> {
    /// The admitted output, or `None` when the call was denied.
    pub fn admitted(self) -> Option<T> {
        match self {
            Outcome::Admitted(value) => Some(value),
            Outcome::Denied(_) => None,
        }
    }

    /// Whether the call was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, Outcome::Denied(_))
    }
}

/// The rate limiter decision engine.
///
/// Orchestrates identifier derivation, the storage-backed admission check
/// and denial handling. The mechanism that intercepts guarded calls is an
/// external collaborator: it supplies the operation name, the declared
/// policy, the request context and the ability to proceed.
///
/// This struct is shared-state safe and can be used across tasks.
pub struct RateGate {
    config: RategateConfig,
    store: Arc<dyn LimiterStore>,
    resolver: Option<Arc<dyn IdentityResolver>>,
    denial: Option<Arc<dyn DenialHandler>>,
    events: broadcast::Sender<RateLimitedEvent>,
}

impl RateGate {
    /// Create an engine over the given store.
    ///
    /// When the configuration delegates denials instead of raising, the
    /// default denial handler is installed; `with_denial_handler` replaces
    /// it.
    pub fn new(config: RategateConfig, store: Arc<dyn LimiterStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let denial: Option<Arc<dyn DenialHandler>> = if config.throws_exception {
            None
        } else {
            Some(Arc::new(DefaultDenialHandler::new(config.clone())))
        };
        Self {
            config,
            store,
            resolver: None,
            denial,
            events,
        }
    }

    /// Register the identity resolver required by username key mode.
    pub fn with_resolver(mut self, resolver: Arc<dyn IdentityResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Replace the denial handler.
    pub fn with_denial_handler(mut self, handler: Arc<dyn DenialHandler>) -> Self {
        self.denial = Some(handler);
        self
    }

    /// Subscribe to denial notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<RateLimitedEvent> {
        self.events.subscribe()
    }

    /// Run `proceed` under the policy's admission check.
    ///
    /// An inert policy, a disabled limiter, or a call with no derivable
    /// identifier proceeds without touching the backend. Otherwise a hit on
    /// the limiter key denies the call and a miss admits it, recording the
    /// window after `proceed` completes.
    ///
    /// The engine is generic over the operation's output and does not
    /// inspect it: an operation whose output is itself an error still opens
    /// the window.
    pub async fn guard<F, Fut, T>(
        &self,
        operation: &str,
        policy: &LimitPolicy,
        context: Option<&RequestContext>,
        proceed: F,
    ) -> Result<Outcome<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if !self.config.enabled || policy.is_inert() {
            return Ok(Outcome::Admitted(proceed().await));
        }

        let identifier = build_identifier(
            &self.config.name_prefix,
            &self.config.name_suffix,
            operation,
            policy,
            context,
            self.resolver.as_deref(),
        )?;
        let Some(key) = identifier else {
            trace!(operation, "No identifier for this call, limiting skipped");
            return Ok(Outcome::Admitted(proceed().await));
        };

        trace!(key = %key, "Checking rate limit");
        if self.store.exists(&key).await? {
            self.deny(operation, policy, context, &key)
        } else {
            self.admit(policy, &key, proceed).await
        }
    }

    fn deny<T>(
        &self,
        operation: &str,
        policy: &LimitPolicy,
        context: Option<&RequestContext>,
        key: &str,
    ) -> Result<Outcome<T>> {
        debug!(key = %key, "Rate limit window open, denying call");
        if let Some(context) = context {
            let _ = self.events.send(RateLimitedEvent::new(operation, context));
        }
        if self.config.throws_exception {
            return Err(RategateError::RateLimited);
        }
        let handler = self
            .denial
            .as_ref()
            .ok_or(RategateError::MissingDenialHandler)?;
        Ok(Outcome::Denied(handler.handle(context, policy)?))
    }

    async fn admit<F, Fut, T>(
        &self,
        policy: &LimitPolicy,
        key: &str,
        proceed: F,
    ) -> Result<Outcome<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let opened = Utc::now().format(WINDOW_OPENED_FORMAT).to_string();
        let value = proceed().await;
        // Recorded after the guarded operation completes, unconditionally;
        // the window opens even when the operation's own output is a failure.
        match policy.window() {
            Some(window) => self.store.set_with_ttl(key, &opened, window).await?,
            None => self.store.set_forever(key, &opened).await?,
        }
        debug!(key = %key, window = ?policy.window(), "Rate limit window opened");
        Ok(Outcome::Admitted(value))
    }
}
