//! Built-in denial handler.

use std::sync::Arc;

use crate::config::RategateConfig;
use crate::context::RequestContext;
use crate::error::{RategateError, Result};
use crate::limit::LimitPolicy;

use super::message::{resolve_message, MessageSource};
use super::{DenialHandler, DenialResponse, RestDenial};

/// HTTP-equivalent status carried by structured denial payloads.
const FORBIDDEN: u16 = 403;

/// Default denial strategy, selected by caller profile.
///
/// Browser-style callers are redirected to the configured denial page when
/// one exists, otherwise the resolved message is written to the response
/// channel. Programmatic callers are redirected likewise, otherwise they get
/// a structured forbidden payload.
pub struct DefaultDenialHandler {
    config: RategateConfig,
    messages: Option<Arc<dyn MessageSource>>,
}

impl DefaultDenialHandler {
    /// Create a handler over the limiter configuration.
    pub fn new(config: RategateConfig) -> Self {
        Self {
            config,
            messages: None,
        }
    }

    /// Attach a message source for denial text lookups.
    pub fn with_message_source(mut self, messages: Arc<dyn MessageSource>) -> Self {
        self.messages = Some(messages);
        self
    }

    fn resolve(&self, policy: &LimitPolicy, context: &RequestContext) -> String {
        resolve_message(policy, self.messages.as_deref(), context.locale.as_deref())
    }

    fn handle_html(&self, context: &RequestContext, policy: &LimitPolicy) -> DenialResponse {
        if let Some(url) = non_blank(self.config.denied_html_url.as_deref()) {
            return DenialResponse::Redirect(url);
        }
        DenialResponse::Message(self.resolve(policy, context))
    }

    fn handle_rest(&self, context: &RequestContext, policy: &LimitPolicy) -> DenialResponse {
        if let Some(url) = non_blank(self.config.denied_rest_url.as_deref()) {
            return DenialResponse::Redirect(url);
        }
        DenialResponse::Rest(RestDenial {
            status: FORBIDDEN,
            message: self.resolve(policy, context),
        })
    }
}

impl DenialHandler for DefaultDenialHandler {
    fn handle(
        &self,
        context: Option<&RequestContext>,
        policy: &LimitPolicy,
    ) -> Result<DenialResponse> {
        let context = context.ok_or(RategateError::MissingRequestContext)?;
        Ok(if context.rest {
            self.handle_rest(context, policy)
        } else {
            self.handle_html(context, policy)
        })
    }
}

fn non_blank(url: Option<&str>) -> Option<String> {
    url.map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}
