//! Limiter key derivation.

use crate::context::{IdentityResolver, RequestContext};
use crate::error::{RategateError, Result};

use super::policy::{KeyMode, LimitPolicy};

/// Derive the storage key for one guarded call, or `None` when limiting
/// should be skipped.
///
/// The key is `{prefix}{operation}{suffix}:{mode}[{value}]`. Identical
/// operation and identical key-mode value always produce an identical key;
/// this is the sole property the storage layer depends on.
///
/// Missing request context for the ip-address and session modes is a soft
/// skip: without a web boundary there is nothing meaningful to limit.
/// A missing identity resolver for the username mode is a configuration
/// error instead.
pub fn build_identifier(
    prefix: &str,
    suffix: &str,
    operation: &str,
    policy: &LimitPolicy,
    context: Option<&RequestContext>,
    resolver: Option<&dyn IdentityResolver>,
) -> Result<Option<String>> {
    let value = match policy.key_mode {
        KeyMode::Any => String::new(),
        KeyMode::IpAddress => match context {
            Some(ctx) => ctx.remote_address.clone(),
            None => return Ok(None),
        },
        KeyMode::Session => match context {
            Some(ctx) => ctx.session_id.clone().unwrap_or_default(),
            None => return Ok(None),
        },
        KeyMode::Username => {
            let resolver = resolver.ok_or(RategateError::MissingResolver)?;
            resolver.username(context).unwrap_or_default()
        }
    };
    Ok(Some(format!(
        "{prefix}{operation}{suffix}:{}[{value}]",
        policy.key_mode.as_str()
    )))
}
