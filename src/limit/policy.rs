//! Limit policy descriptors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Time granularity for a limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    /// The window never expires once opened
    Forever,
}

impl TimeUnit {
    /// Get the duration of one unit, or `None` for `Forever`.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            TimeUnit::Seconds => Some(Duration::from_secs(1)),
            TimeUnit::Minutes => Some(Duration::from_secs(60)),
            TimeUnit::Hours => Some(Duration::from_secs(3600)),
            TimeUnit::Days => Some(Duration::from_secs(86400)),
            TimeUnit::Forever => None,
        }
    }
}

/// Strategy for deriving the caller-specific portion of a limiter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum KeyMode {
    /// One shared key for all callers
    Any,
    /// Key by the caller's remote address
    #[default]
    IpAddress,
    /// Key by the caller's session identifier
    Session,
    /// Key by the username obtained from the identity resolver
    Username,
}

impl KeyMode {
    /// The value embedded in the limiter key for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMode::Any => "any",
            KeyMode::IpAddress => "ip-address",
            KeyMode::Session => "session",
            KeyMode::Username => "username",
        }
    }
}

/// Immutable limit descriptor attached to a guarded operation.
///
/// A policy with a non-positive `ttl` or an unset `unit` is inert: guarded
/// calls always proceed and the storage backend is never consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitPolicy {
    /// Time amount for the limit window
    pub ttl: i64,

    /// Time unit for the limit window
    #[serde(default = "default_unit")]
    pub unit: Option<TimeUnit>,

    /// Key derivation mode
    #[serde(default)]
    pub key_mode: KeyMode,

    /// Lookup code for the denial message, used when `message_text` is blank
    #[serde(default)]
    pub message_code: Option<String>,

    /// Literal denial message, takes precedence over `message_code`
    #[serde(default)]
    pub message_text: Option<String>,
}

fn default_unit() -> Option<TimeUnit> {
    Some(TimeUnit::Seconds)
}

impl LimitPolicy {
    /// Create a policy limiting to one call per `ttl` seconds.
    pub fn new(ttl: i64) -> Self {
        Self {
            ttl,
            unit: default_unit(),
            key_mode: KeyMode::default(),
            message_code: None,
            message_text: None,
        }
    }

    /// Set the time unit.
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Set the key derivation mode.
    pub fn with_key_mode(mut self, key_mode: KeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    /// Set the denial message lookup code.
    pub fn with_message_code(mut self, code: impl Into<String>) -> Self {
        self.message_code = Some(code.into());
        self
    }

    /// Set the literal denial message.
    pub fn with_message_text(mut self, text: impl Into<String>) -> Self {
        self.message_text = Some(text.into());
        self
    }

    /// Whether this policy applies no limiting at all.
    pub fn is_inert(&self) -> bool {
        self.ttl <= 0 || self.unit.is_none()
    }

    /// The effective window for an admitted call, or `None` when the window
    /// record should never expire.
    pub fn window(&self) -> Option<Duration> {
        if self.ttl <= 0 {
            return None;
        }
        let unit = self.unit?.duration()?;
        Some(Duration::from_secs(
            unit.as_secs().saturating_mul(self.ttl as u64),
        ))
    }
}
