//! Denial message resolution.

use crate::limit::LimitPolicy;

/// Lookup code used when a policy carries no message override.
pub const DEFAULT_MESSAGE_CODE: &str = "rategate.tooFrequentTry";

/// Fallback text when no message source resolves any code.
pub const DEFAULT_MESSAGE_TEXT: &str = "Your operation is too frequent, please try again later";

/// Source of localized denial messages.
///
/// Text resolution is an external concern; the limiter only defines the
/// lookup seam and the precedence order.
pub trait MessageSource: Send + Sync {
    /// Resolve `code` for `locale`, returning `None` when unknown.
    fn resolve(&self, code: &str, locale: Option<&str>) -> Option<String>;
}

/// Resolve the denial message for a policy.
///
/// Precedence: literal policy text, then the policy's message code, then the
/// library default code, then the hardcoded fallback. Blank text and blank
/// codes are treated as absent.
pub(crate) fn resolve_message(
    policy: &LimitPolicy,
    source: Option<&dyn MessageSource>,
    locale: Option<&str>,
) -> String {
    if let Some(text) = policy.message_text.as_deref() {
        if !text.trim().is_empty() {
            return text.to_string();
        }
    }
    if let Some(source) = source {
        let codes = policy
            .message_code
            .as_deref()
            .into_iter()
            .chain([DEFAULT_MESSAGE_CODE]);
        for code in codes {
            if code.trim().is_empty() {
                continue;
            }
            if let Some(text) = source.resolve(code, locale) {
                return text;
            }
        }
    }
    DEFAULT_MESSAGE_TEXT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    struct MapSource(HashMap<&'static str, &'static str>);

    impl MessageSource for MapSource {
        fn resolve(&self, code: &str, _locale: Option<&str>) -> Option<String> {
            self.0.get(code).map(|text| text.to_string())
        }
    }

    fn source(entries: &[(&'static str, &'static str)]) -> MapSource {
        MapSource(entries.iter().copied().collect())
    }

    #[test]
    fn test_literal_text_wins() {
        let policy = LimitPolicy::new(1)
            .with_message_text("slow down")
            .with_message_code("custom.code");
        let source = source(&[("custom.code", "from code")]);
        assert_eq!(resolve_message(&policy, Some(&source), None), "slow down");
    }

    #[test]
    fn test_blank_text_falls_through_to_code() {
        let policy = LimitPolicy::new(1)
            .with_message_text("   ")
            .with_message_code("custom.code");
        let source = source(&[("custom.code", "from code")]);
        assert_eq!(resolve_message(&policy, Some(&source), None), "from code");
    }

    #[test]
    fn test_unknown_code_falls_through_to_default_code() {
        let policy = LimitPolicy::new(1).with_message_code("custom.missing");
        let source = source(&[(DEFAULT_MESSAGE_CODE, "library default")]);
        assert_eq!(
            resolve_message(&policy, Some(&source), None),
            "library default"
        );
    }

    #[test]
    fn test_fallback_without_source() {
        let policy = LimitPolicy::new(1);
        assert_eq!(resolve_message(&policy, None, None), DEFAULT_MESSAGE_TEXT);
    }

    #[test]
    fn test_fallback_when_nothing_resolves() {
        let policy = LimitPolicy::new(1).with_message_code("custom.missing");
        let source = source(&[]);
        assert_eq!(
            resolve_message(&policy, Some(&source), None),
            DEFAULT_MESSAGE_TEXT
        );
    }
}
