//! Callback decoding: engine → native events.
//!
//! The engine queues event strings and signals the queue by navigating to a
//! reserved pseudo-URL. The bridge cancels that navigation, fetches the queue
//! as a JSON array of strings, and routes each entry in order.

use smol_str::SmolStr;

use crate::error::DecodeError;

/// One engine-originated event, parsed by prefix.
///
/// Matching is by prefix, first match wins: `ready`, `input`, `focus`,
/// `blur`, `action/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackEvent {
    Ready,
    Input,
    Focus,
    Blur,
    /// Custom action; the name is everything after the first `action/`.
    Action(SmolStr),
}

impl CallbackEvent {
    /// Parse an event string. Unknown events yield `None`.
    pub fn parse(event: &str) -> Option<Self> {
        if event.starts_with("ready") {
            Some(CallbackEvent::Ready)
        } else if event.starts_with("input") {
            Some(CallbackEvent::Input)
        } else if event.starts_with("focus") {
            Some(CallbackEvent::Focus)
        } else if event.starts_with("blur") {
            Some(CallbackEvent::Blur)
        } else if event.starts_with("action/") {
            Some(CallbackEvent::Action(SmolStr::new(event.replacen(
                "action/", "", 1,
            ))))
        } else {
            None
        }
    }
}

/// Whether `url` is the reserved "queue ready" signal.
pub fn is_callback_url(url: &str, scheme: &str) -> bool {
    !scheme.is_empty() && url.starts_with(scheme)
}

/// Decode a fetched event queue.
pub fn decode_queue(raw: &str) -> Result<Vec<String>, DecodeError> {
    serde_json::from_str(raw).map_err(DecodeError::EventQueue)
}

/// Decode a fetched event queue, logging and dropping it if malformed.
pub fn decode_queue_lossy(raw: &str) -> Vec<String> {
    match decode_queue(raw) {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(target: "weaver::richedit::callback", raw, "{}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixes() {
        assert_eq!(CallbackEvent::parse("ready"), Some(CallbackEvent::Ready));
        assert_eq!(CallbackEvent::parse("input"), Some(CallbackEvent::Input));
        assert_eq!(CallbackEvent::parse("inputChanged"), Some(CallbackEvent::Input));
        assert_eq!(CallbackEvent::parse("focus"), Some(CallbackEvent::Focus));
        assert_eq!(CallbackEvent::parse("blur"), Some(CallbackEvent::Blur));
        assert_eq!(CallbackEvent::parse("selectionchange"), None);
        assert_eq!(CallbackEvent::parse(""), None);
    }

    #[test]
    fn test_parse_action_name() {
        assert_eq!(
            CallbackEvent::parse("action/highlight"),
            Some(CallbackEvent::Action("highlight".into()))
        );
        // Only the first prefix occurrence is stripped.
        assert_eq!(
            CallbackEvent::parse("action/action/nested"),
            Some(CallbackEvent::Action("action/nested".into()))
        );
        assert_eq!(CallbackEvent::parse("action"), None);
    }

    #[test]
    fn test_callback_url() {
        assert!(is_callback_url("re-callback://", "re-callback://"));
        assert!(is_callback_url("re-callback://anything", "re-callback://"));
        assert!(!is_callback_url("https://example.com", "re-callback://"));
        assert!(!is_callback_url("https://example.com", ""));
    }

    #[test]
    fn test_decode_queue() {
        assert_eq!(
            decode_queue(r#"["ready","input","action/x"]"#).unwrap(),
            vec!["ready", "input", "action/x"]
        );
        assert!(decode_queue("").is_err());
        assert!(decode_queue("[1, 2]").is_err());
        assert!(decode_queue_lossy("{not json").is_empty());
        assert!(decode_queue_lossy("").is_empty());
    }
}
