//! Error types for the rich-text bridge.
//!
//! Only [`BridgeError`] is ever returned to the host, and only while the
//! bridge is being constructed. Everything after that substitutes a fallback
//! and logs.

use std::path::PathBuf;

use miette::Diagnostic;

/// Fatal construction-time errors.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum BridgeError {
    /// The engine bootstrap document could not be found.
    #[error("editor bootstrap resource not found: {}", path.display())]
    #[diagnostic(
        code(weaver::richedit::bootstrap),
        help("check `resource_dir` and `bootstrap_file` in the editor config")
    )]
    BootstrapMissing { path: PathBuf },

    /// The bootstrap document exists but could not be read.
    #[error("failed to read editor bootstrap resource {}", path.display())]
    #[diagnostic(code(weaver::richedit::bootstrap))]
    BootstrapUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Transport failure reported by the engine while evaluating a script.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[error("script evaluation failed: {0}")]
#[diagnostic(code(weaver::richedit::engine))]
pub struct EngineError(pub String);

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError(s.to_string())
    }
}

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError(s)
    }
}

/// Failure decoding an engine-produced payload.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum DecodeError {
    /// The pending event queue was not a JSON array of strings.
    #[error("malformed event queue: {0}")]
    #[diagnostic(code(weaver::richedit::decode))]
    EventQueue(#[source] serde_json::Error),

    /// A message-channel body did not match the expected shape.
    #[error("malformed `{name}` message: {source}")]
    #[diagnostic(code(weaver::richedit::decode))]
    Message {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The channel was torn down while a query was in flight.
///
/// Continuations waiting on the query must not run.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("command channel torn down")]
pub struct Cancelled;
