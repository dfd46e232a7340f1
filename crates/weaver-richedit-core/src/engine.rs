//! Collaborator traits for the embedded web engine and the hosting view.
//!
//! These define the interface between the bridge logic and the platform
//! (a native webview binding, a test double, ...). The bridge never touches
//! platform APIs directly.

use std::future::Future;

use crate::config::InputConfig;
use crate::error::EngineError;
use crate::value::EvalValue;

/// A width/height pair in host points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The embedded web engine hosting the editing surface.
///
/// All methods are called from the single UI task that owns the bridge.
pub trait Engine {
    /// Evaluate `script` in the loaded document and resolve with its result.
    ///
    /// Engines that can never produce a result for a script must still
    /// resolve, with `EvalValue::None`.
    fn evaluate(&self, script: &str) -> impl Future<Output = Result<EvalValue, EngineError>>;

    /// Replace the loaded document with `html`, in place (no navigation).
    fn load_html(&self, html: &str, base_url: Option<&str>);

    /// Apply per-instance input assistance settings.
    ///
    /// Called once at construction. Engines without such settings ignore it.
    fn configure_input(&self, _input: &InputConfig) {}
}

/// The scrollable native view that contains the engine.
pub trait HostView {
    /// Size of the visible viewport.
    fn viewport_size(&self) -> Size;

    /// Current vertical scroll offset.
    fn scroll_offset_y(&self) -> f64;

    /// Set the size of the scrollable content region.
    fn set_content_size(&mut self, size: Size);

    /// Animate the vertical scroll offset to `y`.
    fn animate_scroll_to(&mut self, y: f64);
}

/// What triggered a navigation inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// The user activated a link.
    LinkActivated,
    /// Anything else (script-initiated, reload, form submission, ...).
    Other,
}

/// A navigation the engine is about to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: String,
    pub kind: NavigationKind,
}

impl NavigationRequest {
    pub fn new(url: impl Into<String>, kind: NavigationKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

/// Decision handed back to the engine for a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    Allow,
    Cancel,
}
