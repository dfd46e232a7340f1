//! Bridge-owned editor state.

use crate::color::Rgba;
use crate::command::Point;

/// A focus request made before the engine finished loading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusRequest {
    Focus,
    At(Point),
}

/// Editor state, mutated only on the UI task.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    /// Set once, on the first `ready` event.
    pub loaded: bool,
    pub editable_requested: bool,
    /// Last known content: what the host set, or what the engine last reported.
    pub current_html: String,
    pub placeholder: String,
    pub line_height_px: u32,
    pub background_color: Option<Rgba>,
    pub font_color: Option<Rgba>,
    /// Scale applied to the loaded document.
    pub content_scale: f64,
    /// Last reported scaled content height.
    pub reported_height: f64,
    pub pending_focus: Option<FocusRequest>,
}

impl EditorState {
    pub fn new(line_height_px: u32) -> Self {
        Self {
            loaded: false,
            editable_requested: true,
            current_html: String::new(),
            placeholder: String::new(),
            line_height_px,
            background_color: None,
            font_color: None,
            content_scale: 1.0,
            reported_height: 0.0,
            pending_focus: None,
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LINE_HEIGHT_PX)
    }
}
