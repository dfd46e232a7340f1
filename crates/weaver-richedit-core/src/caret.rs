//! Caret visibility tracking.
//!
//! After each input, the bridge re-measures the content and scrolls the host
//! view so the caret stays inside the visible viewport. Each measurement is a
//! separate round-trip, issued only after the previous one answered.

use crate::answer::Answer;
use crate::channel::CommandChannel;
use crate::command::Query;
use crate::engine::{Engine, HostView, Size};
use crate::error::Cancelled;

/// Caret height is the line height minus this inset.
pub const CURSOR_INSET_PX: f64 = 4.0;

/// Geometry gathered for one scroll decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretGeometry {
    /// Caret offset from the top of the visible viewport. Negative if above it.
    pub caret_y: f64,
    pub line_height: f64,
    pub viewport_height: f64,
    pub scroll_y: f64,
}

impl CaretGeometry {
    pub fn cursor_height(&self) -> f64 {
        self.line_height - CURSOR_INSET_PX
    }

    /// Target vertical scroll offset, or `None` if the caret is already visible.
    pub fn scroll_target(&self) -> Option<f64> {
        if self.caret_y + self.cursor_height() > self.viewport_height {
            Some(self.scroll_y + (self.caret_y + self.line_height) - self.viewport_height)
        } else if self.caret_y < 0.0 {
            Some((self.scroll_y + self.caret_y).max(0.0))
        } else {
            None
        }
    }
}

/// Measure content and caret, then scroll `host` if the caret is out of view.
///
/// `line_height_fallback` is used when the engine is not loaded or reports
/// an unusable line height. Returns the scroll target that was applied.
pub async fn keep_caret_visible<E: Engine, H: HostView>(
    channel: &CommandChannel<E>,
    host: &mut H,
    loaded: bool,
    line_height_fallback: u32,
) -> Result<Option<f64>, Cancelled> {
    let viewport = host.viewport_size();

    let content_height = channel
        .query::<f64>(Query::ContentHeight)
        .await?
        .filter(|h| *h > 0.0)
        .or(viewport.height);
    host.set_content_size(Size::new(viewport.width, content_height));

    let line_height = match channel.query::<i64>(Query::LineHeight).await? {
        Answer::Value(px) if loaded && px > 0 => px as f64,
        _ => line_height_fallback as f64,
    };

    let caret_y = channel.query::<f64>(Query::CaretY).await?.or(0.0);

    let geometry = CaretGeometry {
        caret_y,
        line_height,
        viewport_height: host.viewport_size().height,
        scroll_y: host.scroll_offset_y(),
    };
    let target = geometry.scroll_target();

    tracing::trace!(
        target: "weaver::richedit::caret",
        ?geometry,
        content_height,
        ?target,
        "caret check"
    );

    if let Some(y) = target {
        host.animate_scroll_to(y);
    }
    Ok(target)
}
