//! Viewport rescaling.
//!
//! The engine reports its layout size over the message channel. When the
//! layout width differs from the host view's width, the loaded document is
//! rewritten with a CSS transform on `<body>` so it fits without reflowing.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Deserialize;

/// Layout size reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ViewportSample {
    pub width: f64,
    pub height: f64,
}

static BODY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<body\b[^>]*>").expect("valid body tag regex")
});

static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\s)style\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid style regex")
});

static INJECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"position: fixed; top: 0px; left: 0px; transform: scale\([^)]*\); transform-origin: 0% 0%;\s*",
    )
    .expect("valid injected style regex")
});

/// Scale that fits `reported_width` into `host_width`.
///
/// Returns `None` for a degenerate sample (zero, negative or non-finite width).
pub fn compute_scale(host_width: f64, reported_width: f64) -> Option<f64> {
    if !reported_width.is_finite() || reported_width <= 0.0 || !host_width.is_finite() {
        return None;
    }
    Some((host_width / reported_width).max(0.0))
}

/// Format a scale factor the way it appears in the injected CSS.
///
/// Integral values keep a trailing `.0` (`2.0`, not `2`).
pub fn format_scale(scale: f64) -> String {
    if scale.fract() == 0.0 {
        format!("{scale:.1}")
    } else {
        scale.to_string()
    }
}

/// The declarations prepended to the body's style.
pub fn transform_declarations(scale: f64) -> String {
    format!(
        "position: fixed; top: 0px; left: 0px; transform: scale({}); transform-origin: 0% 0%;",
        format_scale(scale)
    )
}

/// Rewrite the first `<body>` tag of `html` to apply `scale`.
///
/// An existing `style` attribute keeps its declarations, with the transform
/// prepended; a transform injected by an earlier rewrite is replaced rather
/// than stacked. Returns `None` if the document has no body tag.
pub fn rewrite_body(html: &str, scale: f64) -> Option<String> {
    let body = BODY_TAG.find(html)?;
    let tag = body.as_str();
    let declarations = transform_declarations(scale);

    let new_tag = match STYLE_ATTR.captures(tag) {
        Some(caps) => {
            let whole = caps.get(0)?;
            let lead = caps.get(1).map_or(" ", |m| m.as_str());
            let existing = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map_or("", |m| m.as_str());
            let existing = INJECTED.replace_all(existing, "");
            let merged = if existing.trim().is_empty() {
                declarations
            } else {
                format!("{} {}", declarations, existing.trim_start())
            };
            format!(
                "{}{}style=\"{}\"{}",
                &tag[..whole.start()],
                lead,
                merged.replace('"', "'"),
                &tag[whole.end()..]
            )
        }
        None => {
            let (head, close) = match tag.strip_suffix("/>") {
                Some(head) => (head, "/>"),
                None => (&tag[..tag.len() - 1], ">"),
            };
            format!("{} style=\"{}\"{}", head.trim_end(), declarations, close)
        }
    };

    let mut out = String::with_capacity(html.len() + new_tag.len());
    out.push_str(&html[..body.start()]);
    out.push_str(&new_tag);
    out.push_str(&html[body.end()..]);
    Some(out)
}
