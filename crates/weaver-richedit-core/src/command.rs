//! The command vocabulary understood by the in-page editing engine.
//!
//! [`Command`]s are one-way requests whose result is ignored. [`Query`]s
//! produce a value that is coerced and decoded into an
//! [`Answer`](crate::answer::Answer). Both render to a script expression
//! against the engine's `RE` namespace.

use crate::color::Rgba;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// A point in editor content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One-way requests to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // === Content ===
    SetHtml(String),
    SetPlaceholder(String),
    SetContentEditable(bool),
    SetLineHeight(u32),

    // === Styling ===
    /// Strip inline formatting from the selection.
    RemoveFormat,
    /// Font size in pixels for the selection.
    SetFontSize(u32),
    /// Background of the whole editing surface.
    SetEditorBackgroundColor(Rgba),
    /// Base text color of the whole editing surface.
    SetEditorFontColor(Rgba),
    /// Foreground color of the selection.
    SetTextColor(Rgba),
    /// Highlight color of the selection.
    SetTextBackgroundColor(Rgba),

    // === History ===
    Undo,
    Redo,

    // === Inline formatting ===
    Bold,
    Italic,
    Subscript,
    Superscript,
    Strikethrough,
    Underline,

    // === Block formatting ===
    /// Heading level, clamped to 1..=6 when rendered.
    Heading(u8),
    Indent,
    Outdent,
    OrderedList,
    UnorderedList,
    Blockquote,
    Align(Alignment),

    // === Insertion ===
    InsertImage { url: String, alt: String },
    InsertLink { href: String, title: String },

    // === Focus ===
    Focus,
    FocusAt(Point),
    Blur,
}

impl Command {
    /// Render the script expression for this command.
    pub fn script(&self) -> String {
        match self {
            Command::SetHtml(html) => call("setHtml", &[js_str(html)]),
            Command::SetPlaceholder(text) => call("setPlaceholderText", &[js_str(text)]),
            Command::SetContentEditable(editable) => {
                format!("RE.editor.contentEditable = {editable}")
            }
            Command::SetLineHeight(px) => call("setLineHeight", &[js_str(&format!("{px}px"))]),
            Command::RemoveFormat => call("removeFormat", &[]),
            Command::SetFontSize(px) => call("setFontSize", &[js_str(&format!("{px}px"))]),
            Command::SetEditorBackgroundColor(c) => {
                call("setEditorBackgroundColor", &[js_str(&c.to_css())])
            }
            Command::SetEditorFontColor(c) => call("setEditorFontColor", &[js_str(&c.to_css())]),
            Command::SetTextColor(c) => call("setTextColor", &[js_str(&c.to_css())]),
            Command::SetTextBackgroundColor(c) => {
                call("setTextBackgroundColor", &[js_str(&c.to_css())])
            }
            Command::Undo => call("undo", &[]),
            Command::Redo => call("redo", &[]),
            Command::Bold => call("setBold", &[]),
            Command::Italic => call("setItalic", &[]),
            Command::Subscript => call("setSubscript", &[]),
            Command::Superscript => call("setSuperscript", &[]),
            Command::Strikethrough => call("setStrikeThrough", &[]),
            Command::Underline => call("setUnderline", &[]),
            Command::Heading(level) => {
                call("setHeading", &[js_str(&(*level).clamp(1, 6).to_string())])
            }
            Command::Indent => call("setIndent", &[]),
            Command::Outdent => call("setOutdent", &[]),
            Command::OrderedList => call("setOrderedList", &[]),
            Command::UnorderedList => call("setUnorderedList", &[]),
            Command::Blockquote => call("setBlockquote", &[]),
            Command::Align(Alignment::Left) => call("setJustifyLeft", &[]),
            Command::Align(Alignment::Center) => call("setJustifyCenter", &[]),
            Command::Align(Alignment::Right) => call("setJustifyRight", &[]),
            Command::InsertImage { url, alt } => call("insertImage", &[js_str(url), js_str(alt)]),
            Command::InsertLink { href, title } => {
                call("insertLink", &[js_str(href), js_str(title)])
            }
            Command::Focus => call("focus", &[]),
            Command::FocusAt(p) => call("focusAtPoint", &[p.x.to_string(), p.y.to_string()]),
            Command::Blur => call("blurFocus", &[]),
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetHtml(_) => "SetHtml",
            Command::SetPlaceholder(_) => "SetPlaceholder",
            Command::SetContentEditable(_) => "SetContentEditable",
            Command::SetLineHeight(_) => "SetLineHeight",
            Command::RemoveFormat => "RemoveFormat",
            Command::SetFontSize(_) => "SetFontSize",
            Command::SetEditorBackgroundColor(_) => "SetEditorBackgroundColor",
            Command::SetEditorFontColor(_) => "SetEditorFontColor",
            Command::SetTextColor(_) => "SetTextColor",
            Command::SetTextBackgroundColor(_) => "SetTextBackgroundColor",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Bold => "Bold",
            Command::Italic => "Italic",
            Command::Subscript => "Subscript",
            Command::Superscript => "Superscript",
            Command::Strikethrough => "Strikethrough",
            Command::Underline => "Underline",
            Command::Heading(_) => "Heading",
            Command::Indent => "Indent",
            Command::Outdent => "Outdent",
            Command::OrderedList => "OrderedList",
            Command::UnorderedList => "UnorderedList",
            Command::Blockquote => "Blockquote",
            Command::Align(_) => "Align",
            Command::InsertImage { .. } => "InsertImage",
            Command::InsertLink { .. } => "InsertLink",
            Command::Focus => "Focus",
            Command::FocusAt(_) => "FocusAt",
            Command::Blur => "Blur",
        }
    }
}

/// Requests whose result is read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Full editor content as HTML.
    Html,
    /// Editor content as plain text.
    Text,
    /// Whether a non-collapsed selection exists.
    RangeSelectionExists,
    /// Whether any selection (including a bare caret) exists.
    RangeOrCaretSelectionExists,
    /// `href` of the link under the selection.
    SelectedHref,
    /// The editor element's content-editable flag.
    ContentEditable,
    /// Client height of the rendered content element, in pixels.
    ContentHeight,
    /// Current line height, in pixels.
    LineHeight,
    /// Caret offset from the top of the visible viewport, in pixels.
    CaretY,
    /// Outer HTML of the whole loaded document.
    DocumentHtml,
    /// Fetch and clear the engine's pending callback events, as a JSON array.
    TakeEventQueue,
}

impl Query {
    pub fn script(self) -> &'static str {
        match self {
            Query::Html => "RE.getHtml()",
            Query::Text => "RE.getText()",
            Query::RangeSelectionExists => "RE.rangeSelectionExists()",
            Query::RangeOrCaretSelectionExists => "RE.rangeOrCaretSelectionExists()",
            Query::SelectedHref => "RE.getSelectedHref()",
            Query::ContentEditable => "RE.editor.isContentEditable",
            Query::ContentHeight => "document.getElementById('editor').clientHeight",
            Query::LineHeight => "RE.getLineHeight()",
            Query::CaretY => "RE.getRelativeCaretYPosition()",
            Query::DocumentHtml => "document.documentElement.outerHTML",
            Query::TakeEventQueue => "RE.getCommandQueue()",
        }
    }
}

fn call(function: &str, args: &[String]) -> String {
    format!("RE.{}({})", function, args.join(", "))
}

/// Encode a string as a script string literal.
fn js_str(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}
