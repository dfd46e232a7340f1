//! In-process engine, host view and delegate doubles.
//!
//! Used by the test suites and by the `richedit-replay` tool to drive the
//! bridge without a real webview. All three are cheap handles over shared
//! state: clone one before handing it to the bridge to keep inspecting it.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::future::{Future, ready};
use std::rc::Rc;

use crate::channel::Teardown;
use crate::config::InputConfig;
use crate::delegate::EditorDelegate;
use crate::engine::{Engine, HostView, Size};
use crate::error::EngineError;
use crate::value::EvalValue;

#[derive(Default)]
struct EngineState {
    responses: HashMap<String, VecDeque<Result<EvalValue, EngineError>>>,
    teardown_on: HashMap<String, Teardown>,
    evaluated: Vec<String>,
    loaded: Vec<String>,
    input: Option<InputConfig>,
}

/// Engine that answers scripts from a table.
///
/// Each script maps to a queue of results. Results are consumed in order,
/// except the last one, which keeps answering. Unknown scripts resolve with
/// [`EvalValue::None`].
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    state: Rc<RefCell<EngineState>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result for `script`.
    pub fn respond(&self, script: impl Into<String>, value: impl Into<EvalValue>) {
        self.push(script.into(), Ok(value.into()));
    }

    /// Queue a transport failure for `script`.
    pub fn fail(&self, script: impl Into<String>, message: &str) {
        self.push(script.into(), Err(EngineError::from(message)));
    }

    /// Forget every queued result for `script`.
    pub fn reset(&self, script: &str) {
        self.state.borrow_mut().responses.remove(script);
    }

    /// Trigger `teardown` while `script` is being evaluated.
    pub fn teardown_on(&self, script: impl Into<String>, teardown: Teardown) {
        self.state
            .borrow_mut()
            .teardown_on
            .insert(script.into(), teardown);
    }

    /// Every script evaluated so far, in order.
    pub fn evaluated(&self) -> Vec<String> {
        self.state.borrow().evaluated.clone()
    }

    /// Every document passed to `load_html`, in order.
    pub fn loaded_documents(&self) -> Vec<String> {
        self.state.borrow().loaded.clone()
    }

    pub fn input_config(&self) -> Option<InputConfig> {
        self.state.borrow().input.clone()
    }

    pub fn clear_evaluated(&self) {
        self.state.borrow_mut().evaluated.clear();
    }

    fn push(&self, script: String, result: Result<EvalValue, EngineError>) {
        self.state
            .borrow_mut()
            .responses
            .entry(script)
            .or_default()
            .push_back(result);
    }
}

impl Engine for ScriptedEngine {
    fn evaluate(&self, script: &str) -> impl Future<Output = Result<EvalValue, EngineError>> {
        let mut state = self.state.borrow_mut();
        state.evaluated.push(script.to_owned());
        if let Some(teardown) = state.teardown_on.get(script) {
            teardown.trigger();
        }
        let result = match state.responses.get_mut(script) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        ready(result.unwrap_or(Ok(EvalValue::None)))
    }

    fn load_html(&self, html: &str, _base_url: Option<&str>) {
        self.state.borrow_mut().loaded.push(html.to_owned());
    }

    fn configure_input(&self, input: &InputConfig) {
        self.state.borrow_mut().input = Some(input.clone());
    }
}

#[derive(Default)]
struct HostState {
    viewport: Size,
    scroll_y: f64,
    content_sizes: Vec<Size>,
    scrolls: Vec<f64>,
}

/// Host view with a fixed viewport that records what the bridge asks of it.
#[derive(Clone, Default)]
pub struct RecordingHost {
    state: Rc<RefCell<HostState>>,
}

impl RecordingHost {
    pub fn new(viewport: Size) -> Self {
        let host = Self::default();
        host.state.borrow_mut().viewport = viewport;
        host
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.state.borrow_mut().viewport = viewport;
    }

    pub fn content_sizes(&self) -> Vec<Size> {
        self.state.borrow().content_sizes.clone()
    }

    /// Targets of every animated scroll, in order.
    pub fn scrolls(&self) -> Vec<f64> {
        self.state.borrow().scrolls.clone()
    }
}

impl HostView for RecordingHost {
    fn viewport_size(&self) -> Size {
        self.state.borrow().viewport
    }

    fn scroll_offset_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn set_content_size(&mut self, size: Size) {
        self.state.borrow_mut().content_sizes.push(size);
    }

    fn animate_scroll_to(&mut self, y: f64) {
        let mut state = self.state.borrow_mut();
        state.scroll_y = y;
        state.scrolls.push(y);
    }
}

/// A delegate notification, as recorded by [`RecordingDelegate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    HeightChanged(f64),
    ContentChanged(String),
    FocusGained,
    FocusLost,
    Ready,
    CustomAction(String),
    LinkQuery(String),
}

/// Delegate that records every notification.
#[derive(Clone)]
pub struct RecordingDelegate {
    log: Rc<RefCell<Vec<Notification>>>,
    allow_links: bool,
}

impl Default for RecordingDelegate {
    fn default() -> Self {
        Self {
            log: Rc::default(),
            allow_links: true,
        }
    }
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A delegate that refuses every link.
    pub fn denying_links() -> Self {
        Self {
            allow_links: false,
            ..Self::default()
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    fn record(&self, notification: Notification) {
        self.log.borrow_mut().push(notification);
    }
}

impl EditorDelegate for RecordingDelegate {
    fn height_changed(&mut self, height: f64) {
        self.record(Notification::HeightChanged(height));
    }

    fn content_changed(&mut self, html: &str) {
        self.record(Notification::ContentChanged(html.to_owned()));
    }

    fn focus_gained(&mut self) {
        self.record(Notification::FocusGained);
    }

    fn focus_lost(&mut self) {
        self.record(Notification::FocusLost);
    }

    fn ready(&mut self) {
        self.record(Notification::Ready);
    }

    fn custom_action(&mut self, name: &str) {
        self.record(Notification::CustomAction(name.to_owned()));
    }

    fn should_follow_link(&mut self, url: &str) -> bool {
        self.record(Notification::LinkQuery(url.to_owned()));
        self.allow_links
    }
}
