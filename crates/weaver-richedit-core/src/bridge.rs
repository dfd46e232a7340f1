//! RichEditor - the bridge between a host view and the in-page editing engine.
//!
//! Host-facing setters either push to the engine immediately or, before the
//! engine reports `ready`, remember the intent and flush it on the first
//! `ready`. Engine events arrive through [`RichEditor::handle_navigation`]
//! (callback queue) and [`RichEditor::handle_message`] (layout samples).
//!
//! None of the public methods fail. Engine-side problems are logged and
//! answered with a fallback; after [`RichEditor::teardown`] every method is a
//! no-op.

use crate::answer::Answer;
use crate::bootstrap::Bootstrap;
use crate::callback::{CallbackEvent, decode_queue_lossy, is_callback_url};
use crate::caret::keep_caret_visible;
use crate::channel::{CommandChannel, Teardown};
use crate::color::Rgba;
use crate::command::{Command, Point, Query};
use crate::config::EditorConfig;
use crate::delegate::EditorDelegate;
use crate::engine::{Engine, HostView, NavigationKind, NavigationPolicy, NavigationRequest};
use crate::error::{BridgeError, Cancelled, DecodeError};
use crate::rescale::{ViewportSample, compute_scale, rewrite_body};
use crate::state::{EditorState, FocusRequest};

/// A rich-text editor control bound to an engine and a host view.
pub struct RichEditor<E, H> {
    channel: CommandChannel<E>,
    host: H,
    delegate: Option<Box<dyn EditorDelegate>>,
    state: EditorState,
    config: EditorConfig,
    base_url: Option<String>,
}

impl<E: Engine, H: HostView> RichEditor<E, H> {
    /// Create the editor and start loading the bootstrap document.
    ///
    /// Fails only if the bootstrap resource cannot be located or read.
    pub fn new(engine: E, host: H, config: EditorConfig) -> Result<Self, BridgeError> {
        let bootstrap = Bootstrap::locate(&config)?;
        engine.configure_input(&config.input);
        engine.load_html(&bootstrap.html, Some(&bootstrap.base_url));

        tracing::debug!(
            target: "weaver::richedit",
            bootstrap = %bootstrap.path.display(),
            "editor created"
        );

        Ok(Self {
            channel: CommandChannel::new(engine),
            host,
            delegate: None,
            state: EditorState::new(config.default_line_height_px),
            config,
            base_url: Some(bootstrap.base_url),
        })
    }

    // === Accessors ===

    pub fn set_delegate(&mut self, delegate: impl EditorDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.state.loaded
    }

    pub fn engine(&self) -> &E {
        self.channel.engine()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Last known content.
    pub fn html(&self) -> &str {
        &self.state.current_html
    }

    /// Handle that tears the editor down, usable while an operation is suspended.
    pub fn teardown_handle(&self) -> Teardown {
        self.channel.teardown_handle()
    }

    /// Stop talking to the engine. Pending continuations are dropped.
    pub fn teardown(&self) {
        tracing::debug!(target: "weaver::richedit", "teardown");
        self.channel.teardown_handle().trigger();
    }

    // === Buffered settings ===

    pub async fn set_html(&mut self, html: impl Into<String>) {
        self.state.current_html = html.into();
        if self.state.loaded {
            let command = Command::SetHtml(self.state.current_html.clone());
            self.push(&command).await;
        }
    }

    pub async fn set_editing_enabled(&mut self, enabled: bool) {
        self.state.editable_requested = enabled;
        if self.state.loaded {
            self.push(&Command::SetContentEditable(enabled)).await;
        }
    }

    pub async fn set_placeholder(&mut self, text: impl Into<String>) {
        self.state.placeholder = text.into();
        if self.state.loaded {
            let command = Command::SetPlaceholder(self.state.placeholder.clone());
            self.push(&command).await;
        }
    }

    pub async fn set_line_height(&mut self, px: u32) {
        self.state.line_height_px = px;
        if self.state.loaded {
            self.push(&Command::SetLineHeight(px)).await;
        }
    }

    pub async fn set_background_color(&mut self, color: Rgba) {
        self.state.background_color = Some(color);
        if self.state.loaded {
            self.push(&Command::SetEditorBackgroundColor(color)).await;
        }
    }

    pub async fn set_font_color(&mut self, color: Rgba) {
        self.state.font_color = Some(color);
        if self.state.loaded {
            self.push(&Command::SetEditorFontColor(color)).await;
        }
    }

    pub async fn focus(&mut self) {
        self.request_focus(FocusRequest::Focus).await;
    }

    pub async fn focus_at(&mut self, point: Point) {
        self.request_focus(FocusRequest::At(point)).await;
    }

    /// Drop focus. Before load this cancels any pending focus request.
    pub async fn blur(&mut self) {
        if self.state.loaded {
            self.push(&Command::Blur).await;
        } else {
            self.state.pending_focus = None;
        }
    }

    async fn request_focus(&mut self, request: FocusRequest) {
        if self.state.loaded {
            self.push(&focus_command(request)).await;
        } else {
            self.state.pending_focus = Some(request);
        }
    }

    // === Commands and queries ===

    /// Run a formatting or styling command. Dropped before the engine is ready.
    pub async fn execute(&mut self, command: Command) {
        if !self.state.loaded {
            tracing::debug!(
                target: "weaver::richedit",
                command = command.name(),
                "engine not ready, dropping command"
            );
            return;
        }
        self.push(&command).await;
    }

    /// Fetch the content from the engine. Falls back to the last known content.
    pub async fn fetch_html(&self) -> String {
        if !self.state.loaded {
            return self.state.current_html.clone();
        }
        match self.ask::<String>(Query::Html).await {
            Answer::Value(html) => html,
            Answer::Missing => String::new(),
            _ => self.state.current_html.clone(),
        }
    }

    /// Content as plain text.
    pub async fn text(&self) -> String {
        self.ask::<String>(Query::Text).await.or_else(String::new)
    }

    pub async fn has_range_selection(&self) -> bool {
        self.ask(Query::RangeSelectionExists).await.or(false)
    }

    pub async fn has_range_or_caret_selection(&self) -> bool {
        self.ask(Query::RangeOrCaretSelectionExists).await.or(false)
    }

    /// `href` of the link under the selection, if any.
    pub async fn selected_href(&self) -> Option<String> {
        self.ask::<String>(Query::SelectedHref)
            .await
            .filter(|href| !href.is_empty() && href != "null")
            .value()
    }

    /// The engine's content-editable flag; the requested flag if unavailable.
    pub async fn is_content_editable(&self) -> bool {
        self.ask(Query::ContentEditable)
            .await
            .or(self.state.editable_requested)
    }

    // === Engine → native ===

    /// Decide a navigation the engine is about to perform.
    ///
    /// Navigations to the callback scheme are cancelled and the pending event
    /// queue is drained before this returns.
    pub async fn handle_navigation(&mut self, request: &NavigationRequest) -> NavigationPolicy {
        if is_callback_url(&request.url, &self.config.callback_scheme) {
            self.flush_callbacks().await;
            return NavigationPolicy::Cancel;
        }

        match request.kind {
            NavigationKind::LinkActivated => {
                if !self.channel.is_live() {
                    return NavigationPolicy::Cancel;
                }
                let allow = self
                    .delegate
                    .as_mut()
                    .is_none_or(|d| d.should_follow_link(&request.url));
                tracing::debug!(target: "weaver::richedit", url = %request.url, allow, "link activated");
                if allow {
                    NavigationPolicy::Allow
                } else {
                    NavigationPolicy::Cancel
                }
            }
            NavigationKind::Other => NavigationPolicy::Allow,
        }
    }

    /// Fetch the engine's pending events and route each in order.
    pub async fn flush_callbacks(&mut self) {
        let raw = match self.channel.query_string(Query::TakeEventQueue).await {
            Ok(raw) => raw,
            Err(Cancelled) => return,
        };
        let events = decode_queue_lossy(&raw);
        tracing::trace!(target: "weaver::richedit::router", count = events.len(), "flushing callbacks");
        for event in events {
            if !self.channel.is_live() {
                return;
            }
            self.route(&event).await;
        }
    }

    /// Route one callback event. Unknown events are ignored.
    pub async fn route(&mut self, event: &str) {
        if !self.channel.is_live() {
            return;
        }
        let Some(parsed) = CallbackEvent::parse(event) else {
            tracing::trace!(target: "weaver::richedit::router", event, "ignoring unknown event");
            return;
        };
        tracing::trace!(target: "weaver::richedit::router", ?parsed, "routing");

        let result = match parsed {
            CallbackEvent::Ready => self.on_ready().await,
            CallbackEvent::Input => self.on_input().await,
            CallbackEvent::Focus => {
                self.notify(|d| d.focus_gained());
                Ok(())
            }
            CallbackEvent::Blur => {
                self.notify(|d| d.focus_lost());
                Ok(())
            }
            CallbackEvent::Action(name) => self.on_action(&name).await,
        };

        if let Err(Cancelled) = result {
            tracing::debug!(target: "weaver::richedit::router", event, "cancelled by teardown");
        }
    }

    /// Handle a structured message pushed by the engine.
    pub async fn handle_message(&mut self, name: &str, body: &serde_json::Value) {
        if !self.channel.is_live() {
            return;
        }
        if name != self.config.viewport_message {
            tracing::trace!(target: "weaver::richedit", name, "ignoring message");
            return;
        }
        match serde_json::from_value::<ViewportSample>(body.clone()) {
            Ok(sample) => self.handle_viewport_sample(sample).await,
            Err(source) => {
                let e = DecodeError::Message {
                    name: name.to_owned(),
                    source,
                };
                tracing::warn!(target: "weaver::richedit::rescale", "{}", e);
            }
        }
    }

    /// Rescale the document for a new layout size and report the height.
    pub async fn handle_viewport_sample(&mut self, sample: ViewportSample) {
        if !self.channel.is_live() {
            return;
        }
        if let Err(Cancelled) = self.rescale(sample).await {
            tracing::debug!(target: "weaver::richedit::rescale", "cancelled by teardown");
        }
    }

    // === Internals ===

    async fn on_ready(&mut self) -> Result<(), Cancelled> {
        if self.state.loaded {
            return Ok(());
        }
        self.state.loaded = true;
        tracing::debug!(target: "weaver::richedit::router", "engine ready, applying buffered settings");

        if let Some(request) = self.state.pending_focus.take() {
            self.channel.send(&focus_command(request)).await?;
        }
        self.channel
            .send(&Command::SetHtml(self.state.current_html.clone()))
            .await?;
        self.channel
            .send(&Command::SetContentEditable(self.state.editable_requested))
            .await?;
        self.channel
            .send(&Command::SetPlaceholder(self.state.placeholder.clone()))
            .await?;
        self.state.line_height_px = self.config.default_line_height_px;
        self.channel
            .send(&Command::SetLineHeight(self.state.line_height_px))
            .await?;
        if let Some(color) = self.state.background_color {
            self.channel
                .send(&Command::SetEditorBackgroundColor(color))
                .await?;
        }
        if let Some(color) = self.state.font_color {
            self.channel.send(&Command::SetEditorFontColor(color)).await?;
        }

        self.notify(|d| d.ready());
        Ok(())
    }

    async fn on_input(&mut self) -> Result<(), Cancelled> {
        keep_caret_visible(
            &self.channel,
            &mut self.host,
            self.state.loaded,
            self.config.default_line_height_px,
        )
        .await?;
        self.refresh_content().await
    }

    async fn on_action(&mut self, name: &str) -> Result<(), Cancelled> {
        self.refresh_content().await?;
        self.notify(|d| d.custom_action(name));
        Ok(())
    }

    /// Re-read the content and report it, changed or not.
    async fn refresh_content(&mut self) -> Result<(), Cancelled> {
        match self.channel.query::<String>(Query::Html).await? {
            Answer::Value(html) => self.state.current_html = html,
            Answer::Missing => self.state.current_html.clear(),
            _ => {}
        }
        let html = self.state.current_html.clone();
        self.notify(|d| d.content_changed(&html));
        Ok(())
    }

    async fn rescale(&mut self, sample: ViewportSample) -> Result<(), Cancelled> {
        let host_width = self.host.viewport_size().width;
        let Some(new_scale) = compute_scale(host_width, sample.width) else {
            tracing::debug!(
                target: "weaver::richedit::rescale",
                ?sample,
                "degenerate layout width, ignoring sample"
            );
            return Ok(());
        };

        if new_scale != self.state.content_scale {
            let document = self.channel.query_string(Query::DocumentHtml).await?;
            match rewrite_body(&document, new_scale) {
                Some(rewritten) => {
                    self.channel
                        .load_html(&rewritten, self.base_url.as_deref())?;
                    tracing::debug!(
                        target: "weaver::richedit::rescale",
                        from = self.state.content_scale,
                        to = new_scale,
                        "rescaled document"
                    );
                    self.state.content_scale = new_scale;
                }
                None => {
                    tracing::warn!(
                        target: "weaver::richedit::rescale",
                        "document has no body tag, scale left at {}",
                        self.state.content_scale
                    );
                }
            }
        }

        let scaled_height = sample.height * self.state.content_scale;
        if scaled_height != self.state.reported_height || self.state.reported_height == 0.0 {
            self.state.reported_height = scaled_height;
            self.notify(|d| d.height_changed(scaled_height));
        }
        Ok(())
    }

    /// Send a command, treating teardown as a no-op.
    async fn push(&self, command: &Command) {
        if self.channel.send(command).await.is_err() {
            tracing::debug!(
                target: "weaver::richedit",
                command = command.name(),
                "dropped after teardown"
            );
        }
    }

    /// Run a host query. Before load, or after teardown, nothing is evaluated.
    async fn ask<T: crate::answer::Decode>(&self, query: Query) -> Answer<T> {
        if !self.state.loaded {
            tracing::debug!(target: "weaver::richedit", ?query, "engine not ready");
            return Answer::Missing;
        }
        self.channel.query(query).await.unwrap_or(Answer::Missing)
    }

    fn notify(&mut self, f: impl FnOnce(&mut (dyn EditorDelegate + 'static))) {
        if let Some(delegate) = self.delegate.as_deref_mut() {
            f(delegate);
        }
    }
}

fn focus_command(request: FocusRequest) -> Command {
    match request {
        FocusRequest::Focus => Command::Focus,
        FocusRequest::At(point) => Command::FocusAt(point),
    }
}
