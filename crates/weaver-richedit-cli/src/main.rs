use miette::{IntoDiagnostic, Result};
use serde::Deserialize;
use std::path::PathBuf;
use weaver_richedit_core::scripted::{Notification, RecordingDelegate, RecordingHost, ScriptedEngine};
use weaver_richedit_core::{
    EditorConfig, EvalValue, NavigationKind, NavigationRequest, Query, RichEditor, Size,
};

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Replay a recorded editor engine trace through the native bridge", long_about = None)]
struct Cli {
    /// Path to the JSON trace
    trace: PathBuf,

    /// Editor config file (.toml or .json)
    #[arg(long, env = "RICHEDIT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing the bootstrap document, overriding the config
    #[arg(long)]
    resources: Option<PathBuf>,

    /// Answer every link-activation query with "cancel"
    #[arg(long)]
    deny_links: bool,
}

/// A recorded session: the host viewport plus the engine-side steps, in order.
#[derive(Debug, Deserialize)]
struct Trace {
    #[serde(default = "default_viewport")]
    viewport: Viewport,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Viewport {
    width: f64,
    height: f64,
}

fn default_viewport() -> Viewport {
    Viewport {
        width: 375.0,
        height: 667.0,
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
enum Step {
    /// Queue an answer for a script.
    Respond {
        script: String,
        value: serde_json::Value,
    },
    /// The engine queued `events` and signalled the callback scheme.
    Events { events: Vec<String> },
    /// The engine posted a structured message.
    Message {
        name: String,
        body: serde_json::Value,
    },
    /// The engine is about to navigate.
    Navigate {
        url: String,
        #[serde(default)]
        link: bool,
    },
    /// The host set the content.
    SetHtml { html: String },
    /// The host scrolled.
    Scroll { y: f64 },
    Teardown,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_miette();
    init_tracing();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    if let Some(resources) = cli.resources {
        config.resource_dir = resources;
    }

    let raw = std::fs::read_to_string(&cli.trace).into_diagnostic()?;
    let trace: Trace = serde_json::from_str(&raw).into_diagnostic()?;
    tracing::info!(trace = %cli.trace.display(), steps = trace.steps.len(), "replaying");

    for line in replay(trace, config, cli.deny_links).await? {
        println!("{line}");
    }
    Ok(())
}

/// Run every step of `trace` and describe what the bridge did, one line per effect.
async fn replay(trace: Trace, config: EditorConfig, deny_links: bool) -> Result<Vec<String>> {
    let engine = ScriptedEngine::new();
    let host = RecordingHost::new(Size::new(trace.viewport.width, trace.viewport.height));
    let delegate = if deny_links {
        RecordingDelegate::denying_links()
    } else {
        RecordingDelegate::new()
    };

    let mut editor = RichEditor::new(engine.clone(), host.clone(), config)?;
    editor.set_delegate(delegate.clone());
    let callback_url = editor.config().callback_scheme.clone();

    let mut out = Vec::new();
    for (index, step) in trace.steps.into_iter().enumerate() {
        let scrolls_before = host.scrolls().len();
        tracing::debug!(index, ?step, "step");

        match step {
            Step::Respond { script, value } => {
                engine.respond(script, EvalValue::from_json(&value));
            }
            Step::Events { events } => {
                let queue = serde_json::to_string(&events).into_diagnostic()?;
                engine.reset(Query::TakeEventQueue.script());
                engine.respond(Query::TakeEventQueue.script(), queue);
                let request = NavigationRequest::new(callback_url.as_str(), NavigationKind::Other);
                editor.handle_navigation(&request).await;
            }
            Step::Message { name, body } => {
                editor.handle_message(&name, &body).await;
            }
            Step::Navigate { url, link } => {
                let kind = if link {
                    NavigationKind::LinkActivated
                } else {
                    NavigationKind::Other
                };
                let policy = editor
                    .handle_navigation(&NavigationRequest::new(url.as_str(), kind))
                    .await;
                out.push(format!("[{index}] navigate {url}: {policy:?}"));
            }
            Step::SetHtml { html } => editor.set_html(html).await,
            Step::Scroll { y } => host.set_scroll_y(y),
            Step::Teardown => editor.teardown(),
        }

        for notification in delegate.take() {
            out.push(format!("[{index}] {}", describe(&notification)));
        }
        for y in &host.scrolls()[scrolls_before..] {
            out.push(format!("[{index}] scroll to {y}"));
        }
    }
    Ok(out)
}

fn describe(notification: &Notification) -> String {
    match notification {
        Notification::HeightChanged(h) => format!("height changed: {h}"),
        Notification::ContentChanged(html) => format!("content changed: {html}"),
        Notification::FocusGained => "focus gained".to_owned(),
        Notification::FocusLost => "focus lost".to_owned(),
        Notification::Ready => "ready".to_owned(),
        Notification::CustomAction(name) => format!("custom action: {name}"),
        Notification::LinkQuery(url) => format!("should follow link? {url}"),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_bootstrap() -> (tempfile::TempDir, EditorConfig) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rich_editor.html"),
            "<html><body><div id=\"editor\"></div></body></html>",
        )
        .unwrap();
        let config = EditorConfig {
            resource_dir: dir.path().to_path_buf(),
            ..EditorConfig::default()
        };
        (dir, config)
    }

    #[tokio::test]
    async fn test_replay_session() {
        let trace: Trace = serde_json::from_str(
            r#"{
                "viewport": {"width": 320, "height": 100},
                "steps": [
                    {"step": "events", "events": ["ready"]},
                    {"step": "respond", "script": "RE.getHtml()", "value": "<p>hi</p>"},
                    {"step": "respond", "script": "RE.getRelativeCaretYPosition()", "value": 95},
                    {"step": "events", "events": ["focus", "input"]},
                    {"step": "navigate", "url": "https://weaver.sh", "link": true}
                ]
            }"#,
        )
        .unwrap();
        let (_dir, config) = config_with_bootstrap();

        let lines = replay(trace, config, true).await.unwrap();

        assert_eq!(
            lines,
            vec![
                "[0] ready",
                "[3] focus gained",
                "[3] content changed: <p>hi</p>",
                "[3] scroll to 16",
                "[4] navigate https://weaver.sh: Cancel",
                "[4] should follow link? https://weaver.sh",
            ]
        );
    }

    #[tokio::test]
    async fn test_replay_without_bootstrap_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig {
            resource_dir: dir.path().to_path_buf(),
            ..EditorConfig::default()
        };
        let trace = Trace {
            viewport: default_viewport(),
            steps: vec![],
        };
        assert!(replay(trace, config, false).await.is_err());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
