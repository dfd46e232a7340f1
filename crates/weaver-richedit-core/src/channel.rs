//! Command channel: native → engine script evaluation.
//!
//! Every request goes through [`CommandChannel`]. Transport failures are
//! logged and folded into the answer; they never escape as errors. The only
//! error a caller sees is [`Cancelled`], after the channel was torn down.

use std::cell::Cell;
use std::rc::Rc;

use crate::answer::{Answer, Decode};
use crate::command::{Command, Query};
use crate::engine::Engine;
use crate::error::Cancelled;

/// Shared teardown flag.
///
/// Clones observe the same flag, so the host can tear the channel down while
/// a bridge operation is suspended on a query.
#[derive(Debug, Clone, Default)]
pub struct Teardown(Rc<Cell<bool>>);

impl Teardown {
    pub fn trigger(&self) {
        self.0.set(true);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.get()
    }
}

/// Request/response path to the engine.
pub struct CommandChannel<E> {
    engine: E,
    teardown: Teardown,
}

impl<E: Engine> CommandChannel<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            teardown: Teardown::default(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn teardown_handle(&self) -> Teardown {
        self.teardown.clone()
    }

    pub fn is_live(&self) -> bool {
        !self.teardown.is_triggered()
    }

    /// Send a one-way command. The result, if any, is discarded.
    pub async fn send(&self, command: &Command) -> Result<(), Cancelled> {
        self.check_live()?;
        let script = command.script();
        tracing::trace!(target: "weaver::richedit::channel", command = command.name(), "send");
        if let Err(e) = self.engine.evaluate(&script).await {
            tracing::warn!(
                target: "weaver::richedit::channel",
                command = command.name(),
                "command failed: {}",
                e
            );
        }
        self.check_live()
    }

    /// Run a query and decode its coerced result.
    pub async fn query<T: Decode>(&self, query: Query) -> Result<Answer<T>, Cancelled> {
        self.check_live()?;
        let result = self.engine.evaluate(query.script()).await;
        self.check_live()?;
        Ok(match result {
            Ok(value) => T::decode(value.coerce()),
            Err(e) => {
                tracing::warn!(
                    target: "weaver::richedit::channel",
                    query = ?query,
                    "query failed: {}",
                    e
                );
                Answer::Transport(e)
            }
        })
    }

    /// Run a query and return the coerced string, empty on any failure.
    pub async fn query_string(&self, query: Query) -> Result<String, Cancelled> {
        Ok(self.query::<String>(query).await?.or_else(String::new))
    }

    pub(crate) fn load_html(&self, html: &str, base_url: Option<&str>) -> Result<(), Cancelled> {
        self.check_live()?;
        self.engine.load_html(html, base_url);
        Ok(())
    }

    fn check_live(&self) -> Result<(), Cancelled> {
        if self.teardown.is_triggered() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedEngine;
    use crate::value::EvalValue;

    #[tokio::test]
    async fn test_transport_error_becomes_empty_string() {
        let engine = ScriptedEngine::new();
        engine.fail(Query::Html.script(), "engine gone");
        let channel = CommandChannel::new(engine);

        let answer = channel.query::<String>(Query::Html).await.unwrap();
        assert!(matches!(answer, Answer::Transport(_)));
        assert_eq!(channel.query_string(Query::Html).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_query_decodes_coerced_value() {
        let engine = ScriptedEngine::new();
        engine.respond(Query::LineHeight.script(), EvalValue::Int(24));
        engine.respond(Query::ContentEditable.script(), EvalValue::Bool(true));
        let channel = CommandChannel::new(engine);

        assert_eq!(channel.query::<i64>(Query::LineHeight).await.unwrap(), Answer::Value(24));
        assert_eq!(
            channel.query::<bool>(Query::ContentEditable).await.unwrap(),
            Answer::Value(true)
        );
        // Unscripted queries resolve with no result.
        assert_eq!(channel.query::<i64>(Query::CaretY).await.unwrap(), Answer::Missing);
    }

    #[tokio::test]
    async fn test_teardown_cancels_without_evaluating() {
        let channel = CommandChannel::new(ScriptedEngine::new());
        channel.teardown_handle().trigger();

        assert_eq!(channel.send(&Command::Bold).await, Err(Cancelled));
        assert_eq!(channel.query::<String>(Query::Html).await, Err(Cancelled));
        assert!(channel.engine().evaluated().is_empty());
    }
}
