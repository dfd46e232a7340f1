//! Native/web bridge for the weaver rich-text editor control.
//!
//! A host view embeds a web engine running the in-page editing engine. This
//! crate carries everything between the two, generic over the engine binding
//! and the host view.
//!
//! # Architecture
//!
//! - `channel`: native → engine script evaluation with typed answers
//! - `callback`: decoding the engine's queued event strings
//! - `bridge`: `RichEditor`, routing events and buffering settings until load
//! - `rescale`: fitting the document into the host width via a CSS transform
//! - `caret`: keeping the caret inside the visible viewport
//!
//! # Collaborators
//!
//! Implement [`Engine`] for the platform's webview binding and [`HostView`]
//! for the scroll view containing it. [`scripted`] has in-process doubles.

pub mod answer;
pub mod bootstrap;
pub mod bridge;
pub mod callback;
pub mod caret;
pub mod channel;
pub mod color;
pub mod command;
pub mod config;
pub mod delegate;
pub mod engine;
pub mod error;
pub mod rescale;
pub mod scripted;
pub mod state;
pub mod value;

pub use answer::{Answer, Decode};
pub use bootstrap::Bootstrap;
pub use bridge::RichEditor;
pub use callback::{CallbackEvent, decode_queue, is_callback_url};
pub use caret::{CaretGeometry, keep_caret_visible};
pub use channel::{CommandChannel, Teardown};
pub use color::Rgba;
pub use command::{Alignment, Command, Point, Query};
pub use config::{EditorConfig, InputConfig, KeyboardAppearance};
pub use delegate::EditorDelegate;
pub use engine::{Engine, HostView, NavigationKind, NavigationPolicy, NavigationRequest, Size};
pub use error::{BridgeError, Cancelled, DecodeError, EngineError};
pub use rescale::{ViewportSample, rewrite_body};
pub use smol_str::SmolStr;
pub use state::{EditorState, FocusRequest};
pub use value::EvalValue;
