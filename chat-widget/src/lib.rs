//! Chat client for the RAG proxy.
//!
//! [`ChatWidget`] holds the transcript and enforces that at most one question
//! is in flight. A [`ProxyTransport`] carries each question to the proxy, and
//! [`render`] turns turns into terminal bubbles. The `rag-chat` binary wires
//! these into a line-based event loop.

mod error;

pub mod command;
pub mod render;
pub mod transcript;
pub mod transport;
pub mod widget;
pub mod wire;

pub use error::WidgetError;
pub use transcript::{Citation, Turn};
pub use transport::{HttpProxyTransport, ProxyTransport};
pub use widget::ChatWidget;
pub use wire::{AssistantReply, ChatRequest, ChatResponse, Scope};
