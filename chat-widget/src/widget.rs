//! Transcript state machine.
//!
//! A round trip is split in two so callers that run the request elsewhere
//! (e.g. on a spawned task) still go through the same guard:
//! [`ChatWidget::begin_submit`] appends the user turn and hands out the
//! request, [`ChatWidget::finish_submit`] appends exactly one assistant turn
//! and clears `loading`. [`ChatWidget::submit`] chains both around a
//! [`ProxyTransport`].

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::{
    error::WidgetError,
    transcript::Turn,
    transport::ProxyTransport,
    wire::{AssistantReply, ChatRequest, Scope, TOP_K},
};

/// Submit control label while idle.
pub const ASK_LABEL: &str = "Ask";
/// Submit control label while a request is in flight.
pub const BUSY_LABEL: &str = "Thinking…";

#[derive(Debug, Default)]
pub struct ChatWidget {
    transcript: Vec<Turn>,
    draft: String,
    loading: bool,
    scope: Scope,
    /// Indices of assistant turns whose sources are expanded.
    expanded: BTreeSet<usize>,
}

impl ChatWidget {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading { BUSY_LABEL } else { ASK_LABEL }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Starts a round trip for the current draft.
    ///
    /// Returns `None` and changes nothing when the draft is blank or a request
    /// is already in flight. Otherwise the draft becomes a user turn, the
    /// draft is cleared, `loading` is set, and the request to send is returned.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if self.loading {
            debug!("submit ignored: request already in flight");
            return None;
        }
        if self.draft.trim().is_empty() {
            return None;
        }

        let question = std::mem::take(&mut self.draft);
        self.transcript.push(Turn::User {
            content: question.clone(),
        });
        self.loading = true;

        Some(ChatRequest {
            question,
            top_k: TOP_K,
            filters: self.scope.filters(),
        })
    }

    /// Completes the round trip started by [`begin_submit`](Self::begin_submit).
    ///
    /// Appends one assistant turn (the answer, or `Error: <message>` without
    /// citations) and clears `loading` on every path. Returns the index of
    /// the new turn, or `None` if no request was in flight.
    pub fn finish_submit(&mut self, outcome: Result<AssistantReply, WidgetError>) -> Option<usize> {
        if !self.loading {
            warn!("finish_submit called with no request in flight");
            return None;
        }

        let turn = match outcome {
            Ok(reply) => Turn::Assistant {
                content: reply.answer,
                citations: reply.citations,
                failed: false,
            },
            Err(err) => {
                debug!(error = %err, "chat round trip failed");
                Turn::Assistant {
                    content: format!("Error: {err}"),
                    citations: Vec::new(),
                    failed: true,
                }
            }
        };

        self.transcript.push(turn);
        self.loading = false;
        Some(self.transcript.len() - 1)
    }

    /// Full round trip through `transport`. No retry.
    ///
    /// Returns whether a request was dispatched.
    pub async fn submit(&mut self, transport: &dyn ProxyTransport) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let outcome = transport.send(&request).await;
        self.finish_submit(outcome);
        true
    }

    /// Flips the sources disclosure of an assistant turn with citations.
    ///
    /// Returns the new state (`true` = expanded), or `None` if `index` does
    /// not name such a turn.
    pub fn toggle_sources(&mut self, index: usize) -> Option<bool> {
        let has_sources = self
            .transcript
            .get(index)
            .is_some_and(|t| !t.citations().is_empty());
        if !has_sources {
            return None;
        }

        if self.expanded.remove(&index) {
            Some(false)
        } else {
            self.expanded.insert(index);
            Some(true)
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }
}
