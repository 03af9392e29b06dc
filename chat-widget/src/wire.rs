//! JSON shapes exchanged with the proxy.
//!
//! Responses are treated as loosely typed: every field is optional and
//! citation labels are pulled out defensively, never assumed present.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::WidgetError, transcript::Citation};

/// Fixed number of chunks requested per question.
pub const TOP_K: u32 = 6;

/// Scoping parameters supplied when the widget is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub dma: Option<String>,
    pub store_chain: Option<String>,
}

impl Scope {
    pub fn new(dma: Option<String>, store_chain: Option<String>) -> Self {
        Self { dma, store_chain }
    }

    /// Filters with empty values dropped.
    pub fn filters(&self) -> Filters {
        let keep = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        Filters {
            dma: keep(&self.dma),
            store_chain: keep(&self.store_chain),
        }
    }
}

/// `where` object of a [`ChatRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dma: Option<String>,
    #[serde(rename = "storeChain", skip_serializing_if = "Option::is_none")]
    pub store_chain: Option<String>,
}

/// Body posted to the proxy for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub question: String,
    pub top_k: u32,
    #[serde(rename = "where")]
    pub filters: Filters,
}

/// Proxy response as received; nothing is guaranteed.
#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub chunks: Option<Vec<ChunkRecord>>,
    /// Plain chunk ids, used when `chunks` is missing.
    #[serde(default)]
    pub sources: Option<Vec<Value>>,
}

/// One cited chunk: `{ id?, metadata?: { source? } }`.
#[derive(Debug, Default, Deserialize)]
pub struct ChunkRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl From<ChunkRecord> for Citation {
    fn from(c: ChunkRecord) -> Self {
        let source = c
            .metadata
            .as_ref()
            .and_then(|m| m.get("source"))
            .and_then(scalar_to_string);
        Citation {
            id: c.id.as_ref().and_then(scalar_to_string),
            source,
        }
    }
}

/// Answer plus citations, ready to become an assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub answer: String,
    pub citations: Vec<Citation>,
}

impl ChatResponse {
    /// Extracts the answer and citations.
    ///
    /// # Errors
    /// [`WidgetError::MissingAnswer`] when `answer` is absent or not a string.
    pub fn into_reply(self) -> Result<AssistantReply, WidgetError> {
        let answer = match self.answer {
            Some(Value::String(s)) => s,
            _ => return Err(WidgetError::MissingAnswer),
        };

        let citations = match (self.chunks, self.sources) {
            (Some(chunks), _) => chunks.into_iter().map(Citation::from).collect(),
            (None, Some(ids)) => ids
                .iter()
                .filter_map(scalar_to_string)
                .map(|id| Citation {
                    id: Some(id),
                    source: None,
                })
                .collect(),
            (None, None) => Vec::new(),
        };

        Ok(AssistantReply { answer, citations })
    }
}

/// Strings as-is, numbers stringified, everything else ignored.
fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
