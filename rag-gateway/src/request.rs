use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `top_k` used when the caller does not provide one.
pub const DEFAULT_TOP_K: u32 = 6;

/// Body posted to `<base_url>/chat`.
///
/// Field values are opaque JSON: whatever the caller sent for `question`,
/// `top_k` and `where` reaches the upstream untouched, including values of an
/// unexpected type. Absent `question` and `where` are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<Value>,

    pub top_k: Value,

    /// Scoping filters, e.g. `{ "dma": "Boston" }`.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
}

impl RagChatRequest {
    /// Builds the outbound request, substituting [`DEFAULT_TOP_K`] only when
    /// `top_k` is absent. An explicit `null` is present and kept.
    pub fn new(question: Option<Value>, top_k: Option<Value>, filters: Option<Value>) -> Self {
        Self {
            question,
            top_k: top_k.unwrap_or_else(|| Value::from(DEFAULT_TOP_K)),
            filters,
        }
    }
}
