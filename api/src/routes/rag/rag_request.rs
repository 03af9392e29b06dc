use rag_gateway::RagChatRequest;
use serde_json::Value;

use crate::error_handler::AppError;

/// Request payload for `POST /api/rag`.
///
/// The proxy does not judge the question or type-check any field: each value
/// is taken as raw JSON and forwarded unchanged.
#[derive(Debug, Default, PartialEq)]
pub struct ProxyChatRequest {
    /// Natural language question, forwarded as-is (even when empty).
    pub question: Option<Value>,
    /// Optional override of how many chunks the RAG service should use.
    pub top_k: Option<Value>,
    /// Scoping filters such as `dma` or `storeChain`.
    pub filters: Option<Value>,
}

impl ProxyChatRequest {
    /// Parses a raw request body.
    ///
    /// Only a body that is not JSON at all is rejected. An empty body, `null`
    /// or any non-object JSON value carries no fields and counts as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;

        let Value::Object(mut fields) = value else {
            return Ok(Self::default());
        };

        Ok(Self {
            question: fields.remove("question"),
            top_k: fields.remove("top_k"),
            filters: fields.remove("where"),
        })
    }

    /// Re-shapes into the body sent to the RAG service.
    pub fn into_upstream(self) -> RagChatRequest {
        RagChatRequest::new(self.question, self.top_k, self.filters)
    }
}
