/// Placeholder label for a citation that has neither source nor id.
pub const UNKNOWN_SOURCE: &str = "unknown source";

/// Reference to a retrieved source fragment. Display data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub id: Option<String>,
    pub source: Option<String>,
}

impl Citation {
    /// Visible label: declared source, else the identifier.
    pub fn label(&self) -> &str {
        non_empty(self.source.as_deref())
            .or_else(|| non_empty(self.id.as_deref()))
            .unwrap_or(UNKNOWN_SOURCE)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

/// One message of the transcript. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    User {
        content: String,
    },
    Assistant {
        content: String,
        citations: Vec<Citation>,
        /// Error-as-text turn produced by a failed round trip.
        failed: bool,
    },
}

impl Turn {
    pub fn content(&self) -> &str {
        match self {
            Turn::User { content } | Turn::Assistant { content, .. } => content,
        }
    }

    pub fn citations(&self) -> &[Citation] {
        match self {
            Turn::User { .. } => &[],
            Turn::Assistant { citations, .. } => citations,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Turn::User { .. })
    }
}
