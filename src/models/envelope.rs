//! Response envelopes used by the REST backend.

use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper around every backend payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Pagination block attached to paginated list bodies.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRecord {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// List body: either paginated or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Paged {
        data: Vec<T>,
        pagination: PaginationRecord,
    },
    Plain(Vec<T>),
}

pub type ListEnvelope<T> = Envelope<ListBody<T>>;

/// Single-record body, returned wrapped by most endpoints and bare by a few.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordBody<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> RecordBody<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Error payload; the backend puts the human message in `error` or `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Best human-readable message contained in the body.
    pub fn message(&self) -> Option<String> {
        let from_message = match &self.message {
            Some(serde_json::Value::String(text)) => Some(text.clone()),
            Some(serde_json::Value::Array(items)) => {
                let parts = items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .collect::<Vec<_>>();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            _ => None,
        };
        from_message.or_else(|| self.error.clone())
    }
}
