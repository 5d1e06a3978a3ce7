use serde::{Deserialize, Serialize};

/// Failure body returned by the registry API on non-success statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Server-supplied reason, ignoring blank strings.
    pub fn reason(&self) -> Option<&str> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
    }

    /// Parses a raw response body, treating anything that is not a JSON
    /// object with an `error` string as carrying no reason.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}
