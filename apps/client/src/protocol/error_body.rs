use serde::Deserialize;
use serde_json::Value;

/// Body of a non-2xx response. Only a string `detail` is meaningful.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Parse an error body, tolerating empty or non-JSON payloads.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn into_detail(self) -> Option<String> {
        match self.detail {
            Some(Value::String(detail)) => Some(detail),
            _ => None,
        }
    }
}
