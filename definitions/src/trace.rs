use serde::{Deserialize, Serialize};

/// One recorded level change on a named interrupt pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeEvent {
    pub pin: String,
    pub high: bool,
}

/// Parse a trace recorded as a JSON array of [EdgeEvent]s.
pub fn parse_trace(json: &str) -> Result<Vec<EdgeEvent>, serde_json::Error> {
    serde_json::from_str(json)
}
