use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomNumberResponse {
    pub number: f64,
}

/// Error body returned by the backend on a failed request.
///
/// The service answers with `{"error": ...}` for application errors and
/// `{"errors": [{"<field>": "<message>"}, ...]}` for rejected input; some
/// deployments use `{"message": ...}` instead. Each field is read on its own:
/// a malformed or unexpected value in one never hides the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_field_errors")]
    pub errors: Vec<(String, String)>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_field_errors<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    let mut field_errors = Vec::new();
    for entry in entries {
        let Value::Object(fields) = entry else {
            continue;
        };
        for (field, message) in fields {
            let message = match message {
                Value::Null => continue,
                Value::String(text) => text,
                other => other.to_string(),
            };
            field_errors.push((field, message));
        }
    }
    Ok(field_errors)
}

impl ApiErrorResponse {
    /// Parses a raw error body. Bodies that are not a JSON object yield `None`.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Picks the most specific human-readable message the body carries.
    pub fn into_message(self) -> Option<String> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return Some(error);
        }
        if let Some(message) = self.message.filter(|m| !m.is_empty()) {
            return Some(message);
        }

        let field_errors: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        if field_errors.is_empty() {
            None
        } else {
            Some(field_errors.join("; "))
        }
    }
}
