//! Store validation error payloads

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key the store uses for errors not tied to a single field
const NON_FIELD_KEY: &str = "__all__";

/// Validation messages grouped by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMessages {
    /// Messages that apply to the whole object
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_field: Vec<String>,
    /// Messages per field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ValidationMessages {
    /// Parse a raw validation payload.
    ///
    /// Accepts a JSON object of field → message(s), a JSON array or string of
    /// messages, or plain text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut parsed = Self::default();
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => {
                for (field, value) in map {
                    let messages = messages_of(value);
                    if field == NON_FIELD_KEY {
                        parsed.non_field.extend(messages);
                    } else {
                        parsed.fields.entry(field).or_default().extend(messages);
                    }
                }
            }
            Ok(value @ (Value::Array(_) | Value::String(_))) => {
                parsed.non_field = messages_of(value);
            }
            _ => {
                let text = raw.trim();
                if !text.is_empty() {
                    parsed.non_field.push(text.to_string());
                }
            }
        }
        parsed
    }

    /// Single non-field message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            non_field: vec![message.into()],
            fields: BTreeMap::new(),
        }
    }

    /// Single field message
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), vec![message.into()]);
        Self {
            non_field: Vec::new(),
            fields,
        }
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.non_field.is_empty() && self.fields.values().all(Vec::is_empty)
    }

    /// One line per message; field messages are prefixed with the field name.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        let mut lines: Vec<String> = self.non_field.clone();
        for (field, messages) in &self.fields {
            lines.extend(messages.iter().map(|m| format!("{field}: {m}")));
        }
        lines.join("\n")
    }
}

impl fmt::Display for ValidationMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

fn messages_of(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().flat_map(messages_of).collect(),
        Value::String(s) => vec![s],
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}
