use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar pulled out of an alert document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    ObjectId(String),
    /// Sub-documents and arrays. Only their presence matters; they never reach a reply.
    Nested,
}

impl FieldValue {
    pub fn is_nested(&self) -> bool {
        matches!(self, FieldValue::Nested)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("None"),
            FieldValue::Bool(true) => f.write_str("True"),
            FieldValue::Bool(false) => f.write_str("False"),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(x) => f.write_str(&format_float(*x)),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::DateTime(dt) => f.write_str(&format_naive(dt)),
            FieldValue::ObjectId(hex) => f.write_str(hex),
            FieldValue::Nested => f.write_str("{...}"),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => FieldValue::Text(s),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => FieldValue::Nested,
        }
    }
}

/// Shortest round-trip form; exponent notation below 1e-4 and from 1e16 up (`1e+16`, `1e-05`).
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let exp_form = format!("{:e}", x);
        return match exp_form.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().unwrap_or(0);
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exponent.abs())
            }
            None => exp_form,
        };
    }

    if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// `YYYY-MM-DD HH:MM:SS`, with microseconds only when they are non-zero.
pub fn format_naive(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() / 1_000 == 0 {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

pub fn format_utc(dt: &DateTime<Utc>) -> String {
    format!("{}+00:00", format_naive(&dt.naive_utc()))
}

/// Newest document of one collection, flattened into ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    pub collection: String,
    pub fields: Vec<(String, FieldValue)>,
    pub timestamp: DateTime<Utc>,
}

impl AlertRecord {
    pub fn new(collection: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            collection: collection.into(),
            fields: Vec::new(),
            timestamp,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Winner of the cross-collection comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestAlert {
    pub module: String,
    pub final_time: DateTime<Utc>,
    pub record: AlertRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Text(String),
    Lines(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: String,
}

impl Button {
    pub fn new(label: &str, action: &str) -> Self {
        Self {
            label: label.to_string(),
            action: action.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: Reply,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
}

impl ChatReply {
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(reply.into()),
            buttons: Vec::new(),
        }
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            reply: Reply::Lines(lines),
            buttons: Vec::new(),
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    /// The reply flattened to one string, lines joined by `\n`.
    pub fn as_text(&self) -> String {
        match &self.reply {
            Reply::Text(s) => s.clone(),
            Reply::Lines(lines) => lines.join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_field_value_display_matches_python_str() {
        assert_eq!(FieldValue::Bool(true).to_string(), "True");
        assert_eq!(FieldValue::Null.to_string(), "None");
        assert_eq!(FieldValue::Float(3.0).to_string(), "3.0");
        assert_eq!(FieldValue::Float(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Int(42).to_string(), "42");
    }

    #[test]
    fn test_float_exponent_and_special_values() {
        assert_eq!(FieldValue::Float(1e16).to_string(), "1e+16");
        assert_eq!(FieldValue::Float(0.00001).to_string(), "1e-05");
        assert_eq!(FieldValue::Float(-2.5e-7).to_string(), "-2.5e-07");
        assert_eq!(FieldValue::Float(1.5e300).to_string(), "1.5e+300");
        assert_eq!(FieldValue::Float(0.0001).to_string(), "0.0001");
        assert_eq!(FieldValue::Float(1e15).to_string(), "1000000000000000.0");
        assert_eq!(FieldValue::Float(0.0).to_string(), "0.0");
        assert_eq!(FieldValue::Float(f64::NAN).to_string(), "nan");
        assert_eq!(FieldValue::Float(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn test_datetime_formatting() {
        let whole = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap();
        assert_eq!(format_naive(&whole), "2025-03-14 09:26:53");

        let fractional = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_milli_opt(9, 26, 53, 589)
            .unwrap();
        assert_eq!(format_naive(&fractional), "2025-03-14 09:26:53.589000");
        assert_eq!(
            format_utc(&fractional.and_utc()),
            "2025-03-14 09:26:53.589000+00:00"
        );
    }

    #[test]
    fn test_reply_serialization_shapes() {
        let text = serde_json::to_value(ChatReply::text("hi")).unwrap();
        assert_eq!(text, serde_json::json!({"reply": "hi"}));

        let lines = ChatReply::lines(vec!["a".into(), "b".into()])
            .with_buttons(vec![Button::new("Help", "help")]);
        assert_eq!(
            serde_json::to_value(lines).unwrap(),
            serde_json::json!({"reply": ["a", "b"], "buttons": [{"label": "Help", "action": "help"}]})
        );
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.message, "");
    }
}
