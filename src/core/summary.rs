use crate::config::FormattingConfig;
use crate::domain::model::{format_utc, FieldValue, LatestAlert};
use std::collections::{HashMap, HashSet};

/// Renders the winning alert as emoji-decorated `Key: **value**` lines.
#[derive(Debug, Clone)]
pub struct SummaryFormatter {
    default_emoji: String,
    emoji: HashMap<String, String>,
    excluded: HashSet<String>,
}

impl SummaryFormatter {
    pub fn new(config: &FormattingConfig) -> Self {
        Self {
            default_emoji: config.default_emoji.clone(),
            emoji: config
                .emoji
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.clone()))
                .collect(),
            // 只把 key 轉小寫，設定值原樣比對；所以 createdAt 這類大小寫混合的項目不會命中
            excluded: config.excluded_fields.iter().cloned().collect(),
        }
    }

    fn skip(&self, key: &str, value: &FieldValue) -> bool {
        key.starts_with('_') || value.is_nested() || self.excluded.contains(&key.to_lowercase())
    }

    fn line(&self, key: &str, value: &str) -> String {
        let emoji = self
            .emoji
            .get(&key.to_lowercase())
            .unwrap_or(&self.default_emoji);
        format!("{} {}: **{}**", emoji, title_case(&key.replace('_', " ")), value)
    }

    pub fn lines(&self, alert: &LatestAlert) -> Vec<String> {
        let mut lines = vec![format!("📢 Last Alert Summary from **{}**:", alert.module)];

        let final_time = format_utc(&alert.final_time);
        let mut module_seen = false;
        let mut final_time_seen = false;

        // A stored module/final_time keeps its position but shows the computed value.
        for (key, value) in &alert.record.fields {
            if key == "module" {
                module_seen = true;
                lines.push(self.line(key, &alert.module));
            } else if key == "final_time" {
                final_time_seen = true;
                lines.push(self.line(key, &final_time));
            } else if !self.skip(key, value) {
                lines.push(self.line(key, &value.to_string()));
            }
        }

        if !module_seen {
            lines.push(self.line("module", &alert.module));
        }
        if !final_time_seen {
            lines.push(self.line("final_time", &final_time));
        }
        lines
    }
}

/// Uppercases a letter that follows a non-letter and lowercases the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}
