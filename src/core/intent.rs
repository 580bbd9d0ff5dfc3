use crate::domain::model::{Button, ChatReply};
use regex::Regex;

pub const GREETING_REPLY: &str = "👋 Hello! Welcome to OptiMES. How can I assist you today?";
pub const THANKS_REPLY: &str =
    "😊 You're welcome! If you have any more questions, feel free to ask.";
pub const HELP_REPLY: &str = "🆘 You can ask about latest alerts, full data reports, or module info like:\n• Show last alert of hazard\n• Show full data\n• What module triggered it?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Thanks,
    Help,
}

impl Intent {
    pub fn reply(self) -> ChatReply {
        match self {
            Intent::Greeting => ChatReply::text(GREETING_REPLY),
            Intent::Thanks => ChatReply::text(THANKS_REPLY),
            Intent::Help => ChatReply::text(HELP_REPLY).with_buttons(vec![
                Button::new("Last hazard alert", "Show last alert of hazard"),
                Button::new("Full data", "Show full data"),
                Button::new("Triggering module", "What module triggered it?"),
            ]),
        }
    }
}

/// Small-talk detector.
///
/// Greetings match whole words so "which" or "this" is not a greeting; the thanks and
/// help stems only need a leading word boundary, so "assistance" and "helping" still count.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    rules: Vec<(Intent, Regex)>,
}

impl IntentMatcher {
    pub fn new() -> Self {
        let rules = [
            (Intent::Greeting, &["hi", "hello", "hey"][..], true),
            (Intent::Thanks, &["thank you", "thanks"][..], false),
            (Intent::Help, &["help", "assist", "support"][..], false),
        ]
        .into_iter()
        .map(|(intent, words, whole_word)| (intent, word_pattern(words, whole_word)))
        .collect();

        Self { rules }
    }

    /// `message` is expected lowercased.
    pub fn classify(&self, message: &str) -> Option<Intent> {
        self.rules
            .iter()
            .find(|(_, re)| re.is_match(message))
            .map(|(intent, _)| *intent)
    }
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn word_pattern(words: &[&str], whole_word: bool) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    // Escaped literals joined by `|` always form a valid pattern.
    let trailing = if whole_word { r"\b" } else { "" };
    Regex::new(&format!(r"\b(?:{}){}", alternation, trailing)).expect("intent keyword pattern")
}
