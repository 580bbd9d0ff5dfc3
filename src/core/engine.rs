use crate::config::ChatbotConfig;
use crate::core::intent::IntentMatcher;
use crate::core::latest::latest_across;
use crate::core::router::CollectionRouter;
use crate::core::summary::SummaryFormatter;
use crate::domain::model::ChatReply;
use crate::domain::ports::AlertStore;
use crate::utils::error::Result;

pub const NO_DATA_REPLY: &str = "⚠️ No recent data found in the system.";

pub struct ChatEngine<S: AlertStore> {
    store: S,
    intents: IntentMatcher,
    router: CollectionRouter,
    formatter: SummaryFormatter,
    multi_line_reply: bool,
}

impl<S: AlertStore> ChatEngine<S> {
    pub fn new(store: S, config: &ChatbotConfig) -> Self {
        Self {
            store,
            intents: IntentMatcher::new(),
            router: CollectionRouter::from_config(config),
            formatter: SummaryFormatter::new(&config.formatting),
            multi_line_reply: config.formatting.multi_line_reply,
        }
    }

    pub async fn respond(&self, message: &str) -> Result<ChatReply> {
        let message = message.to_lowercase();

        if let Some(intent) = self.intents.classify(&message) {
            tracing::debug!("Matched small-talk intent {:?}", intent);
            return Ok(intent.reply());
        }

        let collections = self.router.route(&message);
        tracing::debug!("Routing to collections: {:?}", collections);

        let Some(alert) = latest_across(&self.store, collections).await? else {
            tracing::info!("📭 No alerts found in {:?}", collections);
            return Ok(ChatReply::text(NO_DATA_REPLY));
        };

        tracing::info!(
            "📢 Latest alert from {} at {}",
            alert.module,
            alert.final_time
        );

        let lines = self.formatter.lines(&alert);
        if self.multi_line_reply {
            Ok(ChatReply::lines(lines))
        } else {
            Ok(ChatReply::text(lines.join("\n")))
        }
    }
}
