use clap::Parser;
use optimes_chat::utils::error::ErrorSeverity;
use optimes_chat::utils::{logger, validation::Validate};
use optimes_chat::{server, ChatEngine, ChatError, CliConfig, InMemoryAlertStore, MongoAlertStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting optimes-chat");

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ optimes-chat failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<(), ChatError> {
    let config = cli.resolve()?;
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config.routing);
    }

    if cli.demo {
        config.validate_offline()?;
        tracing::warn!("🧪 Demo mode: serving seeded in-memory alerts");
        let engine = ChatEngine::new(InMemoryAlertStore::with_sample_data(), &config);
        return server::serve(Arc::new(engine), config.bind_addr()?).await;
    }

    config.validate()?;
    let store = MongoAlertStore::connect(&config.mongo).await?;
    let engine = ChatEngine::new(store, &config);
    server::serve(Arc::new(engine), config.bind_addr()?).await
}
