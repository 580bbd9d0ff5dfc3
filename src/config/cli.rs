use crate::config::toml_config::ChatbotConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "optimes-chat")]
#[command(about = "Rule-based alert chatbot for the OptiMES plant monitoring database")]
pub struct CliConfig {
    #[arg(long, short, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to listen on, e.g. 0.0.0.0:5001")]
    pub bind: Option<String>,

    #[arg(long, env = "MONGO_URI", hide_env_values = true)]
    pub mongo_uri: Option<String>,

    #[arg(long, help = "MongoDB database name")]
    pub database: Option<String>,

    #[arg(long, help = "Serve seeded in-memory alerts instead of MongoDB")]
    pub demo: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the config file (or defaults) and applies command line overrides on top.
    pub fn resolve(&self) -> Result<ChatbotConfig> {
        let mut config = match &self.config {
            Some(path) => ChatbotConfig::from_file(path)?,
            None => ChatbotConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(uri) = &self.mongo_uri {
            config.mongo.uri = uri.clone();
        }
        if let Some(database) = &self.database {
            config.mongo.database = database.clone();
        }

        Ok(config)
    }
}
