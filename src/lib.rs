pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{InMemoryAlertStore, MongoAlertStore};
pub use config::ChatbotConfig;
pub use crate::core::engine::ChatEngine;
pub use domain::model::{Button, ChatReply, ChatRequest, Reply};
pub use utils::error::{ChatError, Result};
