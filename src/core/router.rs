use crate::config::{ChatbotConfig, RouteConfig};

/// Maps a lowercased message to the collections whose latest alert answers it.
#[derive(Debug, Clone)]
pub struct CollectionRouter {
    routes: Vec<RouteConfig>,
    fallback: Vec<String>,
}

impl CollectionRouter {
    pub fn new(routes: Vec<RouteConfig>, fallback: Vec<String>) -> Self {
        let routes = routes
            .into_iter()
            .map(|r| RouteConfig {
                keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
                collections: r.collections,
            })
            .collect();
        Self { routes, fallback }
    }

    pub fn from_config(config: &ChatbotConfig) -> Self {
        Self::new(config.routing.routes.clone(), config.all_collections())
    }

    /// First route with a keyword contained in `message` wins; otherwise every scenario collection.
    pub fn route(&self, message: &str) -> &[String] {
        self.routes
            .iter()
            .find(|r| r.keywords.iter().any(|k| message.contains(k.as_str())))
            .map(|r| r.collections.as_slice())
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &[String] {
        &self.fallback
    }
}
