use crate::utils::error::{ChatError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatbotConfig {
    pub server: ServerConfig,
    pub mongo: MongoConfig,
    pub routing: RoutingConfig,
    pub formatting: FormattingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5001".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub server_selection_timeout_secs: Option<u64>,
    pub app_name: Option<String>,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            database: "optimus".to_string(),
            server_selection_timeout_secs: None,
            app_name: Some("optimes-chat".to_string()),
        }
    }
}

impl MongoConfig {
    pub fn server_selection_timeout(&self) -> Option<Duration> {
        self.server_selection_timeout_secs.map(Duration::from_secs)
    }
}

/// A named group of collections; the union of all scenarios is the fallback query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub collections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub keywords: Vec<String>,
    pub collections: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub scenarios: Vec<Scenario>,
    pub routes: Vec<RouteConfig>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn route(keywords: &[&str], collections: &[&str]) -> RouteConfig {
    RouteConfig {
        keywords: strings(keywords),
        collections: strings(collections),
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            scenarios: vec![
                Scenario {
                    name: "hazard warnings".to_string(),
                    collections: strings(&["fires", "gasleakages", "missingfiredatas"]),
                },
                Scenario {
                    name: "worker health & safety".to_string(),
                    collections: strings(&["slips", "ppekits"]),
                },
                Scenario {
                    name: "compliance policies".to_string(),
                    collections: strings(&["occupancies", "unauthorizedentries"]),
                },
            ],
            // 順序即優先順序，第一個命中的規則生效
            routes: vec![
                route(&["fire", "smoke", "fire extinguisher"], &["fires"]),
                route(&["gas"], &["gasleakages"]),
                route(&["slip"], &["slips"]),
                route(&["ppe"], &["ppekits"]),
                route(&["health", "safety"], &["slips", "ppekits"]),
                route(
                    &["compliance exceedance", "occupancy", "vacancy"],
                    &["occupancies"],
                ),
                route(&["unauthorized", "entry"], &["unauthorizedentries"]),
                route(
                    &["compliance", "policies"],
                    &["occupancies", "unauthorizedentries"],
                ),
                route(&["hazard"], &["fires", "gasleakages", "missingfiredatas"]),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingConfig {
    pub default_emoji: String,
    pub emoji: HashMap<String, String>,
    pub excluded_fields: Vec<String>,
    /// Return the summary as a JSON array of lines instead of one string.
    pub multi_line_reply: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        let emoji = [
            ("priority", "⚠️"),
            ("person_count_status", "👥"),
            ("vacancy_status", "💺"),
            ("vacant_count_duration", "⏳"),
            ("person_count_duration", "⏱️"),
            ("exceeds_compliance_policy", "🚫"),
            ("fire_detected", "🔥"),
            ("smoke_detected", "💨"),
            ("timestamp_alert_start", "🕒"),
            ("timestamp_alert_end", "🕓"),
            ("ppe_compliance", "✅"),
            ("helmet_status", "🪖"),
            ("vest_status", "🦺"),
            ("occupancy_status", "👤"),
            ("unauthorized_person_detected", "🚷"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            default_emoji: "🔹".to_string(),
            emoji,
            excluded_fields: strings(&[
                "image",
                "createdAt",
                "updatedAt",
                "compliance frame",
                "vacant frame",
                "compliance_frame",
                "vacant_frame",
            ]),
            multi_line_reply: false,
        }
    }
}

impl ChatbotConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ChatError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ChatError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MONGO_URI})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ChatError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.bind", &self.server.bind)
    }

    /// 所有情境的集合，依宣告順序去除重複
    pub fn all_collections(&self) -> Vec<String> {
        let mut all: Vec<String> = Vec::new();
        for scenario in &self.routing.scenarios {
            for collection in &scenario.collections {
                if !all.contains(collection) {
                    all.push(collection.clone());
                }
            }
        }
        all
    }

    /// Checks everything except the MongoDB URI, which demo mode does not need.
    pub fn validate_offline(&self) -> Result<()> {
        self.bind_addr()?;
        validation::validate_non_empty_string("mongo.database", &self.mongo.database)?;
        validation::validate_non_empty_list("routing.scenarios", &self.routing.scenarios)?;

        for (i, scenario) in self.routing.scenarios.iter().enumerate() {
            validation::validate_non_empty_list(
                &format!("routing.scenarios[{}].collections", i),
                &scenario.collections,
            )?;
        }

        for (i, route) in self.routing.routes.iter().enumerate() {
            validation::validate_non_empty_list(
                &format!("routing.routes[{}].keywords", i),
                &route.keywords,
            )?;
            validation::validate_non_empty_list(
                &format!("routing.routes[{}].collections", i),
                &route.collections,
            )?;
            for keyword in &route.keywords {
                validation::validate_non_empty_string(
                    &format!("routing.routes[{}].keywords", i),
                    keyword,
                )?;
            }
        }

        Ok(())
    }
}

impl Validate for ChatbotConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_mongo_uri("mongo.uri", &self.mongo.uri)?;
        self.validate_offline()
    }
}
