use crate::utils::error::{ChatError, Result};
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_mongo_uri(field_name: &str, uri: &str) -> Result<()> {
    if uri.is_empty() {
        return Err(ChatError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    // 未替換的 ${VAR} 代表環境變數沒有設定
    if uri.contains("${") {
        return Err(ChatError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: "Unresolved environment variable placeholder".to_string(),
        });
    }

    // 多主機 URI (h1:27017,h2:27017) 不是合法的 URL，只檢查 scheme
    match uri.split_once("://") {
        Some(("mongodb" | "mongodb+srv", rest)) if !rest.is_empty() => Ok(()),
        Some((scheme, _)) if scheme != "mongodb" && scheme != "mongodb+srv" => {
            Err(ChatError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: redact_credentials(uri),
                reason: format!("Unsupported URI scheme: {}", scheme),
            })
        }
        _ => Err(ChatError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: redact_credentials(uri),
            reason: "Expected mongodb://host or mongodb+srv://host".to_string(),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| ChatError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ChatError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(ChatError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "List must contain at least one entry".to_string(),
        });
    }
    Ok(())
}

/// 把 URI 中的密碼遮蔽，避免寫進日誌
pub fn redact_credentials(uri: &str) -> String {
    match Url::parse(uri) {
        Ok(mut url) if url.password().is_some() => {
            if url.set_password(Some("****")).is_ok() {
                url.to_string()
            } else {
                "<redacted>".to_string()
            }
        }
        Ok(url) => url.to_string(),
        Err(_) => "<unparseable>".to_string(),
    }
}
