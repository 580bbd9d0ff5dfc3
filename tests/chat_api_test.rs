use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use chrono::{TimeZone, Utc};
use optimes_chat::core::AlertStore;
use optimes_chat::domain::model::{AlertRecord, FieldValue};
use optimes_chat::server::build_router;
use optimes_chat::{ChatEngine, ChatError, ChatbotConfig, InMemoryAlertStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn seeded_store() -> InMemoryAlertStore {
    let store = InMemoryAlertStore::new();
    store.insert(
        AlertRecord::new("fires", Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap())
            .with_field("_id", FieldValue::ObjectId("6682e1f0a1b2c3d4e5f60718".into()))
            .with_field("fire_detected", json!(true))
            .with_field("smoke_detected", json!(false))
            .with_field("image", json!("data:image/jpeg;base64,...")),
    );
    store.insert(
        AlertRecord::new(
            "occupancies",
            Utc.with_ymd_and_hms(2025, 7, 1, 9, 15, 30).unwrap(),
        )
        .with_field("person_count_status", json!(9))
        .with_field("exceeds_compliance_policy", json!(true))
        .with_field("vacant_frame", json!("<frame>")),
    );
    store
}

async fn post_chat(store: InMemoryAlertStore, body: Value) -> Result<(StatusCode, Value)> {
    let engine = Arc::new(ChatEngine::new(store, &ChatbotConfig::default()));
    let app = build_router(engine);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
        )
        .await?;

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn test_greeting() -> Result<()> {
    let (status, body) = post_chat(seeded_store(), json!({"message": "Hey there"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"reply": "👋 Hello! Welcome to OptiMES. How can I assist you today?"})
    );
    Ok(())
}

#[tokio::test]
async fn test_help_includes_buttons() -> Result<()> {
    let (status, body) = post_chat(seeded_store(), json!({"message": "I need support"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().starts_with("🆘"));
    assert_eq!(body["buttons"].as_array().unwrap().len(), 3);
    assert_eq!(body["buttons"][1]["action"], "Show full data");
    Ok(())
}

#[tokio::test]
async fn test_fire_alert_summary() -> Result<()> {
    let (status, body) = post_chat(seeded_store(), json!({"message": "Latest fire alert?"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["reply"],
        "📢 Last Alert Summary from **fires**:\n\
         🔥 Fire Detected: **True**\n\
         💨 Smoke Detected: **False**\n\
         🔹 Module: **fires**\n\
         🔹 Final Time: **2025-07-01 08:00:00+00:00**"
    );
    assert!(body.get("buttons").is_none());
    Ok(())
}

#[tokio::test]
async fn test_unrouted_message_uses_newest_collection() -> Result<()> {
    let (status, body) = post_chat(seeded_store(), json!({"message": "show full data"})).await?;
    assert_eq!(status, StatusCode::OK);

    let reply = body["reply"].as_str().unwrap();
    assert!(reply.starts_with("📢 Last Alert Summary from **occupancies**:"));
    assert!(reply.contains("👥 Person Count Status: **9**"));
    assert!(reply.contains("🚫 Exceeds Compliance Policy: **True**"));
    assert!(!reply.contains("Vacant Frame"));
    Ok(())
}

#[tokio::test]
async fn test_missing_message_field() -> Result<()> {
    let (status, body) = post_chat(seeded_store(), json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["reply"].as_str().unwrap().contains("**occupancies**"));
    Ok(())
}

#[tokio::test]
async fn test_no_data() -> Result<()> {
    let (status, body) = post_chat(InMemoryAlertStore::new(), json!({"message": "ppe"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reply": "⚠️ No recent data found in the system."}));
    Ok(())
}

struct UnavailableStore;

#[async_trait]
impl AlertStore for UnavailableStore {
    async fn latest(&self, _collection: &str) -> optimes_chat::Result<Option<AlertRecord>> {
        Err(ChatError::StoreError {
            message: "server selection timeout".to_string(),
        })
    }
}

#[tokio::test]
async fn test_store_failure_maps_to_service_unavailable() -> Result<()> {
    let engine = Arc::new(ChatEngine::new(UnavailableStore, &ChatbotConfig::default()));
    let response = build_router(engine)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"message":"gas"}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert!(body["error"].as_str().unwrap().contains("database"));
    Ok(())
}

#[tokio::test]
async fn test_small_talk_does_not_touch_failing_store() -> Result<()> {
    let engine = Arc::new(ChatEngine::new(UnavailableStore, &ChatbotConfig::default()));
    let reply = engine.respond("thanks!").await?;
    assert!(reply.as_text().starts_with("😊"));
    Ok(())
}

#[tokio::test]
async fn test_health_and_index() -> Result<()> {
    let engine = Arc::new(ChatEngine::new(seeded_store(), &ChatbotConfig::default()));
    let app = build_router(engine);

    let health = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(&to_bytes(health.into_body(), usize::MAX).await?[..], b"OK");

    let index = app
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(index.status(), StatusCode::OK);
    let html = to_bytes(index.into_body(), usize::MAX).await?;
    assert!(String::from_utf8_lossy(&html).contains("OptiMES Assistant"));
    Ok(())
}

#[tokio::test]
async fn test_non_json_body_is_rejected() -> Result<()> {
    let engine = Arc::new(ChatEngine::new(seeded_store(), &ChatbotConfig::default()));
    let response = build_router(engine)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("not json"))?,
        )
        .await?;

    assert!(response.status().is_client_error());
    Ok(())
}
