use crate::domain::model::AlertRecord;
use crate::domain::ports::AlertStore;
use crate::utils::error::{ChatError, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::RwLock;

/// Alert store kept in process memory, used by tests and `--demo`.
#[derive(Debug, Default)]
pub struct InMemoryAlertStore {
    collections: RwLock<HashMap<String, Vec<AlertRecord>>>,
}

impl InMemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: AlertRecord) {
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        collections
            .entry(record.collection.clone())
            .or_default()
            .push(record);
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    /// A handful of alerts across the default collections, newest in `occupancies`.
    pub fn with_sample_data() -> Self {
        let store = Self::new();
        let now = Utc::now();

        store.insert(
            AlertRecord::new("fires", now - Duration::minutes(42))
                .with_field("camera_name", json!("Boiler Room Cam 2"))
                .with_field("fire_detected", json!(true))
                .with_field("smoke_detected", json!(false))
                .with_field("priority", json!("High")),
        );
        store.insert(
            AlertRecord::new("gasleakages", now - Duration::hours(3))
                .with_field("sensor_id", json!("GS-104"))
                .with_field("ppm", json!(38.5))
                .with_field("priority", json!("Medium")),
        );
        store.insert(
            AlertRecord::new("ppekits", now - Duration::minutes(25))
                .with_field("helmet_status", json!("Missing"))
                .with_field("vest_status", json!("Worn"))
                .with_field("ppe_compliance", json!(false)),
        );
        store.insert(
            AlertRecord::new("occupancies", now - Duration::minutes(5))
                .with_field("occupancy_status", json!("Over capacity"))
                .with_field("person_count_status", json!(14))
                .with_field("exceeds_compliance_policy", json!(true))
                .with_field("compliance_frame", json!("<frame>")),
        );
        store.insert(
            AlertRecord::new("unauthorizedentries", now - Duration::hours(1))
                .with_field("unauthorized_person_detected", json!(true))
                .with_field("zone", json!("Restricted Area C")),
        );

        store
    }
}

#[async_trait]
impl AlertStore for InMemoryAlertStore {
    async fn latest(&self, collection: &str) -> Result<Option<AlertRecord>> {
        let collections = self.collections.read().map_err(|e| ChatError::StoreError {
            message: format!("in-memory store lock poisoned: {}", e),
        })?;

        // 同時間取最後插入的一筆，對應 _id 遞減排序
        Ok(collections.get(collection).and_then(|records| {
            records
                .iter()
                .enumerate()
                .max_by_key(|(i, r)| (r.timestamp, *i))
                .map(|(_, r)| r.clone())
        }))
    }
}
