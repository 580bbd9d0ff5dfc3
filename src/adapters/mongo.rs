use crate::config::MongoConfig;
use crate::domain::model::{AlertRecord, FieldValue};
use crate::domain::ports::AlertStore;
use crate::utils::error::Result;
use crate::utils::validation::redact_credentials;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

/// Alert store backed by a MongoDB database; one collection per detection module.
#[derive(Debug, Clone)]
pub struct MongoAlertStore {
    db: Database,
}

impl MongoAlertStore {
    /// Connects, applies the configured options and pings the server once.
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        tracing::info!("🔌 Connecting to MongoDB at {}", redact_credentials(&config.uri));

        let mut options = ClientOptions::parse(&config.uri).await?;
        if let Some(timeout) = config.server_selection_timeout() {
            options.server_selection_timeout = Some(timeout);
        }
        if let Some(app_name) = &config.app_name {
            options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(options)?;
        let db = client.database(&config.database);
        db.run_command(doc! { "ping": 1 }).await?;

        tracing::info!("✅ MongoDB database '{}' is reachable", config.database);
        Ok(Self { db })
    }
}

#[async_trait]
impl AlertStore for MongoAlertStore {
    async fn latest(&self, collection: &str) -> Result<Option<AlertRecord>> {
        let doc = self
            .db
            .collection::<Document>(collection)
            .find_one(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await?;

        Ok(doc.map(|d| record_from_document(collection, d)))
    }
}

fn to_utc(dt: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// `createdAt` when it is a date, else the ObjectId generation time.
fn document_timestamp(collection: &str, doc: &Document) -> DateTime<Utc> {
    if let Some(Bson::DateTime(created)) = doc.get("createdAt") {
        return to_utc(*created);
    }
    if let Some(Bson::ObjectId(id)) = doc.get("_id") {
        return to_utc(id.timestamp());
    }

    tracing::warn!(
        "Document in {} has neither createdAt nor an ObjectId _id; ranking it oldest",
        collection
    );
    DateTime::<Utc>::MIN_UTC
}

fn field_value(value: Bson) -> FieldValue {
    match value {
        Bson::Null | Bson::Undefined => FieldValue::Null,
        Bson::Boolean(b) => FieldValue::Bool(b),
        Bson::Int32(i) => FieldValue::Int(i64::from(i)),
        Bson::Int64(i) => FieldValue::Int(i),
        Bson::Double(x) => FieldValue::Float(x),
        Bson::String(s) | Bson::Symbol(s) => FieldValue::Text(s),
        Bson::DateTime(dt) => FieldValue::DateTime(to_utc(dt).naive_utc()),
        Bson::ObjectId(id) => FieldValue::ObjectId(id.to_hex()),
        Bson::Document(_) | Bson::Array(_) => FieldValue::Nested,
        Bson::Decimal128(d) => FieldValue::Text(d.to_string()),
        Bson::JavaScriptCode(code) => FieldValue::Text(code),
        Bson::Timestamp(ts) => FieldValue::Text(format!("Timestamp({}, {})", ts.time, ts.increment)),
        other => FieldValue::Text(other.to_string()),
    }
}

pub fn record_from_document(collection: &str, doc: Document) -> AlertRecord {
    let timestamp = document_timestamp(collection, &doc);
    AlertRecord {
        collection: collection.to_string(),
        fields: doc.into_iter().map(|(k, v)| (k, field_value(v))).collect(),
        timestamp,
    }
}
