use crate::domain::model::LatestAlert;
use crate::domain::ports::AlertStore;
use crate::utils::error::Result;

/// Reads the newest document of each collection and keeps the most recent one.
///
/// Ties go to the collection listed first.
pub async fn latest_across<S: AlertStore + ?Sized>(
    store: &S,
    collections: &[String],
) -> Result<Option<LatestAlert>> {
    let mut latest: Option<LatestAlert> = None;

    for name in collections {
        let Some(record) = store.latest(name).await? else {
            tracing::debug!("No documents in collection {}", name);
            continue;
        };

        let newer = latest
            .as_ref()
            .map_or(true, |current| record.timestamp > current.final_time);

        if newer {
            latest = Some(LatestAlert {
                module: name.clone(),
                final_time: record.timestamp,
                record,
            });
        }
    }

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAlertStore;
    use crate::domain::model::AlertRecord;
    use chrono::{TimeZone, Utc};

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_picks_most_recent_collection() {
        let store = InMemoryAlertStore::new();
        store.insert(AlertRecord::new(
            "fires",
            Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap(),
        ));
        store.insert(AlertRecord::new(
            "gasleakages",
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        ));

        let latest = latest_across(&store, &names(&["fires", "gasleakages", "slips"]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(latest.module, "gasleakages");
        assert_eq!(
            latest.final_time,
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_tie_keeps_first_listed() {
        let store = InMemoryAlertStore::new();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        store.insert(AlertRecord::new("slips", at));
        store.insert(AlertRecord::new("ppekits", at));

        let latest = latest_across(&store, &names(&["ppekits", "slips"]))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.module, "ppekits");
    }

    #[tokio::test]
    async fn test_empty_collections_yield_none() {
        let store = InMemoryAlertStore::new();
        let latest = latest_across(&store, &names(&["fires", "slips"])).await.unwrap();
        assert!(latest.is_none());

        let latest = latest_across(&store, &[]).await.unwrap();
        assert!(latest.is_none());
    }
}
