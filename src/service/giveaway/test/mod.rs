use std::sync::Arc;

use super::*;
use crate::data::GiveawayStore;
use crate::model::giveaway::GiveawayRecord;
use crate::service::notify::test_support::{NotifierCall, RecordingNotifier};

mod cancel;
mod reroll;
mod restore;
mod settle;

/// Builds a service over a fresh temp-file store and a recording notifier.
fn test_service(name: &str) -> (GiveawayService, Arc<RecordingNotifier>) {
    let path = std::env::temp_dir().join(format!(
        "giveaway-service-{name}-{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let notifier = Arc::new(RecordingNotifier::default());
    let service = GiveawayService::new(GiveawayStore::new(path), notifier.clone());
    (service, notifier)
}

/// A creation request with sensible defaults for tests.
fn create_request() -> CreateGiveaway {
    CreateGiveaway {
        guild_id: 10,
        channel_id: 20,
        created_by: 30,
        title: "Winter drop".to_string(),
        prize: "Nitro".to_string(),
        description: None,
        duration: "30m".to_string(),
        winner_count: 1,
    }
}

/// A record inserted straight into the store, bypassing `create`, for tests
/// that need full control over persisted state (settled records, expired
/// deadlines, duplicated participants).
fn stored_record(id: &str, end_at: i64, participants: Vec<u64>, winner_count: u32) -> GiveawayRecord {
    GiveawayRecord {
        id: id.to_string(),
        guild_id: 10,
        channel_id: 20,
        message_id: 500,
        title: "Winter drop".to_string(),
        prize: "Nitro".to_string(),
        description: None,
        winner_count,
        created_at: end_at - 60_000,
        end_at,
        created_by: 30,
        participants,
        ended: false,
        end_reason: None,
        ended_at: None,
        winner_ids: Vec::new(),
        rerolls: Vec::new(),
    }
}

async fn insert(service: &GiveawayService, record: GiveawayRecord) {
    service
        .store()
        .update(move |records| {
            records.insert(record.id.clone(), record);
        })
        .await
        .unwrap();
}
