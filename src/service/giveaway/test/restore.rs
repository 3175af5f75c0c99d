use std::time::Duration;

use super::*;
use crate::model::giveaway::EndReason;

async fn wait_until_settled(service: &GiveawayService, id: &str) -> GiveawayRecord {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let record = service.store().get(id).await.unwrap().unwrap();
        if record.ended {
            return record;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "giveaway {id} was not settled after restart"
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// The restart-recovery property: an active record whose `end_at` already
/// passed is settled with `EndReason::Time` without any further input.
#[tokio::test]
async fn settles_expired_records_after_restart() {
    let (service, notifier) = test_service("restore-expired");
    let past = chrono::Utc::now().timestamp_millis() - 1_000;
    insert(&service, stored_record("g1", past, vec![1, 2, 3], 2)).await;

    let restored = service.restore().await.unwrap();
    assert_eq!(restored, 1);

    let settled = wait_until_settled(&service, "g1").await;
    assert_eq!(settled.end_reason, Some(EndReason::Time));
    assert_eq!(settled.winner_ids.len(), 2);
    assert!(notifier
        .calls()
        .contains(&NotifierCall::Finalize("g1".to_string(), 3)));
}

/// Records still in the future get timers back but stay active.
#[tokio::test]
async fn reschedules_running_records_without_settling_them() {
    let (service, _) = test_service("restore-running");
    let future = chrono::Utc::now().timestamp_millis() + 3_600_000;
    insert(&service, stored_record("g1", future, Vec::new(), 1)).await;

    let restored = service.restore().await.unwrap();

    assert_eq!(restored, 1);
    assert!(service.timers().contains("g1"));
    tokio::time::sleep(Duration::from_millis(50)).await;
    let record = service.store().get("g1").await.unwrap().unwrap();
    assert!(!record.ended);
}

#[tokio::test]
async fn ignores_already_settled_records() {
    let (service, _) = test_service("restore-settled");
    let mut record = stored_record("g1", 1_000, vec![1], 1);
    record.ended = true;
    record.end_reason = Some(EndReason::Manual);
    insert(&service, record).await;

    let restored = service.restore().await.unwrap();

    assert_eq!(restored, 0);
    assert!(!service.timers().contains("g1"));
}
