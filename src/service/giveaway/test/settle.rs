use super::*;
use crate::model::giveaway::EndReason;

/// The §8 scenario: 30m giveaway, two winners, three joiners, manual end.
#[tokio::test]
async fn manual_settlement_draws_winners_from_the_joiners() {
    let (service, notifier) = test_service("settle-manual");
    let record = service
        .create(CreateGiveaway {
            winner_count: 2,
            ..create_request()
        })
        .await
        .unwrap();
    for user in [1, 2, 3] {
        service.join(&record.id, user).await.unwrap();
    }

    service.settle(&record.id, EndReason::Manual).await.unwrap();

    let settled = service.store().get(&record.id).await.unwrap().unwrap();
    assert!(settled.ended);
    assert_eq!(settled.end_reason, Some(EndReason::Manual));
    assert!(settled.ended_at.is_some());
    assert_eq!(settled.winner_ids.len(), 2);
    assert!(settled.winner_ids.iter().all(|w| [1, 2, 3].contains(w)));
    assert_ne!(settled.winner_ids[0], settled.winner_ids[1]);
    assert!(!service.timers().contains(&record.id));
    assert!(notifier
        .calls()
        .contains(&NotifierCall::Finalize(record.id.clone(), 3)));
}

/// Settling an already-settled record changes nothing and notifies nobody.
#[tokio::test]
async fn settlement_is_idempotent() {
    let (service, notifier) = test_service("settle-idempotent");
    let record = service.create(create_request()).await.unwrap();
    service.join(&record.id, 1).await.unwrap();

    assert!(service.settle(&record.id, EndReason::Manual).await.unwrap());
    let first = service.store().get(&record.id).await.unwrap().unwrap();
    let calls_after_first = notifier.calls().len();

    // The losing side of the race reports that it did nothing, so a manual
    // end on a finished giveaway can tell the staff member instead of
    // claiming a fresh draw.
    assert!(!service.settle(&record.id, EndReason::Time).await.unwrap());
    let second = service.store().get(&record.id).await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(notifier.calls().len(), calls_after_first);
}

#[tokio::test]
async fn empty_pool_settles_with_no_winners() {
    let (service, notifier) = test_service("settle-empty");
    let record = service.create(create_request()).await.unwrap();

    service.settle(&record.id, EndReason::Manual).await.unwrap();

    let settled = service.store().get(&record.id).await.unwrap().unwrap();
    assert!(settled.ended);
    assert!(settled.winner_ids.is_empty());
    assert!(notifier
        .calls()
        .contains(&NotifierCall::Finalize(record.id.clone(), 0)));
}

/// A missing id is a silent no-op: the expiry timer may fire after a cancel
/// already deleted the record.
#[tokio::test]
async fn settling_a_missing_record_is_a_no_op() {
    let (service, notifier) = test_service("settle-missing");

    assert!(!service.settle("gone", EndReason::Time).await.unwrap());

    assert!(notifier.calls().is_empty());
}

/// Winners come from the deduplicated pool even if the persisted participant
/// list carries duplicates.
#[tokio::test]
async fn duplicated_participants_are_counted_once() {
    let (service, notifier) = test_service("settle-dedup");
    let end_at = chrono::Utc::now().timestamp_millis() + 60_000;
    insert(
        &service,
        stored_record("g1", end_at, vec![5, 5, 5, 6], 20),
    )
    .await;

    service.settle("g1", EndReason::Manual).await.unwrap();

    let settled = service.store().get("g1").await.unwrap().unwrap();
    let mut winners = settled.winner_ids.clone();
    winners.sort_unstable();
    assert_eq!(winners, vec![5, 6]);
    assert!(notifier
        .calls()
        .contains(&NotifierCall::Finalize("g1".to_string(), 2)));
}
