use super::*;
use crate::error::{AppError, GiveawayError};
use crate::model::giveaway::{EndReason, RerollEntry};

fn settled_record(id: &str, participants: Vec<u64>, winner_ids: Vec<u64>) -> GiveawayRecord {
    let mut record = stored_record(id, 1_000, participants, 1);
    record.ended = true;
    record.end_reason = Some(EndReason::Time);
    record.ended_at = Some(1_000);
    record.winner_ids = winner_ids;
    record
}

#[tokio::test]
async fn rerolling_a_running_giveaway_fails() {
    let (service, _) = test_service("reroll-running");
    let record = service.create(create_request()).await.unwrap();

    let result = service.reroll(&record.id, 99, 1).await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::NotYetEnded(_)))
    ));
}

#[tokio::test]
async fn rerolling_an_unknown_giveaway_fails() {
    let (service, _) = test_service("reroll-unknown");

    let result = service.reroll("nope", 99, 1).await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::NotFound(_)))
    ));
}

#[tokio::test]
async fn rerolling_without_participants_fails() {
    let (service, _) = test_service("reroll-empty");
    insert(&service, settled_record("g1", Vec::new(), Vec::new())).await;

    let result = service.reroll("g1", 99, 1).await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::NoParticipants(_)))
    ));
}

/// Prior winners are excluded while fresh candidates remain.
#[tokio::test]
async fn excludes_previously_announced_winners() {
    let (service, notifier) = test_service("reroll-excludes");
    insert(&service, settled_record("g1", vec![1, 2, 3], vec![1])).await;

    let winners = service.reroll("g1", 99, 1).await.unwrap();

    assert_eq!(winners.len(), 1);
    assert!([2, 3].contains(&winners[0]));
    assert!(notifier
        .calls()
        .contains(&NotifierCall::Reroll("g1".to_string(), winners)));
}

/// Winners from earlier rerolls are excluded too, not just the original
/// draw.
#[tokio::test]
async fn excludes_winners_of_prior_rerolls() {
    let (service, _) = test_service("reroll-chain");
    let mut record = settled_record("g1", vec![1, 2, 3], vec![1]);
    record.rerolls.push(RerollEntry {
        at: 2_000,
        by: 99,
        winners: vec![2],
    });
    insert(&service, record).await;

    let winners = service.reroll("g1", 99, 1).await.unwrap();

    assert_eq!(winners, vec![3]);
}

/// Once every participant has won, the draw falls back to the full pool.
#[tokio::test]
async fn falls_back_to_the_full_pool_when_everyone_won() {
    let (service, _) = test_service("reroll-fallback");
    insert(&service, settled_record("g1", vec![1], vec![1])).await;

    let winners = service.reroll("g1", 99, 1).await.unwrap();

    assert_eq!(winners, vec![1]);
}

/// Reroll appends an audit entry and never rewrites the original winners.
#[tokio::test]
async fn appends_an_audit_entry_without_touching_winner_ids() {
    let (service, _) = test_service("reroll-audit");
    insert(&service, settled_record("g1", vec![1, 2, 3], vec![1])).await;

    let winners = service.reroll("g1", 99, 1).await.unwrap();

    let record = service.store().get("g1").await.unwrap().unwrap();
    assert_eq!(record.winner_ids, vec![1]);
    assert_eq!(record.rerolls.len(), 1);
    assert_eq!(record.rerolls[0].by, 99);
    assert_eq!(record.rerolls[0].winners, winners);
}

#[tokio::test]
async fn clamps_the_requested_count() {
    let (service, _) = test_service("reroll-clamp");
    insert(&service, settled_record("g1", vec![1, 2, 3], Vec::new())).await;

    // 999 is clamped to 20, then bounded by the pool size
    let winners = service.reroll("g1", 99, 999).await.unwrap();

    assert_eq!(winners.len(), 3);
}
