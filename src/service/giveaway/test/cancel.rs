use super::*;
use crate::error::{AppError, GiveawayError};
use crate::model::giveaway::EndReason;

/// Cancellation removes the record entirely; a later join sees `NotFound`.
#[tokio::test]
async fn cancel_deletes_the_record() {
    let (service, notifier) = test_service("cancel-deletes");
    let record = service.create(create_request()).await.unwrap();

    service.cancel(&record.id).await.unwrap();

    assert!(service.store().get(&record.id).await.unwrap().is_none());
    assert!(!service.timers().contains(&record.id));
    assert!(notifier
        .calls()
        .contains(&NotifierCall::Cancelled(record.id.clone())));

    let result = service.join(&record.id, 77).await;
    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::NotFound(_)))
    ));
}

#[tokio::test]
async fn cancelling_an_unknown_giveaway_fails() {
    let (service, _) = test_service("cancel-unknown");

    let result = service.cancel("nope").await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::NotFound(_)))
    ));
}

/// Cancellation only applies to still-active records.
#[tokio::test]
async fn cancelling_a_settled_giveaway_fails() {
    let (service, _) = test_service("cancel-settled");
    let record = service.create(create_request()).await.unwrap();
    service.settle(&record.id, EndReason::Manual).await.unwrap();

    let result = service.cancel(&record.id).await;

    assert!(matches!(
        result,
        Err(AppError::GiveawayErr(GiveawayError::AlreadyEnded(_)))
    ));
    // the settled record is retained
    assert!(service.store().get(&record.id).await.unwrap().is_some());
}
