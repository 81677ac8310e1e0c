//! Live event iterators over a scripted subscription

use std::sync::Arc;

use ethers::types::{I256, U256, U64};

use bindings_core::Error;

use super::mock_backend::*;
use crate::contracts::mock_v3_aggregator::AnswerUpdated;
use crate::contracts::MockV3Aggregator;
use crate::options::WatchOpts;
use crate::subscription::{EventIterator, IteratorState, LogSubscription, SubscriptionFeed};

async fn subscribe(mut chain: MockChain, opts: WatchOpts) -> (EventIterator<AnswerUpdated>, SubscriptionFeed) {
    let (subscription, feed) = LogSubscription::channel(16);
    chain
        .expect_subscribe_filter_logs()
        .times(1)
        .return_once(move |_| Ok(subscription));

    let feed_contract = MockV3Aggregator::new(contract_address(), Arc::new(chain)).unwrap();
    let events = feed_contract
        .handle()
        .subscribe::<AnswerUpdated>(&opts, vec![])
        .await
        .unwrap();
    (events, feed)
}

#[tokio::test]
async fn test_live_events_then_completion() {
    let (mut events, mut feed) = subscribe(MockChain::new(), WatchOpts::default()).await;

    assert!(feed.send(answer_updated(100, 1, 10, 5)).await);
    assert!(events.next().await);
    assert_eq!(events.event().unwrap().current, I256::from(100));
    assert_eq!(events.state(), IteratorState::Active);

    assert!(feed.send(answer_updated(-3, 2, 20, 6)).await);
    let record = events.next_event().await.unwrap();
    assert_eq!(record.current, I256::from(-3));
    assert_eq!(record.round_id, U256::from(2));

    feed.finish();
    assert!(!events.next().await);
    assert!(events.error().is_none());
    assert_eq!(events.state(), IteratorState::Exhausted);
}

#[tokio::test]
async fn test_completion_delivers_buffered_logs() {
    let (mut events, feed) = subscribe(MockChain::new(), WatchOpts::default()).await;

    for round in 1..=3 {
        assert!(feed.try_send(answer_updated(round, round as u64, 0, round as u64)));
    }
    feed.finish();

    for round in 1..=3u64 {
        assert!(events.next().await);
        assert_eq!(events.event().unwrap().round_id, U256::from(round));
    }
    assert!(!events.next().await);
    assert!(events.error().is_none());
    assert_eq!(events.state(), IteratorState::Exhausted);
}

#[tokio::test]
async fn test_upstream_error_is_sticky() {
    let (mut events, mut feed) = subscribe(MockChain::new(), WatchOpts::default()).await;

    assert!(feed.send(answer_updated(1, 1, 1, 1)).await);
    assert!(events.next().await);

    feed.fail(Error::subscription("filter not found"));
    assert!(!events.next().await);
    assert!(matches!(events.error(), Some(Error::Subscription(_))));
    assert!(events.event().is_none());

    // later logs are never delivered
    feed.try_send(answer_updated(2, 2, 2, 2));
    assert!(!events.next().await);
    assert!(matches!(events.error(), Some(Error::Subscription(_))));
    assert_eq!(events.state(), IteratorState::Failed);
}

#[tokio::test]
async fn test_malformed_log_fails_the_iterator() {
    let (mut events, mut feed) = subscribe(MockChain::new(), WatchOpts::default()).await;

    assert!(feed.send(answer_updated(1, 1, 1, 2)).await);
    assert!(feed.send(truncated_answer_updated(3)).await);
    assert!(feed.send(answer_updated(2, 2, 2, 4)).await);

    assert!(events.next().await);
    assert!(!events.next().await);
    let message = events.error().unwrap().to_string();
    assert!(events.error().unwrap().is_decode());

    // the well-formed log after it is never reported
    assert!(!events.next().await);
    assert_eq!(events.error().unwrap().to_string(), message);
    assert_eq!(events.state(), IteratorState::Failed);
}

#[tokio::test]
async fn test_close_unsubscribes_and_drains() {
    let (mut events, mut feed) = subscribe(MockChain::new(), WatchOpts::default()).await;

    assert!(feed.try_send(answer_updated(1, 1, 1, 1)));
    assert!(feed.try_send(answer_updated(2, 2, 2, 2)));

    events.close().unwrap();
    assert!(feed.is_closed());
    assert_eq!(feed.unsubscribe_count(), 1);
    assert_eq!(events.state(), IteratorState::Draining);

    assert!(events.next().await);
    assert!(events.next().await);
    assert!(!events.next().await);
    assert!(events.error().is_none());

    events.close().unwrap();
    assert_eq!(feed.unsubscribe_count(), 1);
}

#[tokio::test]
async fn test_dropping_the_iterator_unsubscribes() {
    let (events, mut feed) = subscribe(MockChain::new(), WatchOpts::default()).await;

    drop(events);
    feed.closed().await;
    assert_eq!(feed.unsubscribe_count(), 1);
}

#[tokio::test]
async fn test_watch_opts_set_start_block() {
    let mut chain = MockChain::new();
    let (subscription, _feed) = LogSubscription::channel(1);
    chain
        .expect_subscribe_filter_logs()
        .withf(|filter| filter.get_from_block() == Some(U64::from(50)))
        .times(1)
        .return_once(move |_| Ok(subscription));

    let feed_contract = MockV3Aggregator::new(contract_address(), Arc::new(chain)).unwrap();
    let events = feed_contract
        .handle()
        .subscribe::<AnswerUpdated>(&WatchOpts { start: Some(50) }, vec![])
        .await;
    assert!(events.is_ok());
}
