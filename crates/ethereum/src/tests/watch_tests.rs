//! Push-style watches over a scripted subscription

use std::sync::Arc;

use ethers::types::{I256, U256};
use tokio::sync::mpsc;

use bindings_core::Error;

use super::mock_backend::*;
use crate::contracts::mock_v3_aggregator::AnswerUpdated;
use crate::contracts::MockV3Aggregator;
use crate::event::EventRecord;
use crate::options::WatchOpts;
use crate::subscription::{LogSubscription, SubscriptionFeed};
use crate::watch::WatchSubscription;

async fn watch(
    sink: mpsc::Sender<EventRecord<AnswerUpdated>>,
) -> (WatchSubscription, SubscriptionFeed) {
    let (subscription, feed) = LogSubscription::channel(16);
    let mut chain = MockChain::new();
    chain
        .expect_subscribe_filter_logs()
        .times(1)
        .return_once(move |_| Ok(subscription));

    let feed_contract = MockV3Aggregator::new(contract_address(), Arc::new(chain)).unwrap();
    let watch = feed_contract
        .watch_answer_updated(&WatchOpts::default(), sink, &[], &[])
        .await
        .unwrap();
    (watch, feed)
}

#[tokio::test]
async fn test_watch_forwards_events() {
    let (tx, mut rx) = mpsc::channel(8);
    let (watch, mut feed) = watch(tx).await;

    assert!(feed.send(answer_updated(7, 1, 100, 10)).await);
    let record = rx.recv().await.unwrap();
    assert_eq!(record.current, I256::from(7));
    assert_eq!(record.block_number(), Some(10));

    assert!(feed.send(answer_updated(8, 2, 200, 11)).await);
    assert_eq!(rx.recv().await.unwrap().round_id, U256::from(2));

    let unsubscribes = feed.unsubscribe_counter();
    feed.finish();
    watch.wait().await.unwrap();
    assert!(rx.recv().await.is_none());
    assert_eq!(unsubscribes.get(), 1);
}

#[tokio::test]
async fn test_watch_delivers_buffer_after_completion() {
    let (tx, mut rx) = mpsc::channel(8);
    let (watch, feed) = watch(tx).await;

    assert!(feed.try_send(answer_updated(1, 1, 1, 1)));
    assert!(feed.try_send(answer_updated(2, 2, 2, 2)));
    let unsubscribes = feed.unsubscribe_counter();
    feed.finish();

    watch.wait().await.unwrap();
    assert_eq!(rx.recv().await.unwrap().round_id, U256::from(1));
    assert_eq!(rx.recv().await.unwrap().round_id, U256::from(2));
    assert_eq!(unsubscribes.get(), 1);
}

#[tokio::test]
async fn test_upstream_error_ends_the_watch() {
    let (tx, _rx) = mpsc::channel(8);
    let (watch, mut feed) = watch(tx).await;

    feed.fail(Error::subscription("filter not found"));
    let result = watch.wait().await;
    assert!(matches!(result, Err(Error::Subscription(_))));
    assert_eq!(feed.unsubscribe_count(), 1);
}

#[tokio::test]
async fn test_unsubscribe_stops_the_watch() {
    let (tx, _rx) = mpsc::channel(8);
    let (mut watch, mut feed) = watch(tx).await;

    watch.unsubscribe();
    watch.unsubscribe();
    watch.wait().await.unwrap();

    assert!(feed.is_closed());
    assert_eq!(feed.unsubscribe_count(), 1);
}

#[tokio::test]
async fn test_decode_error_ends_the_watch() {
    let (tx, mut rx) = mpsc::channel(8);
    let (watch, mut feed) = watch(tx).await;

    assert!(feed.send(truncated_answer_updated(4)).await);
    let err = watch.wait().await.unwrap_err();
    assert!(err.is_decode());
    assert_eq!(feed.unsubscribe_count(), 1);
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_closed_sink_ends_the_watch() {
    let (tx, rx) = mpsc::channel(8);
    let (watch, mut feed) = watch(tx).await;

    drop(rx);
    assert!(feed.send(answer_updated(1, 1, 1, 1)).await);
    watch.wait().await.unwrap();
    assert_eq!(feed.unsubscribe_count(), 1);
}

#[tokio::test]
async fn test_dropping_the_handle_stops_the_watch() {
    let (tx, _rx) = mpsc::channel(8);
    let (watch, mut feed) = watch(tx).await;

    drop(watch);
    feed.closed().await;
    assert_eq!(feed.unsubscribe_count(), 1);
}
