//! Log subscriptions and the typed event iterator
//!
//! A [`LogSubscription`] is the consumer half of an upstream log feed: a
//! bounded log channel, a one-shot upstream error slot and a quit signal. The
//! producer half is a [`SubscriptionFeed`], driven by a backend task (or by a
//! test double).

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ethers::types::Log;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use bindings_core::{Error, Result};

use crate::contract::BoundContract;
use crate::event::{ContractEvent, EventRecord};

/// Capacity of the log buffer between a backend and its subscriber
pub const LOG_BUFFER: usize = 128;

/// Upstream termination slot
///
/// Resolves once with `Some(err)` if the upstream failed, or `None` if it
/// completed cleanly (the producer dropped its half).
#[derive(Debug)]
pub struct UpstreamError(Option<oneshot::Receiver<Error>>);

impl UpstreamError {
    /// Wait for the upstream to terminate; pending forever once consumed
    pub async fn wait(&mut self) -> Option<Error> {
        match self.0.as_mut() {
            Some(rx) => {
                let result = rx.await;
                self.0 = None;
                result.ok()
            }
            None => std::future::pending().await,
        }
    }

    /// Take the upstream error if one was already reported
    pub fn try_take(&mut self) -> Option<Error> {
        let rx = self.0.as_mut()?;
        match rx.try_recv() {
            Ok(err) => {
                self.0 = None;
                Some(err)
            }
            Err(oneshot::error::TryRecvError::Closed) => {
                self.0 = None;
                None
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
        }
    }
}

/// Consumer half of an upstream log subscription
pub struct LogSubscription {
    logs: mpsc::Receiver<Log>,
    upstream: UpstreamError,
    quit: Option<oneshot::Sender<()>>,
    unsubscribes: Arc<AtomicUsize>,
}

impl LogSubscription {
    /// Create a connected subscription and feed pair
    pub fn channel(capacity: usize) -> (Self, SubscriptionFeed) {
        let (log_tx, log_rx) = mpsc::channel(capacity.max(1));
        let (err_tx, err_rx) = oneshot::channel();
        let (quit_tx, quit_rx) = oneshot::channel();
        let unsubscribes = Arc::new(AtomicUsize::new(0));

        let subscription = Self {
            logs: log_rx,
            upstream: UpstreamError(Some(err_rx)),
            quit: Some(quit_tx),
            unsubscribes: unsubscribes.clone(),
        };
        let feed = SubscriptionFeed {
            logs: log_tx,
            errors: Some(err_tx),
            quit: Some(quit_rx),
            unsubscribes,
        };
        (subscription, feed)
    }

    /// A subscription over a fixed set of logs whose upstream has already completed
    pub fn from_logs(logs: Vec<Log>) -> Self {
        let (subscription, feed) = Self::channel(logs.len());
        for log in logs {
            // capacity covers every log
            feed.try_send(log);
        }
        subscription
    }

    /// Tell the upstream to stop; only the first call has any effect
    pub fn unsubscribe(&mut self) {
        if let Some(quit) = self.quit.take() {
            self.unsubscribes.fetch_add(1, Ordering::SeqCst);
            let _ = quit.send(());
            debug!("Log subscription unsubscribed");
        }
    }

    pub fn is_unsubscribed(&self) -> bool {
        self.quit.is_none()
    }

    pub async fn recv(&mut self) -> Option<Log> {
        self.logs.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Log> {
        self.logs.try_recv().ok()
    }

    /// Next log; `None` once the upstream completed and the buffer is drained
    pub async fn next_log(&mut self) -> Result<Option<Log>> {
        loop {
            tokio::select! {
                log = self.logs.recv() => {
                    return match log {
                        Some(log) => Ok(Some(log)),
                        None => self.upstream.try_take().map_or(Ok(None), Err),
                    };
                }
                err = self.upstream.wait() => {
                    if let Some(err) = err {
                        return Err(err);
                    }
                }
            }
        }
    }

    /// See [`UpstreamError::wait`]
    pub async fn err(&mut self) -> Option<Error> {
        self.upstream.wait().await
    }

    /// Split into the log receiver and the upstream error slot so both can be awaited together
    pub(crate) fn parts(&mut self) -> (&mut mpsc::Receiver<Log>, &mut UpstreamError) {
        (&mut self.logs, &mut self.upstream)
    }
}

impl Drop for LogSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for LogSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSubscription")
            .field("unsubscribed", &self.is_unsubscribed())
            .finish()
    }
}

/// Producer half of a log subscription
#[derive(Debug)]
pub struct SubscriptionFeed {
    logs: mpsc::Sender<Log>,
    errors: Option<oneshot::Sender<Error>>,
    quit: Option<oneshot::Receiver<()>>,
    unsubscribes: Arc<AtomicUsize>,
}

impl SubscriptionFeed {
    /// Deliver a log, waiting for buffer space
    ///
    /// Returns false once the subscriber has gone away or unsubscribed.
    pub async fn send(&mut self, log: Log) -> bool {
        let Some(quit) = self.quit.as_mut() else {
            return false;
        };
        let sent = tokio::select! {
            _ = quit => None,
            sent = self.logs.send(log) => Some(sent.is_ok()),
        };
        match sent {
            Some(sent) => sent,
            None => {
                self.quit = None;
                false
            }
        }
    }

    /// Deliver a log without waiting; false if the buffer is full or closed
    pub fn try_send(&self, log: Log) -> bool {
        self.logs.try_send(log).is_ok()
    }

    /// Report an upstream failure; the subscription then terminates
    ///
    /// Only the first failure is delivered.
    pub fn fail(&mut self, err: Error) {
        if let Some(errors) = self.errors.take() {
            let _ = errors.send(err);
        }
    }

    /// End the subscription cleanly
    pub fn finish(self) {}

    /// Resolve once the subscriber unsubscribes or drops its half
    pub async fn closed(&mut self) {
        if let Some(quit) = self.quit.as_mut() {
            let _ = quit.await;
            self.quit = None;
        }
    }

    /// Whether the subscriber asked the upstream to stop
    pub fn is_closed(&mut self) -> bool {
        let Some(quit) = self.quit.as_mut() else {
            return true;
        };
        match quit.try_recv() {
            Err(oneshot::error::TryRecvError::Empty) => false,
            _ => {
                self.quit = None;
                true
            }
        }
    }

    /// Number of unsubscribe requests that reached this feed
    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribes.load(Ordering::SeqCst)
    }

    /// Unsubscribe counter that stays readable after the feed is finished
    pub fn unsubscribe_counter(&self) -> UnsubscribeCounter {
        UnsubscribeCounter(self.unsubscribes.clone())
    }
}

/// Shared view of how many times the subscriber unsubscribed
#[derive(Debug, Clone)]
pub struct UnsubscribeCounter(Arc<AtomicUsize>);

impl UnsubscribeCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lifecycle of an [`EventIterator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// Waiting on the live upstream
    Active,
    /// Upstream is done; buffered logs are still delivered
    Draining,
    /// Terminal; the stored error is reported forever
    Failed,
    /// Terminal; every log was delivered
    Exhausted,
}

/// Input to the iterator state machine
#[derive(Debug)]
pub enum Signal {
    /// A log arrived
    Log(Log),
    /// The upstream completed cleanly
    Completed,
    /// The upstream failed
    Failed(Error),
    /// A log could not be decoded
    Malformed(Error),
    /// The buffer is empty
    Empty,
    /// The consumer closed the iterator
    Closed,
}

/// What the iterator does after a transition
#[derive(Debug)]
pub enum Step {
    /// Decode and yield this log
    Decode(Log),
    /// Record the error and stop
    Fail(Error),
    /// Fetch the next signal
    Continue,
    /// Report no further events
    Stop,
}

impl IteratorState {
    /// Pure transition function of the iterator
    pub fn on(self, signal: Signal) -> (IteratorState, Step) {
        use IteratorState::*;
        match (self, signal) {
            (Failed, _) => (Failed, Step::Stop),
            (Exhausted, _) => (Exhausted, Step::Stop),

            (state, Signal::Log(log)) => (state, Step::Decode(log)),
            (_, Signal::Failed(err)) | (_, Signal::Malformed(err)) => (Failed, Step::Fail(err)),

            (Active, Signal::Completed | Signal::Closed | Signal::Empty) => {
                (Draining, Step::Continue)
            }
            (Draining, Signal::Completed | Signal::Closed) => (Draining, Step::Continue),
            (Draining, Signal::Empty) => (Exhausted, Step::Stop),
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, IteratorState::Failed | IteratorState::Exhausted)
    }
}

/// Pull-based iterator over decoded contract events
///
/// Call [`next`](EventIterator::next) until it returns false, then check
/// [`error`](EventIterator::error). Errors are sticky.
pub struct EventIterator<E: ContractEvent> {
    contract: Arc<BoundContract>,
    subscription: LogSubscription,
    state: IteratorState,
    current: Option<EventRecord<E>>,
    error: Option<Error>,
}

impl<E: ContractEvent> EventIterator<E> {
    /// Iterator over a live subscription
    pub fn live(contract: Arc<BoundContract>, subscription: LogSubscription) -> Self {
        Self::with_state(contract, subscription, IteratorState::Active)
    }

    /// Iterator over logs that were already fetched
    pub fn buffered(contract: Arc<BoundContract>, logs: Vec<Log>) -> Self {
        Self::with_state(
            contract,
            LogSubscription::from_logs(logs),
            IteratorState::Draining,
        )
    }

    fn with_state(
        contract: Arc<BoundContract>,
        subscription: LogSubscription,
        state: IteratorState,
    ) -> Self {
        Self {
            contract,
            subscription,
            state,
            current: None,
            error: None,
        }
    }

    /// Advance to the next event
    ///
    /// Returns false when the stream is exhausted or has failed.
    pub async fn next(&mut self) -> bool {
        loop {
            let signal = match self.state {
                IteratorState::Failed | IteratorState::Exhausted => return false,
                IteratorState::Draining => match self.subscription.try_recv() {
                    Some(log) => Signal::Log(log),
                    None => Signal::Empty,
                },
                IteratorState::Active => self.wait_active().await,
            };

            if let Some(advanced) = self.apply(signal) {
                return advanced;
            }
        }
    }

    /// Advance and hand out the next event
    pub async fn next_event(&mut self) -> Option<EventRecord<E>> {
        if self.next().await {
            self.current.take()
        } else {
            None
        }
    }

    async fn wait_active(&mut self) -> Signal {
        let (logs, upstream) = self.subscription.parts();
        tokio::select! {
            log = logs.recv() => match log {
                Some(log) => Signal::Log(log),
                // the producer may have reported an error just before closing
                None => match upstream.try_take() {
                    Some(err) => Signal::Failed(err),
                    None => Signal::Completed,
                },
            },
            err = upstream.wait() => match err {
                Some(err) => Signal::Failed(err),
                None => Signal::Completed,
            },
        }
    }

    fn apply(&mut self, signal: Signal) -> Option<bool> {
        let (state, step) = self.state.on(signal);
        self.state = state;
        match step {
            Step::Decode(log) => match self.contract.unpack_log::<E>(&log) {
                Ok(record) => {
                    self.current = Some(record);
                    Some(true)
                }
                Err(err) => {
                    warn!(event = E::NAME, error = %err, "Failed to decode log");
                    self.apply(Signal::Malformed(err))
                }
            },
            Step::Fail(err) => {
                debug!(event = E::NAME, error = %err, "Event iterator failed");
                self.current = None;
                self.error = Some(err);
                Some(false)
            }
            Step::Continue => None,
            Step::Stop => Some(false),
        }
    }

    /// The event produced by the last successful `next`
    pub fn event(&self) -> Option<&EventRecord<E>> {
        self.current.as_ref()
    }

    pub fn take_event(&mut self) -> Option<EventRecord<E>> {
        self.current.take()
    }

    /// The error that stopped the iterator, if any
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn state(&self) -> IteratorState {
        self.state
    }

    /// Stop the upstream subscription
    ///
    /// Idempotent. Logs buffered before the call are still delivered.
    pub fn close(&mut self) -> Result<()> {
        self.subscription.unsubscribe();
        if self.state == IteratorState::Active {
            let (state, _) = self.state.on(Signal::Closed);
            self.state = state;
        }
        Ok(())
    }
}

impl<E: ContractEvent> fmt::Debug for EventIterator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventIterator")
            .field("event", &E::NAME)
            .field("state", &self.state)
            .field("error", &self.error)
            .finish()
    }
}
