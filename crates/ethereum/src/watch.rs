//! Push-style event delivery into a caller-owned channel

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use bindings_core::{Error, Result};

use crate::contract::BoundContract;
use crate::event::{ContractEvent, EventRecord};
use crate::subscription::LogSubscription;

/// Handle to a running event watch
///
/// Dropping the handle stops the watch. Use [`wait`](WatchSubscription::wait)
/// to learn why it ended.
#[derive(Debug)]
pub struct WatchSubscription {
    quit: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<()>>>,
}

impl WatchSubscription {
    /// Start forwarding decoded events from `subscription` into `sink`
    pub fn spawn<E: ContractEvent>(
        contract: Arc<BoundContract>,
        mut subscription: LogSubscription,
        sink: mpsc::Sender<EventRecord<E>>,
    ) -> Self {
        let (quit_tx, mut quit_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let result = forward(&contract, &mut subscription, &sink, &mut quit_rx).await;
            subscription.unsubscribe();

            match &result {
                Ok(()) => debug!(event = E::NAME, "Event watch stopped"),
                Err(e) => warn!(event = E::NAME, error = %e, "Event watch terminated"),
            }
            result
        });

        Self {
            quit: Some(quit_tx),
            task: Some(task),
        }
    }

    /// Ask the watch to stop; only the first call has any effect
    pub fn unsubscribe(&mut self) {
        if let Some(quit) = self.quit.take() {
            let _ = quit.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    /// Wait for the watch to end
    ///
    /// Returns the decode or upstream error that terminated it; a watch ended
    /// by unsubscribing, a closed sink or upstream completion returns `Ok`.
    pub async fn wait(mut self) -> Result<()> {
        let Some(task) = self.task.take() else {
            return Ok(());
        };
        task.await
            .map_err(|e| Error::subscription(format!("Event watch task failed: {}", e)))?
    }
}

impl Drop for WatchSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

async fn forward<E: ContractEvent>(
    contract: &BoundContract,
    subscription: &mut LogSubscription,
    sink: &mpsc::Sender<EventRecord<E>>,
    quit: &mut oneshot::Receiver<()>,
) -> Result<()> {
    loop {
        let (logs, upstream) = subscription.parts();
        let log = tokio::select! {
            log = logs.recv() => match log {
                Some(log) => log,
                None => return upstream.try_take().map_or(Ok(()), Err),
            },
            err = upstream.wait() => match err {
                Some(err) => return Err(err),
                // completed; buffered logs are still forwarded until the channel closes
                None => continue,
            },
            _ = &mut *quit => return Ok(()),
        };

        let record = contract.unpack_log::<E>(&log)?;

        let send = sink.send(record);
        tokio::pin!(send);
        loop {
            tokio::select! {
                sent = &mut send => {
                    if sent.is_err() {
                        debug!(event = E::NAME, "Event sink closed");
                        return Ok(());
                    }
                    break;
                }
                err = upstream.wait() => {
                    if let Some(err) = err {
                        return Err(err);
                    }
                }
                _ = &mut *quit => return Ok(()),
            }
        }
    }
}
