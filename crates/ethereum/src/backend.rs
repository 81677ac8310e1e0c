//! Chain access capabilities used by bound contracts

use std::sync::Arc;

use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{
    Address, BlockId, BlockNumber, Bytes, Filter, Log, TransactionReceipt, TxHash, U256,
};
use futures::StreamExt;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use bindings_core::{Error, Result};

use crate::subscription::{LogSubscription, SubscriptionFeed, LOG_BUFFER};

/// Read-only chain access
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Deployed code at `contract`; empty when there is none
    async fn code_at(&self, contract: Address, block: Option<BlockId>) -> Result<Bytes>;

    /// Execute a message call without creating a transaction
    async fn call_contract(&self, call: &TypedTransaction, block: Option<BlockId>)
        -> Result<Bytes>;
}

/// Transaction submission
#[async_trait]
pub trait ContractTransactor: Send + Sync {
    async fn pending_nonce_at(&self, account: Address) -> Result<U256>;

    /// Submit a transaction, returning its hash once the node accepted it
    async fn send_transaction(&self, tx: TypedTransaction) -> Result<TxHash>;

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>>;
}

/// Log retrieval and subscription
#[async_trait]
pub trait ContractFilterer: Send + Sync {
    async fn filter_logs(&self, filter: &Filter) -> Result<Vec<Log>>;

    async fn subscribe_filter_logs(&self, filter: &Filter) -> Result<LogSubscription>;
}

/// A backend offering all three capabilities
pub trait ContractBackend: ContractCaller + ContractTransactor + ContractFilterer {}

impl<T> ContractBackend for T where T: ContractCaller + ContractTransactor + ContractFilterer {}

/// Backend over any ethers middleware stack
#[derive(Debug)]
pub struct EthersBackend<M> {
    client: Arc<M>,
}

impl<M> Clone for EthersBackend<M> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<M: Middleware + 'static> EthersBackend<M> {
    pub fn new(client: Arc<M>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<M> {
        &self.client
    }
}

fn rpc_error<E: std::fmt::Display>(err: E) -> Error {
    Error::from_rpc(err.to_string())
}

#[async_trait]
impl<M: Middleware + 'static> ContractCaller for EthersBackend<M> {
    async fn code_at(&self, contract: Address, block: Option<BlockId>) -> Result<Bytes> {
        self.client.get_code(contract, block).await.map_err(rpc_error)
    }

    async fn call_contract(
        &self,
        call: &TypedTransaction,
        block: Option<BlockId>,
    ) -> Result<Bytes> {
        self.client.call(call, block).await.map_err(rpc_error)
    }
}

#[async_trait]
impl<M: Middleware + 'static> ContractTransactor for EthersBackend<M> {
    async fn pending_nonce_at(&self, account: Address) -> Result<U256> {
        self.client
            .get_transaction_count(account, Some(BlockId::Number(BlockNumber::Pending)))
            .await
            .map_err(rpc_error)
    }

    async fn send_transaction(&self, tx: TypedTransaction) -> Result<TxHash> {
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(rpc_error)?;
        let hash = pending.tx_hash();
        debug!(tx_hash = ?hash, "Transaction submitted");
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        self.client
            .get_transaction_receipt(hash)
            .await
            .map_err(rpc_error)
    }
}

#[async_trait]
impl<M: Middleware + 'static> ContractFilterer for EthersBackend<M> {
    async fn filter_logs(&self, filter: &Filter) -> Result<Vec<Log>> {
        self.client.get_logs(filter).await.map_err(rpc_error)
    }

    async fn subscribe_filter_logs(&self, filter: &Filter) -> Result<LogSubscription> {
        let (subscription, feed) = LogSubscription::channel(LOG_BUFFER);
        let (ready_tx, ready_rx) = oneshot::channel();

        tokio::spawn(pump_logs(
            self.client.clone(),
            filter.clone(),
            feed,
            ready_tx,
        ));

        ready_rx
            .await
            .map_err(|_| Error::subscription("Log watcher exited before installing its filter"))??;
        Ok(subscription)
    }
}

/// Poll an installed log filter and push every log into the feed
async fn pump_logs<M: Middleware + 'static>(
    client: Arc<M>,
    filter: Filter,
    mut feed: SubscriptionFeed,
    ready: oneshot::Sender<Result<()>>,
) {
    let watcher = match client.watch(&filter).await {
        Ok(watcher) => {
            let _ = ready.send(Ok(()));
            watcher
        }
        Err(e) => {
            let _ = ready.send(Err(rpc_error(e)));
            return;
        }
    };
    let filter_id = watcher.id;
    let mut stream = Box::pin(watcher);

    loop {
        let next = tokio::select! {
            _ = feed.closed() => None,
            log = stream.next() => Some(log),
        };

        match next {
            None => {
                debug!("Log watcher stopped by subscriber");
                uninstall(client.as_ref(), filter_id).await;
                return;
            }
            Some(Some(log)) => {
                if !feed.send(log).await {
                    uninstall(client.as_ref(), filter_id).await;
                    return;
                }
            }
            Some(None) => {
                warn!("Log filter stream ended");
                feed.fail(Error::subscription("Log filter stream ended unexpectedly"));
                return;
            }
        }
    }
}

/// Remove the node-side filter; a failure only leaves it to expire
async fn uninstall<M: Middleware>(client: &M, filter_id: U256) {
    match client.uninstall_filter(filter_id).await {
        Ok(removed) => debug!(filter = ?filter_id, removed, "Uninstalled log filter"),
        Err(e) => warn!(filter = ?filter_id, error = %e, "Failed to uninstall log filter"),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ethers::providers::Provider;

    use super::*;

    #[tokio::test]
    async fn test_unsubscribe_uninstalls_the_filter() {
        let (provider, mock) = Provider::mocked();
        // no poll fires before the subscriber leaves
        let provider = provider.interval(Duration::from_secs(600));

        // the mock answers last-pushed first
        mock.push::<bool, _>(true).unwrap();
        mock.push::<U256, _>(U256::from(7)).unwrap();

        let filter = Filter::new().address(Address::repeat_byte(0x42));
        let backend = EthersBackend::new(Arc::new(provider));
        let mut subscription = backend.subscribe_filter_logs(&filter).await.unwrap();

        subscription.unsubscribe();
        // the pump drops its feed once the filter is gone
        assert!(subscription.next_log().await.unwrap().is_none());

        mock.assert_request("eth_newFilter", [&filter]).unwrap();
        mock.assert_request("eth_uninstallFilter", [U256::from(7)]).unwrap();
    }
}
