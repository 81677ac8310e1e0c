//! Node connection used by the CLI and applications

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::providers::{Http, Provider, Ws};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, BlockId, Bytes, Filter, Log, TransactionReceipt, TxHash, U256};
use tracing::{debug, info};

use bindings_core::{Error, ProviderConfig, Result};

use crate::backend::{ContractCaller, ContractFilterer, ContractTransactor, EthersBackend};
use crate::subscription::LogSubscription;

/// Backend over an HTTP or WebSocket node connection
#[derive(Debug, Clone)]
pub enum EthereumProvider {
    /// HTTP provider
    Http(EthersBackend<Provider<Http>>),

    /// WebSocket provider
    Websocket(EthersBackend<Provider<Ws>>),
}

impl EthereumProvider {
    /// Connect to the node described by `config`
    ///
    /// When the config pins a chain id, the node must report the same one.
    pub async fn new(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;
        let interval = Duration::from_millis(config.poll_interval_ms);

        let provider = if config.use_websocket {
            let ws_provider = Provider::<Ws>::connect(&config.rpc_url)
                .await
                .map_err(|e| {
                    Error::transport(format!(
                        "Failed to connect to Ethereum node via WebSocket: {}",
                        e
                    ))
                })?
                .interval(interval);

            Self::Websocket(EthersBackend::new(Arc::new(ws_provider)))
        } else {
            let http_provider = Provider::<Http>::try_from(config.rpc_url.as_str())
                .map_err(|e| {
                    Error::transport(format!("Failed to create Ethereum HTTP provider: {}", e))
                })?
                .interval(interval);

            Self::Http(EthersBackend::new(Arc::new(http_provider)))
        };

        let chain_id = provider.chain_id().await?;
        if let Some(expected) = config.chain_id {
            if chain_id != expected {
                return Err(Error::config(format!(
                    "Node reports chain id {} but {} was configured",
                    chain_id, expected
                )));
            }
        }

        info!(rpc_url = %config.rpc_url, chain_id, "Connected to Ethereum node");
        Ok(provider)
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let chain_id = match self {
            Self::Http(backend) => backend.client().get_chainid().await,
            Self::Websocket(backend) => backend.client().get_chainid().await,
        }
        .map_err(|e| Error::transport(format!("Failed to get chain id: {}", e)))?;
        Ok(chain_id.as_u64())
    }

    pub async fn block_number(&self) -> Result<u64> {
        let number = match self {
            Self::Http(backend) => backend.client().get_block_number().await,
            Self::Websocket(backend) => backend.client().get_block_number().await,
        }
        .map_err(|e| Error::transport(format!("Failed to get block number: {}", e)))?;
        debug!(block_number = number.as_u64(), "Fetched latest block number");
        Ok(number.as_u64())
    }
}

#[async_trait]
impl ContractCaller for EthereumProvider {
    async fn code_at(&self, contract: Address, block: Option<BlockId>) -> Result<Bytes> {
        match self {
            Self::Http(backend) => backend.code_at(contract, block).await,
            Self::Websocket(backend) => backend.code_at(contract, block).await,
        }
    }

    async fn call_contract(
        &self,
        call: &TypedTransaction,
        block: Option<BlockId>,
    ) -> Result<Bytes> {
        match self {
            Self::Http(backend) => backend.call_contract(call, block).await,
            Self::Websocket(backend) => backend.call_contract(call, block).await,
        }
    }
}

#[async_trait]
impl ContractTransactor for EthereumProvider {
    async fn pending_nonce_at(&self, account: Address) -> Result<U256> {
        match self {
            Self::Http(backend) => backend.pending_nonce_at(account).await,
            Self::Websocket(backend) => backend.pending_nonce_at(account).await,
        }
    }

    async fn send_transaction(&self, tx: TypedTransaction) -> Result<TxHash> {
        match self {
            Self::Http(backend) => backend.send_transaction(tx).await,
            Self::Websocket(backend) => backend.send_transaction(tx).await,
        }
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        match self {
            Self::Http(backend) => backend.transaction_receipt(hash).await,
            Self::Websocket(backend) => backend.transaction_receipt(hash).await,
        }
    }
}

#[async_trait]
impl ContractFilterer for EthereumProvider {
    async fn filter_logs(&self, filter: &Filter) -> Result<Vec<Log>> {
        match self {
            Self::Http(backend) => backend.filter_logs(filter).await,
            Self::Websocket(backend) => backend.filter_logs(filter).await,
        }
    }

    async fn subscribe_filter_logs(&self, filter: &Filter) -> Result<LogSubscription> {
        match self {
            Self::Http(backend) => backend.subscribe_filter_logs(filter).await,
            Self::Websocket(backend) => backend.subscribe_filter_logs(filter).await,
        }
    }
}
