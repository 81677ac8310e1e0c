/// Typed Ethereum contract bindings
///
/// A [`BoundContract`] pairs a parsed ABI with an address and three backend
/// capabilities (read, write, logs). The per-contract bindings in
/// [`contracts`] wrap one in typed call, transaction and event methods.
pub mod backend;
pub mod contract;
pub mod contracts;
pub mod event;
pub mod options;
pub mod provider;
pub mod registry;
pub mod subscription;
pub mod watch;

#[cfg(feature = "codegen")]
pub mod codegen;

#[cfg(test)]
mod tests;

pub use backend::{ContractBackend, ContractCaller, ContractFilterer, ContractTransactor, EthersBackend};
pub use contract::{BoundContract, ContractCall, ContractHandle, ContractTransaction, PendingTx};
pub use event::{ContractEvent, EventRecord};
pub use options::{CallOpts, FilterOpts, TransactOpts, WatchOpts};
pub use provider::EthereumProvider;
pub use registry::ContractMetadata;
pub use subscription::{EventIterator, IteratorState, LogSubscription, SubscriptionFeed, UnsubscribeCounter};
pub use watch::WatchSubscription;

/// Everything a binding module needs in scope
pub mod prelude {
    pub use std::sync::Arc;

    pub use ethers::abi::{Token, Tokenizable};
    pub use ethers::types::{Address, Bytes, Log, H256, I256, U256};
    pub use tokio::sync::mpsc;

    pub use bindings_core::Result;

    pub use crate::backend::ContractBackend;
    pub use crate::contract::{ContractCall, ContractHandle, ContractTransaction, PendingTx};
    pub use crate::event::{detokenize, topics, ContractEvent, EventRecord};
    pub use crate::options::{CallOpts, FilterOpts, TransactOpts, WatchOpts};
    pub use crate::registry::ContractMetadata;
    pub use crate::subscription::EventIterator;
    pub use crate::watch::WatchSubscription;
}
