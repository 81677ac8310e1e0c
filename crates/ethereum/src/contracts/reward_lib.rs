//! Bindings for the `RewardLib` contract

use crate::prelude::*;

pub static METADATA: ContractMetadata = ContractMetadata::new(
    "RewardLib",
    include_str!("abi/RewardLib.json"),
    Some(include_str!("abi/RewardLib.bin")),
);

/// `RewardLib` bound to an address
#[derive(Debug, Clone)]
pub struct RewardLib(ContractHandle);

impl RewardLib {
    /// Bind to a deployed instance
    pub fn new<B: ContractBackend + 'static>(address: Address, backend: Arc<B>) -> Result<Self> {
        ContractHandle::bind(address, &METADATA, backend).map(Self)
    }

    pub fn from_handle(handle: ContractHandle) -> Self {
        Self(handle)
    }

    /// Deploy a new instance
    pub async fn deploy<B: ContractBackend + 'static>(
        opts: &TransactOpts,
        backend: Arc<B>,
    ) -> Result<(Address, PendingTx, Self)> {
        let args = Vec::new();
        let (address, pending, handle) =
            ContractHandle::deploy(&METADATA, opts, backend, args).await?;
        Ok((address, pending, Self(handle)))
    }

    pub fn address(&self) -> Address {
        self.0.address()
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.0
    }

    /// Same contract with fixed call and transaction options
    pub fn session(&self, call_opts: CallOpts, transact_opts: TransactOpts) -> Self {
        Self(self.0.with_call_opts(call_opts).with_transact_opts(transact_opts))
    }

    pub fn caller_session(&self, call_opts: CallOpts) -> Self {
        Self(self.0.with_call_opts(call_opts))
    }

    pub fn transactor_session(&self, transact_opts: TransactOpts) -> Self {
        Self(self.0.with_transact_opts(transact_opts))
    }

    pub async fn filter_reward_added(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<RewardAdded>> {
        self.0.filter(opts, vec![]).await
    }

    pub async fn watch_reward_added(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<RewardAdded>>,
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![]).await
    }

    pub fn parse_reward_added(&self, log: &Log) -> Result<EventRecord<RewardAdded>> {
        self.0.parse(log)
    }

    pub async fn filter_reward_initialized(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<RewardInitialized>> {
        self.0.filter(opts, vec![]).await
    }

    pub async fn watch_reward_initialized(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<RewardInitialized>>,
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![]).await
    }

    pub fn parse_reward_initialized(&self, log: &Log) -> Result<EventRecord<RewardInitialized>> {
        self.0.parse(log)
    }

    pub async fn filter_reward_rate_changed(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<RewardRateChanged>> {
        self.0.filter(opts, vec![]).await
    }

    pub async fn watch_reward_rate_changed(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<RewardRateChanged>>,
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![]).await
    }

    pub fn parse_reward_rate_changed(&self, log: &Log) -> Result<EventRecord<RewardRateChanged>> {
        self.0.parse(log)
    }

    pub async fn filter_reward_slashed(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<RewardSlashed>> {
        self.0.filter(opts, vec![]).await
    }

    pub async fn watch_reward_slashed(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<RewardSlashed>>,
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![]).await
    }

    pub fn parse_reward_slashed(&self, log: &Log) -> Result<EventRecord<RewardSlashed>> {
        self.0.parse(log)
    }

    pub async fn filter_reward_withdrawn(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<RewardWithdrawn>> {
        self.0.filter(opts, vec![]).await
    }

    pub async fn watch_reward_withdrawn(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<RewardWithdrawn>>,
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![]).await
    }

    pub fn parse_reward_withdrawn(&self, log: &Log) -> Result<EventRecord<RewardWithdrawn>> {
        self.0.parse(log)
    }
}

/// `RewardAdded(uint256 amountAdded)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardAdded {
    pub amount_added: U256,
}

impl ContractEvent for RewardAdded {
    const NAME: &'static str = "RewardAdded";
    const SIGNATURE: &'static str = "RewardAdded(uint256)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        Ok(Self {
            amount_added: detokenize(tokens)?,
        })
    }
}

/// `RewardInitialized(uint256 rate, uint256 available, uint256 startTimestamp, uint256 endTimestamp)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardInitialized {
    pub rate: U256,
    pub available: U256,
    pub start_timestamp: U256,
    pub end_timestamp: U256,
}

impl ContractEvent for RewardInitialized {
    const NAME: &'static str = "RewardInitialized";
    const SIGNATURE: &'static str = "RewardInitialized(uint256,uint256,uint256,uint256)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (rate, available, start_timestamp, end_timestamp) = detokenize(tokens)?;
        Ok(Self {
            rate,
            available,
            start_timestamp,
            end_timestamp,
        })
    }
}

/// `RewardRateChanged(uint256 rate)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardRateChanged {
    pub rate: U256,
}

impl ContractEvent for RewardRateChanged {
    const NAME: &'static str = "RewardRateChanged";
    const SIGNATURE: &'static str = "RewardRateChanged(uint256)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        Ok(Self {
            rate: detokenize(tokens)?,
        })
    }
}

/// `RewardSlashed(address[] operator, uint256[] slashedBaseRewards, uint256[] slashedDelegatedRewards)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardSlashed {
    pub operator: Vec<Address>,
    pub slashed_base_rewards: Vec<U256>,
    pub slashed_delegated_rewards: Vec<U256>,
}

impl ContractEvent for RewardSlashed {
    const NAME: &'static str = "RewardSlashed";
    const SIGNATURE: &'static str = "RewardSlashed(address[],uint256[],uint256[])";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (operator, slashed_base_rewards, slashed_delegated_rewards) = detokenize(tokens)?;
        Ok(Self {
            operator,
            slashed_base_rewards,
            slashed_delegated_rewards,
        })
    }
}

/// `RewardWithdrawn(uint256 amount)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardWithdrawn {
    pub amount: U256,
}

impl ContractEvent for RewardWithdrawn {
    const NAME: &'static str = "RewardWithdrawn";
    const SIGNATURE: &'static str = "RewardWithdrawn(uint256)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        Ok(Self {
            amount: detokenize(tokens)?,
        })
    }
}
