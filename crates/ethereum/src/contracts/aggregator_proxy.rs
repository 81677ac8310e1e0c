//! Bindings for the `AggregatorProxy` contract

use crate::prelude::*;

use super::RoundData;

pub static METADATA: ContractMetadata = ContractMetadata::new(
    "AggregatorProxy",
    include_str!("abi/AggregatorProxy.json"),
    Some(include_str!("abi/AggregatorProxy.bin")),
);

/// `AggregatorProxy` bound to an address
#[derive(Debug, Clone)]
pub struct AggregatorProxy(ContractHandle);

impl AggregatorProxy {
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
        aggregator: Address,
    ) -> Result<(Address, PendingTx, Self)> {
        let args = vec![aggregator.into_token()];
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

    /// `aggregator() view returns (address)`
    pub fn aggregator(&self) -> ContractCall<Address> {
        self.0.call("aggregator", vec![])
    }

    /// `decimals() view returns (uint8)`
    pub fn decimals(&self) -> ContractCall<u8> {
        self.0.call("decimals", vec![])
    }

    /// `description() view returns (string)`
    pub fn description(&self) -> ContractCall<String> {
        self.0.call("description", vec![])
    }

    /// `getAnswer(uint256 _roundId) view returns (int256)`
    pub fn get_answer(&self, round_id: U256) -> ContractCall<I256> {
        self.0.call("getAnswer", vec![round_id.into_token()])
    }

    /// `getRoundData(uint80 _roundId) view returns (uint80, int256, uint256, uint256, uint80)`
    pub fn get_round_data(&self, round_id: u128) -> ContractCall<RoundData> {
        self.0.call("getRoundData", vec![round_id.into_token()])
    }

    /// `getTimestamp(uint256 _roundId) view returns (uint256)`
    pub fn get_timestamp(&self, round_id: U256) -> ContractCall<U256> {
        self.0.call("getTimestamp", vec![round_id.into_token()])
    }

    /// `latestAnswer() view returns (int256)`
    pub fn latest_answer(&self) -> ContractCall<I256> {
        self.0.call("latestAnswer", vec![])
    }

    /// `latestRound() view returns (uint256)`
    pub fn latest_round(&self) -> ContractCall<U256> {
        self.0.call("latestRound", vec![])
    }

    /// `latestRoundData() view returns (uint80, int256, uint256, uint256, uint80)`
    pub fn latest_round_data(&self) -> ContractCall<RoundData> {
        self.0.call("latestRoundData", vec![])
    }

    /// `latestTimestamp() view returns (uint256)`
    pub fn latest_timestamp(&self) -> ContractCall<U256> {
        self.0.call("latestTimestamp", vec![])
    }

    /// `owner() view returns (address)`
    pub fn owner(&self) -> ContractCall<Address> {
        self.0.call("owner", vec![])
    }

    /// `phaseAggregators(uint16) view returns (address)`
    pub fn phase_aggregators(&self, arg0: u16) -> ContractCall<Address> {
        self.0.call("phaseAggregators", vec![arg0.into_token()])
    }

    /// `phaseId() view returns (uint16)`
    pub fn phase_id(&self) -> ContractCall<u16> {
        self.0.call("phaseId", vec![])
    }

    /// `proposedAggregator() view returns (address)`
    pub fn proposed_aggregator(&self) -> ContractCall<Address> {
        self.0.call("proposedAggregator", vec![])
    }

    /// `proposedGetRoundData(uint80 _roundId) view returns (uint80, int256, uint256, uint256, uint80)`
    pub fn proposed_get_round_data(&self, round_id: u128) -> ContractCall<RoundData> {
        self.0.call("proposedGetRoundData", vec![round_id.into_token()])
    }

    /// `proposedLatestRoundData() view returns (uint80, int256, uint256, uint256, uint80)`
    pub fn proposed_latest_round_data(&self) -> ContractCall<RoundData> {
        self.0.call("proposedLatestRoundData", vec![])
    }

    /// `version() view returns (uint256)`
    pub fn version(&self) -> ContractCall<U256> {
        self.0.call("version", vec![])
    }

    /// `acceptOwnership()`
    pub fn accept_ownership(&self) -> ContractTransaction {
        self.0.transact("acceptOwnership", vec![])
    }

    /// `confirmAggregator(address _aggregator)`
    pub fn confirm_aggregator(&self, aggregator: Address) -> ContractTransaction {
        self.0.transact("confirmAggregator", vec![aggregator.into_token()])
    }

    /// `proposeAggregator(address _aggregator)`
    pub fn propose_aggregator(&self, aggregator: Address) -> ContractTransaction {
        self.0.transact("proposeAggregator", vec![aggregator.into_token()])
    }

    /// `transferOwnership(address _to)`
    pub fn transfer_ownership(&self, to: Address) -> ContractTransaction {
        self.0.transact("transferOwnership", vec![to.into_token()])
    }

    pub async fn filter_answer_updated(
        &self,
        opts: &FilterOpts,
        current: &[I256],
        round_id: &[U256],
    ) -> Result<EventIterator<AnswerUpdated>> {
        self.0.filter(opts, vec![topics(current), topics(round_id)]).await
    }

    pub async fn watch_answer_updated(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<AnswerUpdated>>,
        current: &[I256],
        round_id: &[U256],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(current), topics(round_id)]).await
    }

    pub fn parse_answer_updated(&self, log: &Log) -> Result<EventRecord<AnswerUpdated>> {
        self.0.parse(log)
    }

    pub async fn filter_new_round(
        &self,
        opts: &FilterOpts,
        round_id: &[U256],
        started_by: &[Address],
    ) -> Result<EventIterator<NewRound>> {
        self.0.filter(opts, vec![topics(round_id), topics(started_by)]).await
    }

    pub async fn watch_new_round(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<NewRound>>,
        round_id: &[U256],
        started_by: &[Address],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(round_id), topics(started_by)]).await
    }

    pub fn parse_new_round(&self, log: &Log) -> Result<EventRecord<NewRound>> {
        self.0.parse(log)
    }

    pub async fn filter_ownership_transfer_requested(
        &self,
        opts: &FilterOpts,
        from: &[Address],
        to: &[Address],
    ) -> Result<EventIterator<OwnershipTransferRequested>> {
        self.0.filter(opts, vec![topics(from), topics(to)]).await
    }

    pub async fn watch_ownership_transfer_requested(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<OwnershipTransferRequested>>,
        from: &[Address],
        to: &[Address],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(from), topics(to)]).await
    }

    pub fn parse_ownership_transfer_requested(
        &self,
        log: &Log,
    ) -> Result<EventRecord<OwnershipTransferRequested>> {
        self.0.parse(log)
    }

    pub async fn filter_ownership_transferred(
        &self,
        opts: &FilterOpts,
        from: &[Address],
        to: &[Address],
    ) -> Result<EventIterator<OwnershipTransferred>> {
        self.0.filter(opts, vec![topics(from), topics(to)]).await
    }

    pub async fn watch_ownership_transferred(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<OwnershipTransferred>>,
        from: &[Address],
        to: &[Address],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(from), topics(to)]).await
    }

    pub fn parse_ownership_transferred(
        &self,
        log: &Log,
    ) -> Result<EventRecord<OwnershipTransferred>> {
        self.0.parse(log)
    }
}

/// `AnswerUpdated(int256 indexed current, uint256 indexed roundId, uint256 updatedAt)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerUpdated {
    pub current: I256,
    pub round_id: U256,
    pub updated_at: U256,
}

impl ContractEvent for AnswerUpdated {
    const NAME: &'static str = "AnswerUpdated";
    const SIGNATURE: &'static str = "AnswerUpdated(int256,uint256,uint256)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (current, round_id, updated_at) = detokenize(tokens)?;
        Ok(Self {
            current,
            round_id,
            updated_at,
        })
    }
}

/// `NewRound(uint256 indexed roundId, address indexed startedBy, uint256 startedAt)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRound {
    pub round_id: U256,
    pub started_by: Address,
    pub started_at: U256,
}

impl ContractEvent for NewRound {
    const NAME: &'static str = "NewRound";
    const SIGNATURE: &'static str = "NewRound(uint256,address,uint256)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (round_id, started_by, started_at) = detokenize(tokens)?;
        Ok(Self {
            round_id,
            started_by,
            started_at,
        })
    }
}

/// `OwnershipTransferRequested(address indexed from, address indexed to)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipTransferRequested {
    pub from: Address,
    pub to: Address,
}

impl ContractEvent for OwnershipTransferRequested {
    const NAME: &'static str = "OwnershipTransferRequested";
    const SIGNATURE: &'static str = "OwnershipTransferRequested(address,address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (from, to) = detokenize(tokens)?;
        Ok(Self {
            from,
            to,
        })
    }
}

/// `OwnershipTransferred(address indexed from, address indexed to)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipTransferred {
    pub from: Address,
    pub to: Address,
}

impl ContractEvent for OwnershipTransferred {
    const NAME: &'static str = "OwnershipTransferred";
    const SIGNATURE: &'static str = "OwnershipTransferred(address,address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (from, to) = detokenize(tokens)?;
        Ok(Self {
            from,
            to,
        })
    }
}
