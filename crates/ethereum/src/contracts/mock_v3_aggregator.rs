//! Bindings for the `MockV3Aggregator` contract

use crate::prelude::*;

use super::RoundData;

pub static METADATA: ContractMetadata = ContractMetadata::new(
    "MockV3Aggregator",
    include_str!("abi/MockV3Aggregator.json"),
    Some(include_str!("abi/MockV3Aggregator.bin")),
);

/// `MockV3Aggregator` bound to an address
#[derive(Debug, Clone)]
pub struct MockV3Aggregator(ContractHandle);

impl MockV3Aggregator {
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
        decimals: u8,
        initial_answer: I256,
    ) -> Result<(Address, PendingTx, Self)> {
        let args = vec![decimals.into_token(), initial_answer.into_token()];
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

    /// `decimals() view returns (uint8)`
    pub fn decimals(&self) -> ContractCall<u8> {
        self.0.call("decimals", vec![])
    }

    /// `description() pure returns (string)`
    pub fn description(&self) -> ContractCall<String> {
        self.0.call("description", vec![])
    }

    /// `getAnswer(uint256) view returns (int256)`
    pub fn get_answer(&self, arg0: U256) -> ContractCall<I256> {
        self.0.call("getAnswer", vec![arg0.into_token()])
    }

    /// `getRoundData(uint80 _roundId) view returns (uint80, int256, uint256, uint256, uint80)`
    pub fn get_round_data(&self, round_id: u128) -> ContractCall<RoundData> {
        self.0.call("getRoundData", vec![round_id.into_token()])
    }

    /// `getTimestamp(uint256) view returns (uint256)`
    pub fn get_timestamp(&self, arg0: U256) -> ContractCall<U256> {
        self.0.call("getTimestamp", vec![arg0.into_token()])
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

    /// `version() view returns (uint256)`
    pub fn version(&self) -> ContractCall<U256> {
        self.0.call("version", vec![])
    }

    /// `updateAnswer(int256 _answer)`
    pub fn update_answer(&self, answer: I256) -> ContractTransaction {
        self.0.transact("updateAnswer", vec![answer.into_token()])
    }

    /// `updateRoundData(uint80 _roundId, int256 _answer, uint256 _timestamp, uint256 _startedAt)`
    pub fn update_round_data(
        &self,
        round_id: u128,
        answer: I256,
        timestamp: U256,
        started_at: U256,
    ) -> ContractTransaction {
        self.0.transact(
            "updateRoundData",
            vec![
                round_id.into_token(),
                answer.into_token(),
                timestamp.into_token(),
                started_at.into_token(),
            ],
        )
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
