//! Contract instances bound to an address and a chain backend

use std::fmt;
use std::future::{Future, IntoFuture};
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use ethers::abi::{Abi, Detokenize, Event as AbiEvent, Function, RawLog, Token};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{
    Address, BlockNumber, Bytes, Filter, Log, TransactionReceipt, TransactionRequest, TxHash,
    ValueOrArray, H256, U256,
};
use ethers::utils::{get_contract_address, keccak256};
use tokio::sync::mpsc;
use tracing::{debug, info};

use bindings_core::{Error, Result};

use crate::backend::{ContractBackend, ContractCaller, ContractFilterer, ContractTransactor};
use crate::event::{detokenize, ContractEvent, EventRecord};
use crate::options::{CallOpts, FilterOpts, TransactOpts, WatchOpts};
use crate::registry::ContractMetadata;
use crate::subscription::{EventIterator, LogSubscription};
use crate::watch::WatchSubscription;

/// Indexed topic positions available after the event signature
const MAX_INDEXED_TOPICS: usize = 3;

/// A contract ABI bound to an address, with separate read, write and log backends
pub struct BoundContract {
    address: Address,
    abi: Arc<Abi>,
    caller: Arc<dyn ContractCaller>,
    transactor: Arc<dyn ContractTransactor>,
    filterer: Arc<dyn ContractFilterer>,
}

impl BoundContract {
    pub fn new(
        address: Address,
        abi: Arc<Abi>,
        caller: Arc<dyn ContractCaller>,
        transactor: Arc<dyn ContractTransactor>,
        filterer: Arc<dyn ContractFilterer>,
    ) -> Self {
        Self {
            address,
            abi,
            caller,
            transactor,
            filterer,
        }
    }

    /// Parse `abi_json` and bind it to `address`
    pub fn bind(
        address: Address,
        abi_json: &str,
        caller: Arc<dyn ContractCaller>,
        transactor: Arc<dyn ContractTransactor>,
        filterer: Arc<dyn ContractFilterer>,
    ) -> Result<Self> {
        let abi: Abi = serde_json::from_str(abi_json)?;
        Ok(Self::new(address, Arc::new(abi), caller, transactor, filterer))
    }

    /// Bind using one backend for every capability
    pub fn with_backend<B: ContractBackend + 'static>(
        address: Address,
        abi: Arc<Abi>,
        backend: Arc<B>,
    ) -> Self {
        Self::new(address, abi, backend.clone(), backend.clone(), backend)
    }

    /// Deploy `bytecode` with constructor `args`
    ///
    /// The contract address is derived from the sender and the nonce used, so
    /// `opts.from` is required.
    pub async fn deploy<B: ContractBackend + 'static>(
        opts: &TransactOpts,
        abi: Arc<Abi>,
        bytecode: Bytes,
        backend: Arc<B>,
        args: Vec<Token>,
    ) -> Result<(Address, PendingTx, Arc<BoundContract>)> {
        let from = opts
            .from
            .ok_or_else(|| Error::config("Deployment requires a sender address"))?;

        let code = match abi.constructor() {
            Some(constructor) => constructor
                .encode_input(bytecode.to_vec(), &args)
                .map_err(|e| Error::abi(format!("Failed to encode constructor arguments: {}", e)))?,
            None if args.is_empty() => bytecode.to_vec(),
            None => {
                return Err(Error::abi(format!(
                    "Constructor takes no arguments but {} were given",
                    args.len()
                )))
            }
        };

        let nonce = match opts.nonce {
            Some(nonce) => nonce,
            None => backend.pending_nonce_at(from).await?,
        };
        let opts = opts.clone().nonce(nonce);

        let address = get_contract_address(from, nonce);
        let contract = Arc::new(Self::with_backend(address, abi, backend));
        let pending = contract.send(&opts, None, code.into()).await?;

        info!(address = ?address, tx_hash = ?pending.hash(), "Contract deployment submitted");
        Ok((address, pending, contract))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn abi(&self) -> &Abi {
        &self.abi
    }

    pub fn caller(&self) -> &Arc<dyn ContractCaller> {
        &self.caller
    }

    pub fn transactor(&self) -> &Arc<dyn ContractTransactor> {
        &self.transactor
    }

    pub fn filterer(&self) -> &Arc<dyn ContractFilterer> {
        &self.filterer
    }

    /// Look up a method by name, or by full signature for overloads
    fn function(&self, method: &str) -> Result<&Function> {
        let found = if method.contains('(') {
            let selector = keccak256(method.as_bytes());
            self.abi
                .functions()
                .find(|function| function.short_signature()[..] == selector[..4])
        } else {
            self.abi.function(method).ok()
        };
        found.ok_or_else(|| Error::abi(format!("Method '{}' not found in ABI", method)))
    }

    /// Look up an event by its canonical signature
    fn event(&self, signature: &str) -> Result<&AbiEvent> {
        let topic = H256::from(keccak256(signature.as_bytes()));
        self.abi
            .events()
            .find(|event| event.signature() == topic)
            .ok_or_else(|| Error::abi(format!("Event '{}' not found in ABI", signature)))
    }

    /// ABI-encoded calldata for `method`
    pub fn encode_call(&self, method: &str, args: &[Token]) -> Result<Bytes> {
        let function = self.function(method)?;
        let data = function
            .encode_input(args)
            .map_err(|e| Error::abi(format!("Failed to encode arguments for '{}': {}", method, e)))?;
        Ok(data.into())
    }

    /// Invoke a constant method and return its decoded outputs
    pub async fn call(&self, opts: &CallOpts, method: &str, args: Vec<Token>) -> Result<Vec<Token>> {
        let function = self.function(method)?;
        let data = self.encode_call(method, &args)?;
        let output = self.call_raw(opts, data).await?;
        function
            .decode_output(&output)
            .map_err(|e| Error::decode(format!("Failed to decode output of '{}': {}", method, e)))
    }

    /// Invoke a constant method and decode its outputs into `D`
    pub async fn call_typed<D: Detokenize>(
        &self,
        opts: &CallOpts,
        method: &str,
        args: Vec<Token>,
    ) -> Result<D> {
        let tokens = self.call(opts, method, args).await?;
        detokenize(tokens)
    }

    /// Run a message call with raw calldata
    ///
    /// Empty return data from an address without code is reported as
    /// [`Error::NoCode`].
    pub async fn call_raw(&self, opts: &CallOpts, data: Bytes) -> Result<Bytes> {
        let mut request = TransactionRequest::new().to(self.address).data(data);
        if let Some(from) = opts.from {
            request = request.from(from);
        }
        let tx: TypedTransaction = request.into();
        let block = opts.block_id();

        let output = self.caller.call_contract(&tx, block).await?;
        if output.is_empty() {
            let code = self.caller.code_at(self.address, block).await?;
            if code.is_empty() {
                return Err(Error::NoCode);
            }
        }
        Ok(output)
    }

    /// Invoke a state-changing method
    pub async fn transact(
        &self,
        opts: &TransactOpts,
        method: &str,
        args: Vec<Token>,
    ) -> Result<PendingTx> {
        let data = self.encode_call(method, &args)?;
        self.send(opts, Some(self.address), data).await
    }

    /// Send a transaction with raw calldata
    pub async fn transact_raw(&self, opts: &TransactOpts, data: Bytes) -> Result<PendingTx> {
        self.send(opts, Some(self.address), data).await
    }

    /// Send a plain value transfer, triggering the fallback or receive function
    pub async fn transfer(&self, opts: &TransactOpts) -> Result<PendingTx> {
        self.send(opts, Some(self.address), Bytes::new()).await
    }

    async fn send(&self, opts: &TransactOpts, to: Option<Address>, data: Bytes) -> Result<PendingTx> {
        let mut request = TransactionRequest::new()
            .data(data)
            .value(opts.value.unwrap_or_default());
        if let Some(to) = to {
            request = request.to(to);
        }
        if let Some(from) = opts.from {
            request = request.from(from);
        }

        let nonce = match (opts.nonce, opts.from) {
            (Some(nonce), _) => Some(nonce),
            (None, Some(from)) => Some(self.transactor.pending_nonce_at(from).await?),
            (None, None) => None,
        };
        if let Some(nonce) = nonce {
            request = request.nonce(nonce);
        }
        // unset gas fields are filled by the backend
        if let Some(gas_price) = opts.gas_price {
            request = request.gas_price(gas_price);
        }
        if let Some(gas_limit) = opts.gas_limit {
            request = request.gas(gas_limit);
        }

        let tx: TypedTransaction = request.into();
        let hash = self.transactor.send_transaction(tx.clone()).await?;
        debug!(contract = ?self.address, tx_hash = ?hash, "Transaction sent");

        Ok(PendingTx::new(hash, tx, self.transactor.clone()))
    }

    fn log_filter(&self, event: &AbiEvent, topics: Vec<Vec<H256>>) -> Result<Filter> {
        if topics.len() > MAX_INDEXED_TOPICS {
            return Err(Error::abi(format!(
                "Event '{}' filter has {} indexed positions, at most {} are allowed",
                event.name,
                topics.len(),
                MAX_INDEXED_TOPICS
            )));
        }

        let mut filter = Filter::new().address(self.address);
        filter.topics[0] = Some(ValueOrArray::Value(Some(event.signature())));
        for (position, set) in topics.into_iter().enumerate() {
            if !set.is_empty() {
                filter.topics[position + 1] =
                    Some(ValueOrArray::Array(set.into_iter().map(Some).collect()));
            }
        }
        Ok(filter)
    }

    /// Fetch past logs of the event with the given signature
    ///
    /// `topics` holds one set per indexed argument; values in a set are
    /// alternatives, an empty set matches anything.
    pub async fn filter_logs(
        &self,
        opts: &FilterOpts,
        signature: &str,
        topics: Vec<Vec<H256>>,
    ) -> Result<Vec<Log>> {
        let event = self.event(signature)?;
        let end = opts
            .end
            .map_or(BlockNumber::Latest, |end| BlockNumber::Number(end.into()));
        let filter = self
            .log_filter(event, topics)?
            .from_block(BlockNumber::Number(opts.start.into()))
            .to_block(end);

        let logs = self.filterer.filter_logs(&filter).await?;
        debug!(event = %signature, count = logs.len(), "Fetched event logs");
        Ok(logs)
    }

    /// Subscribe to future logs of the event with the given signature
    pub async fn watch_logs(
        &self,
        opts: &WatchOpts,
        signature: &str,
        topics: Vec<Vec<H256>>,
    ) -> Result<LogSubscription> {
        let event = self.event(signature)?;
        let mut filter = self.log_filter(event, topics)?;
        if let Some(start) = opts.start {
            filter = filter.from_block(BlockNumber::Number(start.into()));
        }
        self.filterer.subscribe_filter_logs(&filter).await
    }

    /// Past events as an iterator
    pub async fn filter_events<E: ContractEvent>(
        self: &Arc<Self>,
        opts: &FilterOpts,
        topics: Vec<Vec<H256>>,
    ) -> Result<EventIterator<E>> {
        let logs = self.filter_logs(opts, E::SIGNATURE, topics).await?;
        Ok(EventIterator::buffered(self.clone(), logs))
    }

    /// Live events as an iterator
    pub async fn subscribe_events<E: ContractEvent>(
        self: &Arc<Self>,
        opts: &WatchOpts,
        topics: Vec<Vec<H256>>,
    ) -> Result<EventIterator<E>> {
        let subscription = self.watch_logs(opts, E::SIGNATURE, topics).await?;
        Ok(EventIterator::live(self.clone(), subscription))
    }

    /// Live events pushed into `sink`
    pub async fn watch_events<E: ContractEvent>(
        self: &Arc<Self>,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<E>>,
        topics: Vec<Vec<H256>>,
    ) -> Result<WatchSubscription> {
        let subscription = self.watch_logs(opts, E::SIGNATURE, topics).await?;
        Ok(WatchSubscription::spawn(self.clone(), subscription, sink))
    }

    /// Decode a raw log as event `E`
    pub fn unpack_log<E: ContractEvent>(&self, log: &Log) -> Result<EventRecord<E>> {
        let event = self.event(E::SIGNATURE)?;
        if log.topics.first() != Some(&event.signature()) {
            return Err(Error::decode(format!(
                "Log is not a {} event (signature mismatch)",
                E::NAME
            )));
        }

        let parsed = event
            .parse_log(RawLog {
                topics: log.topics.clone(),
                data: log.data.to_vec(),
            })
            .map_err(|e| Error::decode(format!("Failed to decode {} log: {}", E::NAME, e)))?;
        let tokens = parsed.params.into_iter().map(|param| param.value).collect();

        Ok(EventRecord::new(E::from_tokens(tokens)?, log.clone()))
    }
}

impl fmt::Debug for BoundContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundContract")
            .field("address", &self.address)
            .finish()
    }
}

/// A submitted transaction
#[derive(Clone)]
pub struct PendingTx {
    hash: TxHash,
    request: TypedTransaction,
    transactor: Arc<dyn ContractTransactor>,
}

impl PendingTx {
    pub fn new(hash: TxHash, request: TypedTransaction, transactor: Arc<dyn ContractTransactor>) -> Self {
        Self {
            hash,
            request,
            transactor,
        }
    }

    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// The transaction as it was handed to the backend
    pub fn request(&self) -> &TypedTransaction {
        &self.request
    }

    /// Receipt of the transaction, `None` while it is not mined
    pub async fn receipt(&self) -> Result<Option<TransactionReceipt>> {
        self.transactor.transaction_receipt(self.hash).await
    }
}

impl fmt::Debug for PendingTx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTx")
            .field("hash", &self.hash)
            .field("request", &self.request)
            .finish()
    }
}

/// A pending constant call; await it or call [`call`](ContractCall::call)
#[must_use = "contract calls do nothing unless awaited"]
pub struct ContractCall<D> {
    contract: Arc<BoundContract>,
    method: &'static str,
    args: Vec<Token>,
    opts: CallOpts,
    _output: PhantomData<fn() -> D>,
}

impl<D: Detokenize> ContractCall<D> {
    pub fn new(contract: Arc<BoundContract>, method: &'static str, args: Vec<Token>, opts: CallOpts) -> Self {
        Self {
            contract,
            method,
            args,
            opts,
            _output: PhantomData,
        }
    }

    pub fn opts(mut self, opts: CallOpts) -> Self {
        self.opts = opts;
        self
    }

    pub fn from(mut self, from: Address) -> Self {
        self.opts.from = Some(from);
        self
    }

    pub fn block(mut self, block_number: u64) -> Self {
        self.opts.block_number = Some(block_number);
        self
    }

    pub fn pending(mut self) -> Self {
        self.opts.pending = true;
        self
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn calldata(&self) -> Result<Bytes> {
        self.contract.encode_call(self.method, &self.args)
    }

    pub async fn call(self) -> Result<D> {
        self.contract
            .call_typed(&self.opts, self.method, self.args)
            .await
    }
}

impl<D: Detokenize + Send + 'static> IntoFuture for ContractCall<D> {
    type Output = Result<D>;
    type IntoFuture = Pin<Box<dyn Future<Output = Result<D>> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.call())
    }
}

/// A state-changing call ready to be sent
#[must_use = "transactions do nothing unless sent"]
pub struct ContractTransaction {
    contract: Arc<BoundContract>,
    method: &'static str,
    args: Vec<Token>,
    opts: TransactOpts,
}

impl ContractTransaction {
    pub fn new(contract: Arc<BoundContract>, method: &'static str, args: Vec<Token>, opts: TransactOpts) -> Self {
        Self {
            contract,
            method,
            args,
            opts,
        }
    }

    pub fn opts(mut self, opts: TransactOpts) -> Self {
        self.opts = opts;
        self
    }

    pub fn from(mut self, from: Address) -> Self {
        self.opts.from = Some(from);
        self
    }

    pub fn value(mut self, value: impl Into<U256>) -> Self {
        self.opts.value = Some(value.into());
        self
    }

    pub fn nonce(mut self, nonce: impl Into<U256>) -> Self {
        self.opts.nonce = Some(nonce.into());
        self
    }

    pub fn gas_limit(mut self, gas_limit: impl Into<U256>) -> Self {
        self.opts.gas_limit = Some(gas_limit.into());
        self
    }

    pub fn gas_price(mut self, gas_price: impl Into<U256>) -> Self {
        self.opts.gas_price = Some(gas_price.into());
        self
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn calldata(&self) -> Result<Bytes> {
        self.contract.encode_call(self.method, &self.args)
    }

    pub async fn send(self) -> Result<PendingTx> {
        self.contract
            .transact(&self.opts, self.method, self.args)
            .await
    }
}

impl IntoFuture for ContractTransaction {
    type Output = Result<PendingTx>;
    type IntoFuture = Pin<Box<dyn Future<Output = Result<PendingTx>> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}

/// A bound contract together with default call and transaction options
///
/// Every typed binding wraps one of these. Sessions are handles with
/// different defaults sharing the same contract.
#[derive(Debug, Clone)]
pub struct ContractHandle {
    contract: Arc<BoundContract>,
    call_opts: CallOpts,
    transact_opts: TransactOpts,
}

impl ContractHandle {
    pub fn new(contract: Arc<BoundContract>) -> Self {
        Self {
            contract,
            call_opts: CallOpts::default(),
            transact_opts: TransactOpts::default(),
        }
    }

    /// Bind a bundled contract to `address`
    pub fn bind<B: ContractBackend + 'static>(
        address: Address,
        metadata: &ContractMetadata,
        backend: Arc<B>,
    ) -> Result<Self> {
        let abi = metadata.abi()?;
        Ok(Self::new(Arc::new(BoundContract::with_backend(address, abi, backend))))
    }

    /// Deploy a bundled contract
    pub async fn deploy<B: ContractBackend + 'static>(
        metadata: &ContractMetadata,
        opts: &TransactOpts,
        backend: Arc<B>,
        args: Vec<Token>,
    ) -> Result<(Address, PendingTx, Self)> {
        let abi = metadata.abi()?;
        let bytecode = metadata.bytecode()?;
        let (address, pending, contract) =
            BoundContract::deploy(opts, abi, bytecode, backend, args).await?;
        Ok((address, pending, Self::new(contract)))
    }

    pub fn contract(&self) -> &Arc<BoundContract> {
        &self.contract
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn call_opts(&self) -> &CallOpts {
        &self.call_opts
    }

    pub fn transact_opts(&self) -> &TransactOpts {
        &self.transact_opts
    }

    /// Same contract with new default call options
    pub fn with_call_opts(&self, call_opts: CallOpts) -> Self {
        Self {
            call_opts,
            ..self.clone()
        }
    }

    /// Same contract with new default transaction options
    pub fn with_transact_opts(&self, transact_opts: TransactOpts) -> Self {
        Self {
            transact_opts,
            ..self.clone()
        }
    }

    pub fn call<D: Detokenize>(&self, method: &'static str, args: Vec<Token>) -> ContractCall<D> {
        ContractCall::new(self.contract.clone(), method, args, self.call_opts.clone())
    }

    pub fn transact(&self, method: &'static str, args: Vec<Token>) -> ContractTransaction {
        ContractTransaction::new(self.contract.clone(), method, args, self.transact_opts.clone())
    }

    /// Plain value transfer using the default transaction options
    pub async fn transfer(&self) -> Result<PendingTx> {
        self.contract.transfer(&self.transact_opts).await
    }

    pub async fn filter<E: ContractEvent>(
        &self,
        opts: &FilterOpts,
        topics: Vec<Vec<H256>>,
    ) -> Result<EventIterator<E>> {
        self.contract.filter_events(opts, topics).await
    }

    pub async fn subscribe<E: ContractEvent>(
        &self,
        opts: &WatchOpts,
        topics: Vec<Vec<H256>>,
    ) -> Result<EventIterator<E>> {
        self.contract.subscribe_events(opts, topics).await
    }

    pub async fn watch<E: ContractEvent>(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<E>>,
        topics: Vec<Vec<H256>>,
    ) -> Result<WatchSubscription> {
        self.contract.watch_events(opts, sink, topics).await
    }

    pub fn parse<E: ContractEvent>(&self, log: &Log) -> Result<EventRecord<E>> {
        self.contract.unpack_log(log)
    }
}
