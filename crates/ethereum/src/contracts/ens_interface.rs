//! Bindings for the `ENSInterface` contract

use crate::prelude::*;

pub static METADATA: ContractMetadata = ContractMetadata::new(
    "ENSInterface",
    include_str!("abi/ENSInterface.json"),
    None,
);

/// `ENSInterface` bound to an address
#[derive(Debug, Clone)]
pub struct EnsInterface(ContractHandle);

impl EnsInterface {
    /// Bind to a deployed instance
    pub fn new<B: ContractBackend + 'static>(address: Address, backend: Arc<B>) -> Result<Self> {
        ContractHandle::bind(address, &METADATA, backend).map(Self)
    }

    pub fn from_handle(handle: ContractHandle) -> Self {
        Self(handle)
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

    /// `owner(bytes32 node) view returns (address)`
    pub fn owner(&self, node: H256) -> ContractCall<Address> {
        self.0.call("owner", vec![node.into_token()])
    }

    /// `resolver(bytes32 node) view returns (address)`
    pub fn resolver(&self, node: H256) -> ContractCall<Address> {
        self.0.call("resolver", vec![node.into_token()])
    }

    /// `ttl(bytes32 node) view returns (uint64)`
    pub fn ttl(&self, node: H256) -> ContractCall<u64> {
        self.0.call("ttl", vec![node.into_token()])
    }

    /// `setOwner(bytes32 node, address _owner)`
    pub fn set_owner(&self, node: H256, owner: Address) -> ContractTransaction {
        self.0.transact("setOwner", vec![node.into_token(), owner.into_token()])
    }

    /// `setResolver(bytes32 node, address _resolver)`
    pub fn set_resolver(&self, node: H256, resolver: Address) -> ContractTransaction {
        self.0.transact("setResolver", vec![node.into_token(), resolver.into_token()])
    }

    /// `setSubnodeOwner(bytes32 node, bytes32 label, address _owner)`
    pub fn set_subnode_owner(
        &self,
        node: H256,
        label: H256,
        owner: Address,
    ) -> ContractTransaction {
        self.0.transact(
            "setSubnodeOwner",
            vec![
                node.into_token(),
                label.into_token(),
                owner.into_token(),
            ],
        )
    }

    /// `setTTL(bytes32 node, uint64 _ttl)`
    pub fn set_ttl(&self, node: H256, ttl: u64) -> ContractTransaction {
        self.0.transact("setTTL", vec![node.into_token(), ttl.into_token()])
    }

    pub async fn filter_new_owner(
        &self,
        opts: &FilterOpts,
        node: &[H256],
        label: &[H256],
    ) -> Result<EventIterator<NewOwner>> {
        self.0.filter(opts, vec![topics(node), topics(label)]).await
    }

    pub async fn watch_new_owner(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<NewOwner>>,
        node: &[H256],
        label: &[H256],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(node), topics(label)]).await
    }

    pub fn parse_new_owner(&self, log: &Log) -> Result<EventRecord<NewOwner>> {
        self.0.parse(log)
    }

    pub async fn filter_new_resolver(
        &self,
        opts: &FilterOpts,
        node: &[H256],
    ) -> Result<EventIterator<NewResolver>> {
        self.0.filter(opts, vec![topics(node)]).await
    }

    pub async fn watch_new_resolver(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<NewResolver>>,
        node: &[H256],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(node)]).await
    }

    pub fn parse_new_resolver(&self, log: &Log) -> Result<EventRecord<NewResolver>> {
        self.0.parse(log)
    }

    pub async fn filter_new_ttl(
        &self,
        opts: &FilterOpts,
        node: &[H256],
    ) -> Result<EventIterator<NewTtl>> {
        self.0.filter(opts, vec![topics(node)]).await
    }

    pub async fn watch_new_ttl(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<NewTtl>>,
        node: &[H256],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(node)]).await
    }

    pub fn parse_new_ttl(&self, log: &Log) -> Result<EventRecord<NewTtl>> {
        self.0.parse(log)
    }

    pub async fn filter_transfer(
        &self,
        opts: &FilterOpts,
        node: &[H256],
    ) -> Result<EventIterator<Transfer>> {
        self.0.filter(opts, vec![topics(node)]).await
    }

    pub async fn watch_transfer(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<Transfer>>,
        node: &[H256],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(node)]).await
    }

    pub fn parse_transfer(&self, log: &Log) -> Result<EventRecord<Transfer>> {
        self.0.parse(log)
    }
}

/// `NewOwner(bytes32 indexed node, bytes32 indexed label, address owner)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    pub node: H256,
    pub label: H256,
    pub owner: Address,
}

impl ContractEvent for NewOwner {
    const NAME: &'static str = "NewOwner";
    const SIGNATURE: &'static str = "NewOwner(bytes32,bytes32,address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (node, label, owner) = detokenize(tokens)?;
        Ok(Self {
            node,
            label,
            owner,
        })
    }
}

/// `NewResolver(bytes32 indexed node, address resolver)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResolver {
    pub node: H256,
    pub resolver: Address,
}

impl ContractEvent for NewResolver {
    const NAME: &'static str = "NewResolver";
    const SIGNATURE: &'static str = "NewResolver(bytes32,address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (node, resolver) = detokenize(tokens)?;
        Ok(Self {
            node,
            resolver,
        })
    }
}

/// `NewTTL(bytes32 indexed node, uint64 ttl)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTtl {
    pub node: H256,
    pub ttl: u64,
}

impl ContractEvent for NewTtl {
    const NAME: &'static str = "NewTTL";
    const SIGNATURE: &'static str = "NewTTL(bytes32,uint64)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (node, ttl) = detokenize(tokens)?;
        Ok(Self {
            node,
            ttl,
        })
    }
}

/// `Transfer(bytes32 indexed node, address owner)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub node: H256,
    pub owner: Address,
}

impl ContractEvent for Transfer {
    const NAME: &'static str = "Transfer";
    const SIGNATURE: &'static str = "Transfer(bytes32,address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (node, owner) = detokenize(tokens)?;
        Ok(Self {
            node,
            owner,
        })
    }
}
