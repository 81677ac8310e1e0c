//! Bindings for the `LinkToken` contract

use crate::prelude::*;

pub static METADATA: ContractMetadata = ContractMetadata::new(
    "LinkToken",
    include_str!("abi/LinkToken.json"),
    Some(include_str!("abi/LinkToken.bin")),
);

/// `LinkToken` bound to an address
#[derive(Debug, Clone)]
pub struct LinkToken(ContractHandle);

impl LinkToken {
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

    /// `name() view returns (string)`
    pub fn name(&self) -> ContractCall<String> {
        self.0.call("name", vec![])
    }

    /// `totalSupply() view returns (uint256)`
    pub fn total_supply(&self) -> ContractCall<U256> {
        self.0.call("totalSupply", vec![])
    }

    /// `decimals() view returns (uint8)`
    pub fn decimals(&self) -> ContractCall<u8> {
        self.0.call("decimals", vec![])
    }

    /// `balanceOf(address _owner) view returns (uint256)`
    pub fn balance_of(&self, owner: Address) -> ContractCall<U256> {
        self.0.call("balanceOf", vec![owner.into_token()])
    }

    /// `symbol() view returns (string)`
    pub fn symbol(&self) -> ContractCall<String> {
        self.0.call("symbol", vec![])
    }

    /// `allowance(address _owner, address _spender) view returns (uint256)`
    pub fn allowance(&self, owner: Address, spender: Address) -> ContractCall<U256> {
        self.0.call("allowance", vec![owner.into_token(), spender.into_token()])
    }

    /// `approve(address _spender, uint256 _value) returns (bool)`
    pub fn approve(&self, spender: Address, value: U256) -> ContractTransaction {
        self.0.transact("approve", vec![spender.into_token(), value.into_token()])
    }

    /// `transferFrom(address _from, address _to, uint256 _value) returns (bool)`
    pub fn transfer_from(&self, from: Address, to: Address, value: U256) -> ContractTransaction {
        self.0.transact(
            "transferFrom",
            vec![
                from.into_token(),
                to.into_token(),
                value.into_token(),
            ],
        )
    }

    /// `transferAndCall(address _to, uint256 _value, bytes _data) returns (bool)`
    pub fn transfer_and_call(&self, to: Address, value: U256, data: Bytes) -> ContractTransaction {
        self.0.transact(
            "transferAndCall",
            vec![
                to.into_token(),
                value.into_token(),
                data.into_token(),
            ],
        )
    }

    /// `decreaseApproval(address _spender, uint256 _subtractedValue) returns (bool)`
    pub fn decrease_approval(
        &self,
        spender: Address,
        subtracted_value: U256,
    ) -> ContractTransaction {
        self.0.transact(
            "decreaseApproval",
            vec![
                spender.into_token(),
                subtracted_value.into_token(),
            ],
        )
    }

    /// `transfer(address _to, uint256 _value) returns (bool)`
    pub fn transfer(&self, to: Address, value: U256) -> ContractTransaction {
        self.0.transact("transfer", vec![to.into_token(), value.into_token()])
    }

    /// `increaseApproval(address _spender, uint256 _addedValue) returns (bool)`
    pub fn increase_approval(&self, spender: Address, added_value: U256) -> ContractTransaction {
        self.0.transact("increaseApproval", vec![spender.into_token(), added_value.into_token()])
    }

    pub async fn filter_transfer(
        &self,
        opts: &FilterOpts,
        from: &[Address],
        to: &[Address],
    ) -> Result<EventIterator<Transfer>> {
        self.0.filter(opts, vec![topics(from), topics(to)]).await
    }

    pub async fn watch_transfer(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<Transfer>>,
        from: &[Address],
        to: &[Address],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(from), topics(to)]).await
    }

    pub fn parse_transfer(&self, log: &Log) -> Result<EventRecord<Transfer>> {
        self.0.parse(log)
    }

    pub async fn filter_approval(
        &self,
        opts: &FilterOpts,
        owner: &[Address],
        spender: &[Address],
    ) -> Result<EventIterator<Approval>> {
        self.0.filter(opts, vec![topics(owner), topics(spender)]).await
    }

    pub async fn watch_approval(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<Approval>>,
        owner: &[Address],
        spender: &[Address],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(owner), topics(spender)]).await
    }

    pub fn parse_approval(&self, log: &Log) -> Result<EventRecord<Approval>> {
        self.0.parse(log)
    }

    pub async fn filter_transfer0(
        &self,
        opts: &FilterOpts,
        from: &[Address],
        to: &[Address],
    ) -> Result<EventIterator<Transfer0>> {
        self.0.filter(opts, vec![topics(from), topics(to)]).await
    }

    pub async fn watch_transfer0(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<Transfer0>>,
        from: &[Address],
        to: &[Address],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(from), topics(to)]).await
    }

    pub fn parse_transfer0(&self, log: &Log) -> Result<EventRecord<Transfer0>> {
        self.0.parse(log)
    }
}

/// `Transfer(address indexed from, address indexed to, uint256 value, bytes data)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl ContractEvent for Transfer {
    const NAME: &'static str = "Transfer";
    const SIGNATURE: &'static str = "Transfer(address,address,uint256,bytes)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (from, to, value, data) = detokenize(tokens)?;
        Ok(Self {
            from,
            to,
            value,
            data,
        })
    }
}

/// `Approval(address indexed owner, address indexed spender, uint256 value)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
}

impl ContractEvent for Approval {
    const NAME: &'static str = "Approval";
    const SIGNATURE: &'static str = "Approval(address,address,uint256)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (owner, spender, value) = detokenize(tokens)?;
        Ok(Self {
            owner,
            spender,
            value,
        })
    }
}

/// `Transfer(address indexed from, address indexed to, uint256 value)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer0 {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

impl ContractEvent for Transfer0 {
    const NAME: &'static str = "Transfer";
    const SIGNATURE: &'static str = "Transfer(address,address,uint256)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (from, to, value) = detokenize(tokens)?;
        Ok(Self {
            from,
            to,
            value,
        })
    }
}
