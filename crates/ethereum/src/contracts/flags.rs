//! Bindings for the `Flags` contract

use crate::prelude::*;

pub static METADATA: ContractMetadata = ContractMetadata::new(
    "Flags",
    include_str!("abi/Flags.json"),
    Some(include_str!("abi/Flags.bin")),
);

/// `Flags` bound to an address
#[derive(Debug, Clone)]
pub struct Flags(ContractHandle);

impl Flags {
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
        rac_address: Address,
    ) -> Result<(Address, PendingTx, Self)> {
        let args = vec![rac_address.into_token()];
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

    /// `checkEnabled() view returns (bool)`
    pub fn check_enabled(&self) -> ContractCall<bool> {
        self.0.call("checkEnabled", vec![])
    }

    /// `getFlag(address subject) view returns (bool)`
    pub fn get_flag(&self, subject: Address) -> ContractCall<bool> {
        self.0.call("getFlag", vec![subject.into_token()])
    }

    /// `getFlags(address[] subjects) view returns (bool[])`
    pub fn get_flags(&self, subjects: Vec<Address>) -> ContractCall<Vec<bool>> {
        self.0.call("getFlags", vec![subjects.into_token()])
    }

    /// `hasAccess(address _user, bytes _calldata) view returns (bool)`
    pub fn has_access(&self, user: Address, calldata: Bytes) -> ContractCall<bool> {
        self.0.call("hasAccess", vec![user.into_token(), calldata.into_token()])
    }

    /// `owner() view returns (address)`
    pub fn owner(&self) -> ContractCall<Address> {
        self.0.call("owner", vec![])
    }

    /// `raisingAccessController() view returns (address)`
    pub fn raising_access_controller(&self) -> ContractCall<Address> {
        self.0.call("raisingAccessController", vec![])
    }

    /// `acceptOwnership()`
    pub fn accept_ownership(&self) -> ContractTransaction {
        self.0.transact("acceptOwnership", vec![])
    }

    /// `addAccess(address _user)`
    pub fn add_access(&self, user: Address) -> ContractTransaction {
        self.0.transact("addAccess", vec![user.into_token()])
    }

    /// `disableAccessCheck()`
    pub fn disable_access_check(&self) -> ContractTransaction {
        self.0.transact("disableAccessCheck", vec![])
    }

    /// `enableAccessCheck()`
    pub fn enable_access_check(&self) -> ContractTransaction {
        self.0.transact("enableAccessCheck", vec![])
    }

    /// `lowerFlags(address[] subjects)`
    pub fn lower_flags(&self, subjects: Vec<Address>) -> ContractTransaction {
        self.0.transact("lowerFlags", vec![subjects.into_token()])
    }

    /// `raiseFlag(address subject)`
    pub fn raise_flag(&self, subject: Address) -> ContractTransaction {
        self.0.transact("raiseFlag", vec![subject.into_token()])
    }

    /// `raiseFlags(address[] subjects)`
    pub fn raise_flags(&self, subjects: Vec<Address>) -> ContractTransaction {
        self.0.transact("raiseFlags", vec![subjects.into_token()])
    }

    /// `removeAccess(address _user)`
    pub fn remove_access(&self, user: Address) -> ContractTransaction {
        self.0.transact("removeAccess", vec![user.into_token()])
    }

    /// `setRaisingAccessController(address racAddress)`
    pub fn set_raising_access_controller(&self, rac_address: Address) -> ContractTransaction {
        self.0.transact("setRaisingAccessController", vec![rac_address.into_token()])
    }

    /// `transferOwnership(address to)`
    pub fn transfer_ownership(&self, to: Address) -> ContractTransaction {
        self.0.transact("transferOwnership", vec![to.into_token()])
    }

    pub async fn filter_added_access(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<AddedAccess>> {
        self.0.filter(opts, vec![]).await
    }

    pub async fn watch_added_access(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<AddedAccess>>,
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![]).await
    }

    pub fn parse_added_access(&self, log: &Log) -> Result<EventRecord<AddedAccess>> {
        self.0.parse(log)
    }

    pub async fn filter_check_access_disabled(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<CheckAccessDisabled>> {
        self.0.filter(opts, vec![]).await
    }

    pub async fn watch_check_access_disabled(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<CheckAccessDisabled>>,
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![]).await
    }

    pub fn parse_check_access_disabled(
        &self,
        log: &Log,
    ) -> Result<EventRecord<CheckAccessDisabled>> {
        self.0.parse(log)
    }

    pub async fn filter_check_access_enabled(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<CheckAccessEnabled>> {
        self.0.filter(opts, vec![]).await
    }

    pub async fn watch_check_access_enabled(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<CheckAccessEnabled>>,
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![]).await
    }

    pub fn parse_check_access_enabled(&self, log: &Log) -> Result<EventRecord<CheckAccessEnabled>> {
        self.0.parse(log)
    }

    pub async fn filter_flag_lowered(
        &self,
        opts: &FilterOpts,
        subject: &[Address],
    ) -> Result<EventIterator<FlagLowered>> {
        self.0.filter(opts, vec![topics(subject)]).await
    }

    pub async fn watch_flag_lowered(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<FlagLowered>>,
        subject: &[Address],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(subject)]).await
    }

    pub fn parse_flag_lowered(&self, log: &Log) -> Result<EventRecord<FlagLowered>> {
        self.0.parse(log)
    }

    pub async fn filter_flag_raised(
        &self,
        opts: &FilterOpts,
        subject: &[Address],
    ) -> Result<EventIterator<FlagRaised>> {
        self.0.filter(opts, vec![topics(subject)]).await
    }

    pub async fn watch_flag_raised(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<FlagRaised>>,
        subject: &[Address],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(subject)]).await
    }

    pub fn parse_flag_raised(&self, log: &Log) -> Result<EventRecord<FlagRaised>> {
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

    pub async fn filter_raising_access_controller_updated(
        &self,
        opts: &FilterOpts,
        previous: &[Address],
        current: &[Address],
    ) -> Result<EventIterator<RaisingAccessControllerUpdated>> {
        self.0.filter(opts, vec![topics(previous), topics(current)]).await
    }

    pub async fn watch_raising_access_controller_updated(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<RaisingAccessControllerUpdated>>,
        previous: &[Address],
        current: &[Address],
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![topics(previous), topics(current)]).await
    }

    pub fn parse_raising_access_controller_updated(
        &self,
        log: &Log,
    ) -> Result<EventRecord<RaisingAccessControllerUpdated>> {
        self.0.parse(log)
    }

    pub async fn filter_removed_access(
        &self,
        opts: &FilterOpts,
    ) -> Result<EventIterator<RemovedAccess>> {
        self.0.filter(opts, vec![]).await
    }

    pub async fn watch_removed_access(
        &self,
        opts: &WatchOpts,
        sink: mpsc::Sender<EventRecord<RemovedAccess>>,
    ) -> Result<WatchSubscription> {
        self.0.watch(opts, sink, vec![]).await
    }

    pub fn parse_removed_access(&self, log: &Log) -> Result<EventRecord<RemovedAccess>> {
        self.0.parse(log)
    }
}

/// `AddedAccess(address user)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedAccess {
    pub user: Address,
}

impl ContractEvent for AddedAccess {
    const NAME: &'static str = "AddedAccess";
    const SIGNATURE: &'static str = "AddedAccess(address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        Ok(Self {
            user: detokenize(tokens)?,
        })
    }
}

/// `CheckAccessDisabled()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckAccessDisabled;

impl ContractEvent for CheckAccessDisabled {
    const NAME: &'static str = "CheckAccessDisabled";
    const SIGNATURE: &'static str = "CheckAccessDisabled()";

    fn from_tokens(_tokens: Vec<Token>) -> Result<Self> {
        Ok(Self)
    }
}

/// `CheckAccessEnabled()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckAccessEnabled;

impl ContractEvent for CheckAccessEnabled {
    const NAME: &'static str = "CheckAccessEnabled";
    const SIGNATURE: &'static str = "CheckAccessEnabled()";

    fn from_tokens(_tokens: Vec<Token>) -> Result<Self> {
        Ok(Self)
    }
}

/// `FlagLowered(address indexed subject)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagLowered {
    pub subject: Address,
}

impl ContractEvent for FlagLowered {
    const NAME: &'static str = "FlagLowered";
    const SIGNATURE: &'static str = "FlagLowered(address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        Ok(Self {
            subject: detokenize(tokens)?,
        })
    }
}

/// `FlagRaised(address indexed subject)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRaised {
    pub subject: Address,
}

impl ContractEvent for FlagRaised {
    const NAME: &'static str = "FlagRaised";
    const SIGNATURE: &'static str = "FlagRaised(address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        Ok(Self {
            subject: detokenize(tokens)?,
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

/// `RaisingAccessControllerUpdated(address indexed previous, address indexed current)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaisingAccessControllerUpdated {
    pub previous: Address,
    pub current: Address,
}

impl ContractEvent for RaisingAccessControllerUpdated {
    const NAME: &'static str = "RaisingAccessControllerUpdated";
    const SIGNATURE: &'static str = "RaisingAccessControllerUpdated(address,address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (previous, current) = detokenize(tokens)?;
        Ok(Self {
            previous,
            current,
        })
    }
}

/// `RemovedAccess(address user)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedAccess {
    pub user: Address,
}

impl ContractEvent for RemovedAccess {
    const NAME: &'static str = "RemovedAccess";
    const SIGNATURE: &'static str = "RemovedAccess(address)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        Ok(Self {
            user: detokenize(tokens)?,
        })
    }
}
