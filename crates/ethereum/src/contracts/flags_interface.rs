//! Bindings for the `FlagsInterface` contract

use crate::prelude::*;

pub static METADATA: ContractMetadata = ContractMetadata::new(
    "FlagsInterface",
    include_str!("abi/FlagsInterface.json"),
    None,
);

/// `FlagsInterface` bound to an address
#[derive(Debug, Clone)]
pub struct FlagsInterface(ContractHandle);

impl FlagsInterface {
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

    /// `getFlag(address) view returns (bool)`
    pub fn get_flag(&self, arg0: Address) -> ContractCall<bool> {
        self.0.call("getFlag", vec![arg0.into_token()])
    }

    /// `getFlags(address[]) view returns (bool[])`
    pub fn get_flags(&self, arg0: Vec<Address>) -> ContractCall<Vec<bool>> {
        self.0.call("getFlags", vec![arg0.into_token()])
    }

    /// `lowerFlags(address[])`
    pub fn lower_flags(&self, arg0: Vec<Address>) -> ContractTransaction {
        self.0.transact("lowerFlags", vec![arg0.into_token()])
    }

    /// `raiseFlag(address)`
    pub fn raise_flag(&self, arg0: Address) -> ContractTransaction {
        self.0.transact("raiseFlag", vec![arg0.into_token()])
    }

    /// `raiseFlags(address[])`
    pub fn raise_flags(&self, arg0: Vec<Address>) -> ContractTransaction {
        self.0.transact("raiseFlags", vec![arg0.into_token()])
    }

    /// `setRaisingAccessController(address)`
    pub fn set_raising_access_controller(&self, arg0: Address) -> ContractTransaction {
        self.0.transact("setRaisingAccessController", vec![arg0.into_token()])
    }
}
