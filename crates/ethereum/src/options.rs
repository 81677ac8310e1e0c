//! Per-call option structs

use ethers::types::{Address, BlockId, BlockNumber, U256};

/// Options for constant calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOpts {
    /// Run the call against the pending state
    pub pending: bool,
    /// Sender of the call, if any
    pub from: Option<Address>,
    /// Block to run the call at; latest when unset
    pub block_number: Option<u64>,
}

impl CallOpts {
    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn at_block(mut self, block_number: u64) -> Self {
        self.block_number = Some(block_number);
        self
    }

    pub fn pending(mut self) -> Self {
        self.pending = true;
        self
    }

    /// Block the backend should evaluate the call against
    pub fn block_id(&self) -> Option<BlockId> {
        if self.pending {
            Some(BlockId::Number(BlockNumber::Pending))
        } else {
            self.block_number.map(|n| BlockId::Number(BlockNumber::Number(n.into())))
        }
    }
}

/// Options for state-changing transactions
///
/// Unset gas fields are left for the backend to fill in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactOpts {
    /// Sending account
    pub from: Option<Address>,
    /// Nonce override; fetched from the pending state when unset and `from` is known
    pub nonce: Option<U256>,
    /// Wei sent along with the transaction
    pub value: Option<U256>,
    pub gas_price: Option<U256>,
    pub gas_limit: Option<U256>,
}

impl TransactOpts {
    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn nonce(mut self, nonce: impl Into<U256>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn value(mut self, value: impl Into<U256>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn gas_price(mut self, gas_price: impl Into<U256>) -> Self {
        self.gas_price = Some(gas_price.into());
        self
    }

    pub fn gas_limit(mut self, gas_limit: impl Into<U256>) -> Self {
        self.gas_limit = Some(gas_limit.into());
        self
    }
}

/// Block range for historical log queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOpts {
    pub start: u64,
    /// Last block to include; latest when unset
    pub end: Option<u64>,
}

impl FilterOpts {
    pub fn range(start: u64, end: u64) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

/// Options for live log subscriptions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchOpts {
    /// First block to deliver logs from; the current head when unset
    pub start: Option<u64>,
}
