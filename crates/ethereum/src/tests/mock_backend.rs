//! Mocked chain backend and log fixtures

use async_trait::async_trait;
use ethers::abi::{Token, Tokenizable};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, BlockId, Bytes, Filter, Log, TransactionReceipt, TxHash, H256, I256, U256, U64};
use ethers::utils::keccak256;
use mockall::mock;

use bindings_core::Result;

use crate::backend::{ContractCaller, ContractFilterer, ContractTransactor};
use crate::event::topic_from_token;
use crate::subscription::LogSubscription;

mock! {
    pub Chain {}

    #[async_trait]
    impl ContractCaller for Chain {
        async fn code_at(&self, contract: Address, block: Option<BlockId>) -> Result<Bytes>;
        async fn call_contract(&self, call: &TypedTransaction, block: Option<BlockId>) -> Result<Bytes>;
    }

    #[async_trait]
    impl ContractTransactor for Chain {
        async fn pending_nonce_at(&self, account: Address) -> Result<U256>;
        async fn send_transaction(&self, tx: TypedTransaction) -> Result<TxHash>;
        async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>>;
    }

    #[async_trait]
    impl ContractFilterer for Chain {
        async fn filter_logs(&self, filter: &Filter) -> Result<Vec<Log>>;
        async fn subscribe_filter_logs(&self, filter: &Filter) -> Result<LogSubscription>;
    }
}

pub fn contract_address() -> Address {
    Address::repeat_byte(0x42)
}

pub fn sender() -> Address {
    Address::repeat_byte(0x11)
}

/// First four bytes of calldata
pub fn selector(tx: &TypedTransaction) -> [u8; 4] {
    let data = tx.data().cloned().unwrap_or_default();
    let mut selector = [0u8; 4];
    if data.len() >= 4 {
        selector.copy_from_slice(&data[..4]);
    }
    selector
}

pub fn selector_of(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn encode(tokens: Vec<Token>) -> Bytes {
    ethers::abi::encode(&tokens).into()
}

fn log(topics: Vec<H256>, data: Vec<Token>, block: u64) -> Log {
    Log {
        address: contract_address(),
        topics,
        data: encode(data),
        block_number: Some(U64::from(block)),
        transaction_hash: Some(H256::repeat_byte(block as u8)),
        log_index: Some(U256::zero()),
        ..Default::default()
    }
}

/// `AnswerUpdated(int256 indexed current, uint256 indexed roundId, uint256 updatedAt)`
pub fn answer_updated(current: i64, round_id: u64, updated_at: u64, block: u64) -> Log {
    log(
        vec![
            H256::from(keccak256("AnswerUpdated(int256,uint256,uint256)")),
            topic_from_token(I256::from(current).into_token()),
            topic_from_token(U256::from(round_id).into_token()),
        ],
        vec![U256::from(updated_at).into_token()],
        block,
    )
}

/// `Named(string indexed label, uint256 value)`
pub fn named(label: &str, value: u64, block: u64) -> Log {
    log(
        vec![
            H256::from(keccak256("Named(string,uint256)")),
            topic_from_token(label.to_string().into_token()),
        ],
        vec![U256::from(value).into_token()],
        block,
    )
}

/// An `AnswerUpdated` log whose data section is missing
pub fn truncated_answer_updated(block: u64) -> Log {
    let mut log = answer_updated(1, 1, 1, block);
    log.data = Bytes::new();
    log
}

/// `Transfer(address indexed from, address indexed to, uint256 value)`
pub fn token_transfer(from: Address, to: Address, value: u64, block: u64) -> Log {
    log(
        vec![
            H256::from(keccak256("Transfer(address,address,uint256)")),
            topic_from_token(from.into_token()),
            topic_from_token(to.into_token()),
        ],
        vec![U256::from(value).into_token()],
        block,
    )
}
