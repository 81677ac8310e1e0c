//! Calls, transactions and deployment through the typed bindings

use std::sync::Arc;

use ethers::abi::{Token, Tokenizable};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{BlockId, BlockNumber, Bytes, TxHash, ValueOrArray, H256, I256, U256, U64};
use ethers::utils::get_contract_address;

use bindings_core::Error;

use super::mock_backend::*;
use crate::contracts::mock_v3_aggregator::AnswerUpdated;
use crate::contracts::{LinkToken, MockV3Aggregator, RoundData};
use crate::contract::BoundContract;
use crate::event::{detokenize, topic_from_token, topics, ContractEvent};
use crate::options::{CallOpts, FilterOpts, TransactOpts};
use crate::subscription::IteratorState;
use bindings_core::Result;

fn aggregator(chain: MockChain) -> MockV3Aggregator {
    MockV3Aggregator::new(contract_address(), Arc::new(chain)).unwrap()
}

#[tokio::test]
async fn test_call_decodes_typed_outputs() {
    let mut chain = MockChain::new();
    chain
        .expect_call_contract()
        .withf(|tx: &TypedTransaction, _| tx.to_addr() == Some(&contract_address()))
        .returning(|tx: &TypedTransaction, _| {
            let round = RoundData {
                round_id: 7,
                answer: I256::from(-250),
                started_at: U256::from(1_000),
                updated_at: U256::from(1_010),
                answered_in_round: 7,
            };
            if selector(tx) == selector_of("decimals()") {
                Ok(encode(vec![Token::Uint(U256::from(8))]))
            } else if selector(tx) == selector_of("latestRoundData()") {
                match round.into_token() {
                    Token::Tuple(tokens) => Ok(encode(tokens)),
                    _ => unreachable!(),
                }
            } else {
                Ok(Bytes::new())
            }
        });

    let feed = aggregator(chain);
    assert_eq!(feed.decimals().await.unwrap(), 8);

    let round = feed.latest_round_data().await.unwrap();
    assert_eq!(round.round_id, 7);
    assert_eq!(round.answer, I256::from(-250));
    assert_eq!(round.updated_at, U256::from(1_010));
}

#[tokio::test]
async fn test_call_options_reach_the_backend() {
    let mut chain = MockChain::new();
    chain
        .expect_call_contract()
        .withf(|tx: &TypedTransaction, block: &Option<BlockId>| {
            tx.from() == Some(&sender()) && *block == Some(BlockId::Number(BlockNumber::Number(U64::from(100))))
        })
        .times(1)
        .returning(|_, _| Ok(encode(vec![Token::Int(I256::from(5).into_raw())])));

    let feed = aggregator(chain).caller_session(CallOpts::default().from(sender()).at_block(100));
    assert_eq!(feed.latest_answer().await.unwrap(), I256::from(5));
}

#[tokio::test]
async fn test_empty_output_without_code_is_no_code() {
    let mut chain = MockChain::new();
    chain.expect_call_contract().returning(|_, _| Ok(Bytes::new()));
    chain
        .expect_code_at()
        .withf(|address, _| *address == contract_address())
        .times(1)
        .returning(|_, _| Ok(Bytes::new()));

    let result = aggregator(chain).decimals().await;
    assert!(matches!(result, Err(Error::NoCode)));
}

#[tokio::test]
async fn test_empty_output_with_code_is_decode_error() {
    let mut chain = MockChain::new();
    chain.expect_call_contract().returning(|_, _| Ok(Bytes::new()));
    chain
        .expect_code_at()
        .returning(|_, _| Ok(Bytes::from(vec![0x60, 0x80])));

    let err = aggregator(chain).decimals().await.unwrap_err();
    assert!(err.is_decode(), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_transact_fills_pending_nonce() {
    let mut chain = MockChain::new();
    chain
        .expect_pending_nonce_at()
        .withf(|account| *account == sender())
        .times(1)
        .returning(|_| Ok(U256::from(7)));
    chain
        .expect_send_transaction()
        .withf(|tx: &TypedTransaction| {
            tx.nonce() == Some(&U256::from(7))
                && tx.from() == Some(&sender())
                && tx.to_addr() == Some(&contract_address())
                && tx.value() == Some(&U256::zero())
                && selector(tx) == selector_of("updateAnswer(int256)")
        })
        .times(1)
        .returning(|_| Ok(TxHash::repeat_byte(0xaa)));

    let feed = aggregator(chain).transactor_session(TransactOpts::default().from(sender()));
    let pending = feed.update_answer(I256::from(42)).await.unwrap();
    assert_eq!(pending.hash(), TxHash::repeat_byte(0xaa));
}

#[tokio::test]
async fn test_explicit_nonce_skips_lookup() {
    let mut chain = MockChain::new();
    chain.expect_pending_nonce_at().times(0);
    chain
        .expect_send_transaction()
        .withf(|tx: &TypedTransaction| {
            tx.nonce() == Some(&U256::from(3)) && tx.gas() == Some(&U256::from(90_000))
        })
        .times(1)
        .returning(|_| Ok(TxHash::repeat_byte(0xbb)));
    chain
        .expect_transaction_receipt()
        .times(1)
        .returning(|_| Ok(None));

    let feed = aggregator(chain);
    let pending = feed
        .update_answer(I256::from(1))
        .from(sender())
        .nonce(3u64)
        .gas_limit(90_000u64)
        .send()
        .await
        .unwrap();
    assert!(pending.receipt().await.unwrap().is_none());
}

#[tokio::test]
async fn test_transfer_sends_plain_value() {
    let mut chain = MockChain::new();
    chain
        .expect_send_transaction()
        .withf(|tx: &TypedTransaction| {
            tx.data().map_or(true, |data| data.is_empty()) && tx.value() == Some(&U256::from(1_000))
        })
        .times(1)
        .returning(|_| Ok(TxHash::repeat_byte(0xcc)));

    let feed = aggregator(chain).transactor_session(TransactOpts::default().value(1_000u64).nonce(0u64));
    let pending = feed.handle().transfer().await.unwrap();
    assert_eq!(pending.hash(), TxHash::repeat_byte(0xcc));
}

#[tokio::test]
async fn test_deploy_derives_address_from_nonce() {
    let mut chain = MockChain::new();
    chain.expect_pending_nonce_at().returning(|_| Ok(U256::from(3)));
    chain
        .expect_send_transaction()
        .withf(|tx: &TypedTransaction| tx.to().is_none() && tx.nonce() == Some(&U256::from(3)))
        .times(1)
        .returning(|_| Ok(TxHash::repeat_byte(0xdd)));

    let opts = TransactOpts::default().from(sender());
    let (address, pending, feed) =
        MockV3Aggregator::deploy(&opts, Arc::new(chain), 8, I256::from(2_000)).await.unwrap();

    assert_eq!(address, get_contract_address(sender(), U256::from(3)));
    assert_eq!(feed.address(), address);
    assert_eq!(pending.hash(), TxHash::repeat_byte(0xdd));

    let bytecode = crate::contracts::mock_v3_aggregator::METADATA.bytecode().unwrap();
    let data = pending.request().data().unwrap();
    assert!(data.starts_with(&bytecode));
    assert_eq!(data.len(), bytecode.len() + 64);
}

#[tokio::test]
async fn test_deploy_requires_sender() {
    let chain = MockChain::new();
    let result = MockV3Aggregator::deploy(&TransactOpts::default(), Arc::new(chain), 8, I256::zero()).await;
    assert!(matches!(result, Err(Error::Config(_))));
}

#[tokio::test]
async fn test_sessions_share_the_bound_contract() {
    let feed = aggregator(MockChain::new());
    let session = feed.session(CallOpts::default().pending(), TransactOpts::default().from(sender()));

    assert!(Arc::ptr_eq(feed.handle().contract(), session.handle().contract()));
    assert!(session.handle().call_opts().pending);
    assert!(!feed.handle().call_opts().pending);
    assert_eq!(session.handle().transact_opts().from, Some(sender()));
}

#[tokio::test]
async fn test_filter_builds_topic_sets() {
    let mut chain = MockChain::new();
    chain
        .expect_filter_logs()
        .withf(|filter| {
            let current = topic_from_token(I256::from(250).into_token());
            filter.topics[0]
                == Some(ValueOrArray::Value(Some(H256::from(ethers::utils::keccak256(
                    "AnswerUpdated(int256,uint256,uint256)",
                )))))
                && filter.topics[1] == Some(ValueOrArray::Array(vec![Some(current)]))
                && filter.topics[2].is_none()
                && filter.get_from_block() == Some(U64::from(10))
                && filter.get_to_block() == Some(U64::from(20))
        })
        .times(1)
        .returning(|_| Ok(vec![answer_updated(250, 1, 100, 12), answer_updated(250, 2, 200, 15)]));

    let feed = aggregator(chain);
    let mut events = feed
        .filter_answer_updated(&FilterOpts::range(10, 20), &[I256::from(250)], &[])
        .await
        .unwrap();
    assert_eq!(events.state(), IteratorState::Draining);

    assert!(events.next().await);
    let first = events.event().unwrap();
    assert_eq!(first.current, I256::from(250));
    assert_eq!(first.round_id, U256::from(1));
    assert_eq!(first.block_number(), Some(12));

    let second = events.next_event().await.unwrap();
    assert_eq!(second.round_id, U256::from(2));
    assert_eq!(second.updated_at, U256::from(200));

    assert!(!events.next().await);
    assert!(events.error().is_none());
    assert_eq!(events.state(), IteratorState::Exhausted);
}

#[tokio::test]
async fn test_filter_backend_error_is_returned() {
    let mut chain = MockChain::new();
    chain
        .expect_filter_logs()
        .returning(|_| Err(Error::transport("connection refused")));

    let result = aggregator(chain)
        .filter_new_round(&FilterOpts::default(), &[], &[])
        .await;
    assert!(matches!(result, Err(Error::Transport(_))));
}

#[tokio::test]
async fn test_overloaded_events_decode_by_signature() {
    let token = LinkToken::new(contract_address(), Arc::new(MockChain::new())).unwrap();
    let log = token_transfer(sender(), contract_address(), 500, 3);

    let transfer = token.parse_transfer0(&log).unwrap();
    assert_eq!(transfer.from, sender());
    assert_eq!(transfer.to, contract_address());
    assert_eq!(transfer.value, U256::from(500));

    // same name, different signature
    let err = token.parse_transfer(&log).unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn test_parse_rejects_foreign_logs() {
    let feed = aggregator(MockChain::new());
    let log = token_transfer(sender(), sender(), 1, 1);
    assert!(feed.handle().parse::<AnswerUpdated>(&log).unwrap_err().is_decode());
}

const LABELS_ABI: &str = r#"[{"type": "event", "name": "Named", "anonymous": false, "inputs": [
    {"name": "label", "type": "string", "indexed": true},
    {"name": "value", "type": "uint256", "indexed": false}]}]"#;

/// Indexed strings reach the log only as their hash
#[derive(Debug, Clone, PartialEq)]
struct Named {
    label: H256,
    value: U256,
}

impl ContractEvent for Named {
    const NAME: &'static str = "Named";
    const SIGNATURE: &'static str = "Named(string,uint256)";

    fn from_tokens(tokens: Vec<Token>) -> Result<Self> {
        let (label, value) = detokenize(tokens)?;
        Ok(Self { label, value })
    }
}

#[tokio::test]
async fn test_indexed_string_decodes_as_hash() {
    let abi = serde_json::from_str(LABELS_ABI).unwrap();
    let contract = BoundContract::with_backend(contract_address(), Arc::new(abi), Arc::new(MockChain::new()));

    let record = contract.unpack_log::<Named>(&named("link", 5, 9)).unwrap();
    assert_eq!(record.label, H256::from(ethers::utils::keccak256("link")));
    assert_eq!(record.value, U256::from(5));

    // the filter value for that position hashes to the same topic
    assert_eq!(topics(&["link".to_string()]), vec![record.label]);
}
