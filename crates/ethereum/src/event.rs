use std::ops::Deref;

use ethers::abi::{Detokenize, Token, Tokenizable};
use ethers::types::{Log, H256, U256};
use ethers::utils::keccak256;

use bindings_core::{Error, Result};

/// A typed contract event
///
/// `SIGNATURE` is the canonical event signature (`Name(type,type,...)`); it
/// identifies overloaded events unambiguously.
pub trait ContractEvent: Sized + Send + Sync + 'static {
    const NAME: &'static str;
    const SIGNATURE: &'static str;

    /// Build the event from its decoded parameters, in ABI declaration order
    fn from_tokens(tokens: Vec<Token>) -> Result<Self>;

    /// Topic 0 of every log carrying this event
    fn topic() -> H256 {
        H256::from(keccak256(Self::SIGNATURE.as_bytes()))
    }
}

/// A decoded event together with the raw log it came from
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord<E> {
    pub event: E,
    pub raw: Log,
}

impl<E> EventRecord<E> {
    pub fn new(event: E, raw: Log) -> Self {
        Self { event, raw }
    }

    pub fn block_number(&self) -> Option<u64> {
        self.raw.block_number.map(|n| n.as_u64())
    }

    pub fn block_hash(&self) -> Option<H256> {
        self.raw.block_hash
    }

    pub fn transaction_hash(&self) -> Option<H256> {
        self.raw.transaction_hash
    }

    pub fn log_index(&self) -> Option<U256> {
        self.raw.log_index
    }

    /// Whether the log was dropped by a chain reorganisation
    pub fn removed(&self) -> bool {
        self.raw.removed.unwrap_or(false)
    }

    pub fn into_inner(self) -> E {
        self.event
    }
}

impl<E> Deref for EventRecord<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.event
    }
}

/// Decode ABI tokens into a typed value
pub fn detokenize<T: Detokenize>(tokens: Vec<Token>) -> Result<T> {
    T::from_tokens(tokens).map_err(|e| Error::decode(e.to_string()))
}

/// Topic value for a single indexed argument
///
/// Value types are stored as their 32-byte ABI word. Strings and bytes are
/// stored as the keccak256 hash of their contents, arrays and tuples as the
/// hash of their in-place encoding (no offsets or lengths).
pub fn topic_from_token(token: Token) -> H256 {
    match token {
        Token::String(s) => H256::from(keccak256(s.as_bytes())),
        Token::Bytes(b) => H256::from(keccak256(b)),
        Token::Array(items) | Token::FixedArray(items) | Token::Tuple(items) => {
            let mut preimage = Vec::new();
            for item in &items {
                in_place_encode(item, &mut preimage);
            }
            H256::from(keccak256(preimage))
        }
        token => H256::from_slice(&ethers::abi::encode(&[token])),
    }
}

// Element encoding inside an indexed composite: padded to 32 bytes, no length prefix
fn in_place_encode(token: &Token, out: &mut Vec<u8>) {
    match token {
        Token::String(s) => pad_to_word(s.as_bytes(), out),
        Token::Bytes(b) => pad_to_word(b, out),
        Token::Array(items) | Token::FixedArray(items) | Token::Tuple(items) => {
            for item in items {
                in_place_encode(item, out);
            }
        }
        token => out.extend_from_slice(&ethers::abi::encode(std::slice::from_ref(token))),
    }
}

fn pad_to_word(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(bytes);
    let rem = bytes.len() % 32;
    if rem != 0 {
        out.resize(out.len() + 32 - rem, 0);
    }
}

/// Topic set for one indexed position; an empty set matches any value
pub fn topics<T: Tokenizable + Clone>(values: &[T]) -> Vec<H256> {
    values
        .iter()
        .cloned()
        .map(|value| topic_from_token(value.into_token()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::{Address, I256};

    #[test]
    fn test_address_topic_is_left_padded() {
        let address = Address::repeat_byte(0xab);
        let topic = topic_from_token(address.into_token());
        assert_eq!(&topic.as_bytes()[..12], &[0u8; 12]);
        assert_eq!(&topic.as_bytes()[12..], address.as_bytes());
    }

    #[test]
    fn test_negative_int_topic_is_sign_extended() {
        let topic = topic_from_token(I256::from(-1).into_token());
        assert_eq!(topic, H256::repeat_byte(0xff));
    }

    #[test]
    fn test_string_topic_is_hashed() {
        let topic = topic_from_token(Token::String("link".to_string()));
        assert_eq!(topic, H256::from(keccak256("link")));
    }

    #[test]
    fn test_dynamic_array_topic_hashes_elements_only() {
        let topic = topic_from_token(vec![U256::from(1), U256::from(2)].into_token());

        let mut preimage = [0u8; 64];
        preimage[31] = 1;
        preimage[63] = 2;
        assert_eq!(topic, H256::from(keccak256(preimage)));
    }

    #[test]
    fn test_tuple_topic_pads_dynamic_members() {
        let owner = Address::repeat_byte(0x11);
        let topic = topic_from_token(Token::Tuple(vec![
            Token::Address(owner),
            Token::String("link".to_string()),
        ]));

        let mut preimage = vec![0u8; 12];
        preimage.extend_from_slice(owner.as_bytes());
        preimage.extend_from_slice(b"link");
        preimage.resize(64, 0);
        assert_eq!(topic, H256::from(keccak256(preimage)));
    }

    #[test]
    fn test_topics_keep_order() {
        let set = topics(&[U256::from(1), U256::from(2)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set[0], H256::from_low_u64_be(1));
        assert_eq!(set[1], H256::from_low_u64_be(2));
    }
}
