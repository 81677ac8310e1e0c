//! Typed bindings for the bundled contracts

pub mod aggregator_proxy;
pub mod ens_interface;
pub mod flags;
pub mod flags_interface;
pub mod link_token;
pub mod mock_v3_aggregator;
pub mod reward_lib;

pub use aggregator_proxy::AggregatorProxy;
pub use ens_interface::EnsInterface;
pub use flags::Flags;
pub use flags_interface::FlagsInterface;
pub use link_token::LinkToken;
pub use mock_v3_aggregator::MockV3Aggregator;
pub use reward_lib::RewardLib;

use ethers::abi::{InvalidOutputType, Token, Tokenizable};
use ethers::types::{I256, U256};

/// Round data reported by aggregator contracts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundData {
    pub round_id: u128,
    pub answer: I256,
    pub started_at: U256,
    pub updated_at: U256,
    pub answered_in_round: u128,
}

impl Tokenizable for RoundData {
    fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        let (round_id, answer, started_at, updated_at, answered_in_round) =
            Tokenizable::from_token(token)?;
        Ok(Self {
            round_id,
            answer,
            started_at,
            updated_at,
            answered_in_round,
        })
    }

    fn into_token(self) -> Token {
        (
            self.round_id,
            self.answer,
            self.started_at,
            self.updated_at,
            self.answered_in_round,
        )
            .into_token()
    }
}
