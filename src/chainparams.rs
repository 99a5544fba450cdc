//! Per-network chain parameters.
//!
//! Every network anchors its genesis block and checkpoints to 256-bit hash
//! constants and derives the genesis nBits from its proof-of-work limit.

use crate::error::ParamsError;
use crate::hash::Hash256;
use crate::pow::{check_proof_of_work, u256_from_compact_target, u256_to_compact_target};
use crate::uint::Uint256;
use log::{debug, warn};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const COIN: i64 = 100_000_000;

const MAIN_POW_LIMIT: &str = "000007fff0000000000000000000000000000000000000000000000000000000";
const MAIN_GENESIS: &str = "0x000006793e527cc2bfc0d9bb434873c18ab011c54a8ef2b9584f6d97a1dbe906";
const TESTNET_GENESIS: &str = "0x000001a31c72349a96269ea4c611d6b2f1e122896b1f846676abb5a805b39d4d";
const GENESIS_MERKLE_ROOT: &str =
    "0x3f18381a548302c0c3bf33bdf0e0efd61968024a217ae587bbe670c2f6dd632d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main,
    Testnet,
    Regtest,
    UnitTest,
}

impl Network {
    pub const ALL: [Network; 4] = [
        Network::Main,
        Network::Testnet,
        Network::Regtest,
        Network::UnitTest,
    ];

    /// Identifier used on the command line and in data directories
    pub fn id(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Testnet => "test",
            Network::Regtest => "regtest",
            Network::UnitTest => "unittest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Network {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            "unittest" => Ok(Network::UnitTest),
            _ => Err(ParamsError::UnknownNetwork(s.into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenesisParams {
    pub time: u32,
    pub nonce: u32,
    #[serde(serialize_with = "serialize_bits")]
    pub bits: u32,
    pub version: i32,
    pub reward: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointData {
    pub checkpoints: BTreeMap<u32, Hash256>,
    /// UNIX timestamp of the last checkpoint block
    pub last_checkpoint_time: i64,
    /// Transactions between genesis and the last checkpoint
    pub transactions_last_checkpoint: i64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainParams {
    pub network: Network,
    #[serde(serialize_with = "serialize_hex")]
    pub message_start: [u8; 4],
    pub default_port: u16,
    pub pow_limit: Uint256,
    pub target_timespan: i64,
    pub target_spacing: i64,
    pub maturity: u32,
    pub last_pow_block: u32,
    pub max_money_out: i64,
    pub allow_min_difficulty_blocks: bool,
    pub mine_blocks_on_demand: bool,
    pub genesis: GenesisParams,
    /// `None` where the genesis hash is not pinned (regtest)
    pub genesis_hash: Option<Hash256>,
    pub genesis_merkle_root: Hash256,
    pub checkpoint_data: CheckpointData,
}

fn serialize_hex<S>(bytes: &[u8; 4], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&hex::encode(bytes))
}

fn serialize_bits<S>(bits: &u32, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format!("{:08x}", bits))
}

fn checkpoints(entries: &[(u32, &str)]) -> BTreeMap<u32, Hash256> {
    entries
        .iter()
        .map(|&(height, hash)| (height, Hash256::from_hex(hash)))
        .collect()
}

impl ChainParams {
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Main => Self::main(),
            Network::Testnet => Self::testnet(),
            Network::Regtest => Self::regtest(),
            Network::UnitTest => Self::unit_test(),
        }
    }

    pub fn main() -> Self {
        let pow_limit = Uint256::from_hex(MAIN_POW_LIMIT);
        ChainParams {
            network: Network::Main,
            message_start: [0x13, 0x37, 0x13, 0x37],
            default_port: 32137,
            pow_limit,
            target_timespan: 90,
            target_spacing: 60,
            maturity: 37,
            last_pow_block: 3500,
            max_money_out: 2_000_000_000 * COIN,
            allow_min_difficulty_blocks: false,
            mine_blocks_on_demand: false,
            genesis: GenesisParams {
                time: 1531098372,
                nonce: 272872,
                bits: u256_to_compact_target(&pow_limit, false),
                version: 1,
                reward: 35 * COIN / 100,
            },
            genesis_hash: Some(Hash256::from_hex(MAIN_GENESIS)),
            genesis_merkle_root: Hash256::from_hex(GENESIS_MERKLE_ROOT),
            checkpoint_data: CheckpointData {
                checkpoints: checkpoints(&[(0, MAIN_GENESIS)]),
                last_checkpoint_time: 1531098372,
                transactions_last_checkpoint: 0,
                transactions_per_day: 2000.0,
            },
        }
    }

    pub fn testnet() -> Self {
        let main = Self::main();
        ChainParams {
            network: Network::Testnet,
            message_start: [0x14, 0x36, 0x14, 0x36],
            default_port: 32237,
            target_timespan: 60,
            target_spacing: 60,
            maturity: 5,
            last_pow_block: 200,
            max_money_out: 43_199_500 * COIN,
            allow_min_difficulty_blocks: true,
            genesis: GenesisParams {
                time: 1531090865,
                nonce: 2622957,
                ..main.genesis
            },
            genesis_hash: Some(Hash256::from_hex(TESTNET_GENESIS)),
            checkpoint_data: CheckpointData {
                checkpoints: checkpoints(&[(0, TESTNET_GENESIS)]),
                last_checkpoint_time: 1531090865,
                transactions_last_checkpoint: 0,
                transactions_per_day: 250.0,
            },
            ..main
        }
    }

    pub fn regtest() -> Self {
        let testnet = Self::testnet();
        ChainParams {
            network: Network::Regtest,
            message_start: [0x15, 0x35, 0x15, 0x35],
            default_port: 32337,
            pow_limit: !Uint256::ZERO >> 1,
            target_timespan: 24 * 60 * 60,
            target_spacing: 60,
            allow_min_difficulty_blocks: true,
            mine_blocks_on_demand: true,
            genesis: GenesisParams {
                time: 1515524400,
                nonce: 732084,
                bits: 0x1e0ffff0,
                ..testnet.genesis
            },
            genesis_hash: None,
            checkpoint_data: CheckpointData {
                checkpoints: checkpoints(&[(0, "0x001")]),
                last_checkpoint_time: 1454124731,
                transactions_last_checkpoint: 0,
                transactions_per_day: 100.0,
            },
            ..testnet
        }
    }

    /// Main network tables with the flags unit tests expect.
    pub fn unit_test() -> Self {
        ChainParams {
            network: Network::UnitTest,
            default_port: 32437,
            allow_min_difficulty_blocks: false,
            mine_blocks_on_demand: true,
            ..Self::main()
        }
    }

    pub fn checkpoint(&self, height: u32) -> Option<&Hash256> {
        self.checkpoint_data.checkpoints.get(&height)
    }

    /// False only when a checkpoint exists at `height` with another hash.
    pub fn check_block(&self, height: u32, hash: &Hash256) -> bool {
        match self.checkpoint(height) {
            Some(expected) => expected == hash,
            None => true,
        }
    }

    pub fn last_checkpoint_height(&self) -> Option<u32> {
        self.checkpoint_data.checkpoints.keys().next_back().copied()
    }

    /// Checks the genesis constants against each other and the checkpoints.
    pub fn verify(&self) -> Result<(), ParamsError> {
        let bits = self.genesis.bits;
        let decoded = u256_from_compact_target(bits);
        if !decoded.is_valid() || decoded.target.is_zero() {
            return Err(ParamsError::InvalidGenesisBits(bits));
        }
        if decoded.target > self.pow_limit {
            return Err(ParamsError::GenesisTargetAboveLimit);
        }

        let genesis = match &self.genesis_hash {
            Some(hash) => hash,
            None => {
                debug!("{}: genesis hash not pinned, skipping", self.network);
                return Ok(());
            }
        };

        if !check_proof_of_work(genesis, bits, &self.pow_limit) {
            warn!("{}: genesis {} fails nBits {:#010x}", self.network, genesis, bits);
            return Err(ParamsError::GenesisAboveTarget);
        }
        if !self.check_block(0, genesis) {
            return Err(ParamsError::CheckpointMismatch { height: 0 });
        }

        debug!("{}: genesis {} verified", self.network, genesis);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn genesis_bits_follow_pow_limit() {
        assert_eq!(ChainParams::main().genesis.bits, 0x1e07fff0);
        assert_eq!(ChainParams::testnet().genesis.bits, 0x1e07fff0);
        assert_eq!(ChainParams::regtest().genesis.bits, 0x1e0ffff0);
        assert_eq!(
            u256_from_compact_target(0x1e07fff0).target,
            ChainParams::main().pow_limit
        );
    }

    #[test]
    fn all_networks_verify() {
        for network in Network::ALL {
            let params = ChainParams::for_network(network);
            assert_eq!(params.network, network);
            assert_eq!(params.verify(), Ok(()), "{network}");
        }
    }

    #[test]
    fn inherited_values() {
        let main = ChainParams::main();
        let testnet = ChainParams::testnet();
        let regtest = ChainParams::regtest();
        let unit = ChainParams::unit_test();

        assert_eq!(testnet.pow_limit, main.pow_limit);
        assert_eq!(testnet.genesis.reward, 35_000_000);
        assert_eq!(regtest.maturity, testnet.maturity);
        assert_eq!(regtest.genesis_merkle_root, main.genesis_merkle_root);
        assert_eq!(regtest.pow_limit, Uint256::MAX >> 1);
        assert_eq!(unit.checkpoint_data, main.checkpoint_data);
        assert_eq!(unit.message_start, main.message_start);
        assert_ne!(unit.default_port, main.default_port);
    }

    #[test]
    fn checkpoints() {
        let main = ChainParams::main();
        let genesis = main.genesis_hash.unwrap();
        assert_eq!(main.checkpoint(0), Some(&genesis));
        assert_eq!(main.checkpoint(1), None);
        assert!(main.check_block(0, &genesis));
        assert!(!main.check_block(0, &Hash256::ZERO));
        assert!(main.check_block(5, &Hash256::ZERO));
        assert_eq!(main.last_checkpoint_height(), Some(0));

        let regtest = ChainParams::regtest();
        assert_eq!(regtest.checkpoint(0), Some(&Hash256::from(Uint256::ONE)));
    }

    #[test]
    fn verify_rejects_bad_constants() {
        let mut params = ChainParams::main();
        params.genesis.bits = 0x1e87fff0;
        assert_eq!(params.verify(), Err(ParamsError::InvalidGenesisBits(0x1e87fff0)));

        let mut params = ChainParams::main();
        params.genesis.bits = 0x1e0ffff0;
        assert_eq!(params.verify(), Err(ParamsError::GenesisTargetAboveLimit));

        let mut params = ChainParams::main();
        params.genesis_hash = Some(Hash256::from(params.pow_limit + Uint256::ONE));
        assert_eq!(params.verify(), Err(ParamsError::GenesisAboveTarget));

        let mut params = ChainParams::main();
        params.genesis_hash = Some(Hash256::from(Uint256::ONE));
        assert_eq!(
            params.verify(),
            Err(ParamsError::CheckpointMismatch { height: 0 })
        );
    }

    #[test]
    fn network_names() {
        for network in Network::ALL {
            assert_eq!(network.id().parse::<Network>(), Ok(network));
        }
        assert_eq!("testnet".parse::<Network>(), Ok(Network::Testnet));
        assert_eq!(
            "signet".parse::<Network>(),
            Err(ParamsError::UnknownNetwork("signet".into()))
        );
    }

    #[test]
    fn serializes_as_json() {
        let value = serde_json::to_value(ChainParams::main()).unwrap();
        assert_eq!(value["network"], "main");
        assert_eq!(value["message_start"], "13371337");
        assert_eq!(value["genesis"]["bits"], "1e07fff0");
        assert_eq!(value["pow_limit"], MAIN_POW_LIMIT);
        assert_eq!(value["genesis_hash"], &MAIN_GENESIS[2..]);
        assert_eq!(value["checkpoint_data"]["checkpoints"]["0"], &MAIN_GENESIS[2..]);
        assert!(serde_json::to_value(ChainParams::regtest()).unwrap()["genesis_hash"].is_null());
    }
}
