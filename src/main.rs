use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, LevelFilter};
use serde_json::json;
use sling_arith::chainparams::{ChainParams, Network};
use sling_arith::pow::{
    block_proof, check_proof_of_work, difficulty, u256_from_compact_target,
    u256_to_compact_target,
};
use sling_arith::{Hash256, Uint256};

#[derive(Parser)]
struct Args {
    #[clap(short, long, value_parser, default_value = "main")]
    network: Network,
    #[clap(short, long)]
    debug: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode compact nBits into a 256-bit target
    Decode {
        #[clap(value_parser = parse_bits)]
        bits: u32,
    },
    /// Encode a hex target as compact nBits
    Encode {
        target: String,
        #[clap(long)]
        negative: bool,
    },
    /// Print the network parameters as JSON
    Params,
    /// Check the genesis constants and checkpoints
    Verify,
    /// Check a block hash against compact nBits
    CheckPow {
        hash: String,
        #[clap(value_parser = parse_bits)]
        bits: u32,
    },
}

fn parse_bits(s: &str) -> Result<u32, std::num::ParseIntError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .filter_module("sling_arith", level)
        .init();

    let params = ChainParams::for_network(args.network);
    debug!("Selected network {}", params.network);

    match args.command {
        Command::Decode { bits } => {
            let decoded = u256_from_compact_target(bits);
            let out = json!({
                "bits": format!("{:08x}", bits),
                "target": decoded.target,
                "negative": decoded.negative,
                "overflow": decoded.overflow,
                "difficulty": difficulty(bits, &params.pow_limit),
                "work": block_proof(bits),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Encode { target, negative } => {
            let target = Uint256::from_hex_strict(&target)
                .with_context(|| format!("Invalid target {target:?}"))?;
            println!("{:08x}", u256_to_compact_target(&target, negative));
        }
        Command::Params => {
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Command::Verify => {
            params.verify()?;
            info!("Parameters for {} are consistent", params.network);
        }
        Command::CheckPow { hash, bits } => {
            let hash: Hash256 = hash
                .parse()
                .with_context(|| format!("Invalid hash {hash:?}"))?;
            let ok = check_proof_of_work(&hash, bits, &params.pow_limit);
            info!("{hash} {} nBits {bits:08x}", if ok { "meets" } else { "fails" });
            if !ok {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::{parse_bits, Args, Command};
    use clap::Parser;
    use sling_arith::chainparams::Network;

    #[test]
    fn bits_accept_prefix() {
        assert_eq!(parse_bits("0x1e07fff0"), Ok(0x1e07fff0));
        assert_eq!(parse_bits("1d00ffff"), Ok(0x1d00ffff));
        assert!(parse_bits("0x1g").is_err());
        assert!(parse_bits("1ffffffff").is_err());
    }

    #[test]
    fn args() {
        let args = Args::try_parse_from(["sling-arith", "-n", "testnet", "decode", "0x1e07fff0"])
            .unwrap();
        assert_eq!(args.network, Network::Testnet);
        assert!(matches!(args.command, Command::Decode { bits: 0x1e07fff0 }));

        let args = Args::try_parse_from(["sling-arith", "encode", "--negative", "0x1234"]).unwrap();
        assert_eq!(args.network, Network::Main);
        assert!(matches!(args.command, Command::Encode { negative: true, .. }));

        assert!(Args::try_parse_from(["sling-arith", "-n", "signet", "params"]).is_err());
    }
}
