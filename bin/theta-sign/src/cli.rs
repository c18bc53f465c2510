// Copyright 2024 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use theta_primitives::{ChainId, NamedChain};

/// Default fee: 0.3 TFuel.
pub const DEFAULT_FEE: &str = "300000000000000000";

#[derive(clap::Parser, Clone)]
#[command(name = "theta-sign")]
#[command(bin_name = "theta-sign")]
#[command(author, version, about, long_about = None)]
/// Build and sign a Theta send transaction, printing the raw bytes to broadcast
pub struct Cli {
    #[clap(short = 'c', long, require_equals = true, env = "THETA_CHAIN", default_value_t)]
    /// Network to sign the transaction for [mainnet, testnet, privatenet]
    pub chain: NamedChain,

    #[clap(long, require_equals = true, env = "THETA_CHAIN_ID")]
    /// Custom chain ID; takes precedence over `--chain`
    pub chain_id: Option<String>,

    #[clap(short = 'f', long, require_equals = true)]
    /// Sender address
    ///
    /// [default: the address of the signing key]
    pub from: Option<String>,

    #[clap(short = 's', long, require_equals = true)]
    /// Sequence number of the sender's next transaction
    pub sequence: u64,

    #[clap(short = 't', long = "to", require_equals = true, required = true)]
    /// Receiver address; repeat for every receiver
    pub receivers: Vec<String>,

    #[clap(long, require_equals = true)]
    /// Theta wei sent to each receiver, in receiver order; decimal or 0x-hex
    pub theta: Vec<String>,

    #[clap(long, require_equals = true)]
    /// TFuel wei sent to each receiver, in receiver order; decimal or 0x-hex
    pub tfuel: Vec<String>,

    #[clap(long, require_equals = true, default_value = DEFAULT_FEE)]
    /// Fee in TFuel wei
    pub fee: String,

    #[clap(long, env = "THETA_PRIVATE_KEY", hide_env_values = true)]
    /// Hex encoded private key of the sender
    pub private_key: String,
}

impl Cli {
    pub fn chain_id(&self) -> ChainId {
        match &self.chain_id {
            Some(chain_id) => ChainId::from(chain_id.as_str()),
            None => ChainId::from(self.chain),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn chain_id_override() {
        let cli = Cli::try_parse_from([
            "theta-sign",
            "--chain=testnet",
            "--sequence=1",
            "--to=0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
            "--private-key=00",
        ])
        .unwrap();
        assert_eq!(cli.chain_id(), ChainId::from("testnet"));
        assert_eq!(cli.fee, DEFAULT_FEE);

        let cli = Cli {
            chain_id: Some("localnet".to_owned()),
            ..cli
        };
        assert_eq!(cli.chain_id(), ChainId::from("localnet"));
    }

    #[test]
    fn receivers_required() {
        assert!(Cli::try_parse_from(["theta-sign", "--sequence=1", "--private-key=00"]).is_err());
    }
}
