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

use alloy_primitives::{Bytes, U256};
use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use theta_primitives::{parse_address, parse_amount, EncodingError, SendTx};
use theta_signer::{
    address_of, parse_private_key, recover_tx_signer, serialize_tx, sign_tx_with_key,
};

use crate::cli::Cli;

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let raw = run(&cli)?;
    println!("{raw}");

    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<Bytes> {
    let key = parse_private_key(&cli.private_key).context("failed to load the private key")?;
    let key_address = address_of(key.verifying_key());

    let sender = match &cli.from {
        Some(from) => {
            let sender = parse_address(from).context("invalid --from")?;
            if sender != key_address {
                warn!("Sender {sender} is not the address of the signing key {key_address}");
            }
            sender
        }
        None => key_address,
    };
    let receivers = cli
        .receivers
        .iter()
        .map(|receiver| parse_address(receiver))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --to")?;
    let theta_wei = parse_amounts(&cli.theta).context("invalid --theta")?;
    let tfuel_wei = parse_amounts(&cli.tfuel).context("invalid --tfuel")?;
    let fee = parse_amount(&cli.fee).context("invalid --fee")?;

    let tx = SendTx::new(sender, cli.sequence, receivers, theta_wei, tfuel_wei, fee)
        .context("failed to build the send transaction")?;

    let chain_id = cli.chain_id();
    info!(
        "Signing send of {} outputs from {sender} with sequence {} for chain {chain_id}",
        tx.outputs().len(),
        cli.sequence
    );
    let signed = sign_tx_with_key(&chain_id, tx, &key).context("failed to sign")?;
    if recover_tx_signer(&chain_id, &signed)? != key_address {
        anyhow::bail!("signature does not recover the signing key");
    }
    info!("Transaction hash: {}", signed.hash());

    Ok(serialize_tx(&signed))
}

/// Parses an amount list; an empty list means the denomination was not given.
fn parse_amounts(literals: &[String]) -> Result<Option<Vec<U256>>, EncodingError> {
    if literals.is_empty() {
        return Ok(None);
    }
    literals
        .iter()
        .map(|literal| parse_amount(literal))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
