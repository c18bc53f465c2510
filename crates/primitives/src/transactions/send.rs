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

use alloy_primitives::{Address, U256};
use alloy_rlp::{BufMut, Encodable, Header};
use alloy_rlp_derive::RlpEncodable;
use serde::{Deserialize, Serialize};

use super::{TxPayload, TxType};
use crate::coins::{Coins, Denomination};

/// Reasons a send transaction cannot be built from the given amounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTransactionShape {
    #[error("a send transaction needs at least one receiver")]
    NoOutputs,
    #[error("neither theta nor tfuel amounts were given")]
    NoDenomination,
    #[error("{amounts} {denomination} amounts given for {outputs} receivers")]
    AmountCountMismatch {
        denomination: Denomination,
        amounts: usize,
        outputs: usize,
    },
    #[error("total {denomination} amount exceeds 256 bits")]
    AmountOverflow { denomination: Denomination },
    #[error("input coins differ from the outputs plus the fee")]
    UnbalancedInput,
}

/// The sending side of a transfer.
///
/// `coins` is the total withdrawn from `address`, fee included. The signature slot
/// is not stored here; it is passed in when the input gets encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub address: Address,
    pub coins: Coins,
    /// Strictly increasing per sender, which prevents replays.
    pub sequence: u64,
}

impl TxInput {
    fn fields_length(&self, signature: &[u8]) -> usize {
        self.address.length()
            + self.coins.length()
            + self.sequence.length()
            + signature.length()
    }

    /// Returns the length of the input encoded with `signature`.
    pub fn length_with_signature(&self, signature: &[u8]) -> usize {
        let payload_length = self.fields_length(signature);
        payload_length + alloy_rlp::length_of_length(payload_length)
    }

    /// Encodes `[address, coins, sequence, signature]`.
    pub fn encode_with_signature(&self, signature: &[u8], out: &mut dyn BufMut) {
        Header {
            list: true,
            payload_length: self.fields_length(signature),
        }
        .encode(out);
        self.address.encode(out);
        self.coins.encode(out);
        self.sequence.encode(out);
        signature.encode(out);
    }
}

/// The receiving side of a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, RlpEncodable)]
pub struct TxOutput {
    pub address: Address,
    pub coins: Coins,
}

/// Transfers coins from one sender to one or more receivers.
///
/// The input always withdraws exactly the sum of all outputs plus the fee; the
/// constructors compute it, and deserialization rejects values that break it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SendTxParts")]
pub struct SendTx {
    fee: Coins,
    input: TxInput,
    outputs: Vec<TxOutput>,
}

#[derive(Deserialize)]
struct SendTxParts {
    fee: Coins,
    input: TxInput,
    outputs: Vec<TxOutput>,
}

impl TryFrom<SendTxParts> for SendTx {
    type Error = InvalidTransactionShape;

    fn try_from(parts: SendTxParts) -> Result<Self, Self::Error> {
        let tx = SendTx::from_outputs(
            parts.input.address,
            parts.input.sequence,
            parts.outputs,
            parts.fee,
        )?;
        if tx.input.coins != parts.input.coins {
            return Err(InvalidTransactionShape::UnbalancedInput);
        }
        Ok(tx)
    }
}

impl SendTx {
    /// Builds a transfer from parallel receiver and amount lists.
    ///
    /// Each amount list that is given must have one entry per receiver, and at least
    /// one must be given; a missing list means zero of that denomination. The fee is
    /// charged in TFuel.
    pub fn new(
        sender: Address,
        sequence: u64,
        receivers: Vec<Address>,
        theta_wei: Option<Vec<U256>>,
        tfuel_wei: Option<Vec<U256>>,
        fee_tfuel_wei: U256,
    ) -> Result<Self, InvalidTransactionShape> {
        if receivers.is_empty() {
            return Err(InvalidTransactionShape::NoOutputs);
        }
        if theta_wei.is_none() && tfuel_wei.is_none() {
            return Err(InvalidTransactionShape::NoDenomination);
        }
        let theta_wei = amounts_per_receiver(Denomination::Theta, theta_wei, receivers.len())?;
        let tfuel_wei = amounts_per_receiver(Denomination::TFuel, tfuel_wei, receivers.len())?;

        let outputs = receivers
            .into_iter()
            .zip(theta_wei.into_iter().zip(tfuel_wei))
            .map(|(address, (theta, tfuel))| TxOutput {
                address,
                coins: Coins::new(theta, tfuel),
            })
            .collect();

        Self::from_outputs(sender, sequence, outputs, Coins::tfuel(fee_tfuel_wei))
    }

    /// Builds a transfer from ready-made outputs, deriving the input coins.
    pub fn from_outputs(
        sender: Address,
        sequence: u64,
        outputs: Vec<TxOutput>,
        fee: Coins,
    ) -> Result<Self, InvalidTransactionShape> {
        if outputs.is_empty() {
            return Err(InvalidTransactionShape::NoOutputs);
        }
        let coins = outputs
            .iter()
            .try_fold(fee, |total, output| total.checked_add(&output.coins))
            .map_err(|denomination| InvalidTransactionShape::AmountOverflow { denomination })?;

        Ok(Self {
            fee,
            input: TxInput {
                address: sender,
                coins,
                sequence,
            },
            outputs,
        })
    }

    pub fn fee(&self) -> &Coins {
        &self.fee
    }

    pub fn input(&self) -> &TxInput {
        &self.input
    }

    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    fn fields_length(&self, signature: &[u8]) -> usize {
        let input_length = self.input.length_with_signature(signature);
        self.fee.length()
            + input_length
            + alloy_rlp::length_of_length(input_length)
            + self.outputs.length()
    }
}

fn amounts_per_receiver(
    denomination: Denomination,
    amounts: Option<Vec<U256>>,
    receivers: usize,
) -> Result<Vec<U256>, InvalidTransactionShape> {
    match amounts {
        None => Ok(vec![U256::ZERO; receivers]),
        Some(amounts) if amounts.len() == receivers => Ok(amounts),
        Some(amounts) => Err(InvalidTransactionShape::AmountCountMismatch {
            denomination,
            amounts: amounts.len(),
            outputs: receivers,
        }),
    }
}

impl TxPayload for SendTx {
    fn tx_type(&self) -> TxType {
        TxType::Send
    }

    fn payload_length(&self, signature: &[u8]) -> usize {
        let payload_length = self.fields_length(signature);
        payload_length + alloy_rlp::length_of_length(payload_length)
    }

    /// Encodes `[fee, [input], [outputs...]]`.
    fn encode_payload(&self, signature: &[u8], out: &mut dyn BufMut) {
        Header {
            list: true,
            payload_length: self.fields_length(signature),
        }
        .encode(out);
        self.fee.encode(out);
        Header {
            list: true,
            payload_length: self.input.length_with_signature(signature),
        }
        .encode(out);
        self.input.encode_with_signature(signature, out);
        self.outputs.encode(out);
    }
}
