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

use alloy_primitives::B256;
use alloy_rlp::{BufMut, Encodable};

use self::{ethereum::EthereumTx, signature::TxSignature, signed::SignedTransaction};
use crate::{chain::ChainId, keccak};

pub mod ethereum;
pub mod send;
pub mod signature;
pub mod signed;

/// Numeric tag identifying the transaction variant on the wire.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum TxType {
    Coinbase = 0,
    Slash = 1,
    /// Transfer from a single sender to one or more receivers.
    Send = 2,
    ReserveFund = 3,
    ReleaseFund = 4,
    ServicePayment = 5,
    SplitRule = 6,
    SmartContract = 7,
    DepositStake = 8,
    WithdrawStake = 9,
    DepositStakeV2 = 10,
    StakeRewardDistribution = 11,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type {0}")]
pub struct UnknownTxType(pub u8);

impl TryFrom<u8> for TxType {
    type Error = UnknownTxType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => TxType::Coinbase,
            1 => TxType::Slash,
            2 => TxType::Send,
            3 => TxType::ReserveFund,
            4 => TxType::ReleaseFund,
            5 => TxType::ServicePayment,
            6 => TxType::SplitRule,
            7 => TxType::SmartContract,
            8 => TxType::DepositStake,
            9 => TxType::WithdrawStake,
            10 => TxType::DepositStakeV2,
            11 => TxType::StakeRewardDistribution,
            _ => return Err(UnknownTxType(value)),
        })
    }
}

impl Encodable for TxType {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        (*self as u8).encode(out)
    }

    #[inline]
    fn length(&self) -> usize {
        (*self as u8).length()
    }
}

/// A transaction variant that can be signed and broadcast.
///
/// The payload carries a single signature slot. Encoding methods take the content of
/// that slot as a parameter: the empty slot while computing the digest to sign, and
/// the attached signature once the transaction is signed.
pub trait TxPayload {
    /// Returns the wire tag of this variant.
    fn tx_type(&self) -> TxType;

    /// Returns the length of the RLP-encoded payload in bytes.
    fn payload_length(&self, signature: &[u8]) -> usize;

    /// Encodes the payload with `signature` in the signature slot.
    fn encode_payload(&self, signature: &[u8], out: &mut dyn BufMut);

    /// Returns the RLP-encoded payload with an empty signature slot.
    fn unsigned_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload_length(&[]));
        self.encode_payload(&[], &mut out);
        out
    }

    /// Returns the bytes whose Keccak-256 digest gets signed.
    ///
    /// The chain ID, the type tag and the unsigned payload are RLP-encoded back to
    /// back and wrapped as the input data of an otherwise empty [EthereumTx].
    fn signing_bytes(&self, chain_id: &ChainId) -> Vec<u8> {
        let mut data = Vec::with_capacity(
            chain_id.as_bytes().length() + self.tx_type().length() + self.payload_length(&[]),
        );
        chain_id.as_bytes().encode(&mut data);
        self.tx_type().encode(&mut data);
        self.encode_payload(&[], &mut data);

        alloy_rlp::encode(EthereumTx::wrap(data.into()))
    }

    /// Computes the digest to sign for `chain_id`.
    ///
    /// Returns `None` if the digest is the null hash.
    fn signing_hash(&self, chain_id: &ChainId) -> Option<B256> {
        keccak::hash(self.signing_bytes(chain_id))
    }

    /// Attaches `signature`, turning the transaction into its signed form.
    fn into_signed(self, signature: TxSignature) -> SignedTransaction<Self>
    where
        Self: Sized,
    {
        SignedTransaction::new(self, signature)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn tags() {
        assert_eq!(TxType::try_from(2), Ok(TxType::Send));
        assert_eq!(TxType::try_from(11), Ok(TxType::StakeRewardDistribution));
        assert_eq!(TxType::try_from(12), Err(UnknownTxType(12)));
        assert_eq!(alloy_rlp::encode(TxType::Send), hex!("02"));
        // zero follows the integer rule and encodes as the empty string
        assert_eq!(alloy_rlp::encode(TxType::Coinbase), hex!("80"));
    }
}
