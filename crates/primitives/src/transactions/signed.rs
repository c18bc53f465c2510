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

use alloy_primitives::{Bytes, B256};
use alloy_rlp::{BufMut, Encodable};
use serde::{Deserialize, Serialize};

use super::{signature::TxSignature, TxPayload};
use crate::{chain::ChainId, keccak::keccak};

/// A transaction together with the signature over its digest.
///
/// Only signed transactions can be serialized for broadcast. The signature is
/// attached once, when the unsigned payload is consumed by
/// [TxPayload::into_signed].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction<T> {
    payload: T,
    signature: TxSignature,
}

impl<T: TxPayload> SignedTransaction<T> {
    pub fn new(payload: T, signature: TxSignature) -> Self {
        Self { payload, signature }
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn signature(&self) -> &TxSignature {
        &self.signature
    }

    pub fn into_parts(self) -> (T, TxSignature) {
        (self.payload, self.signature)
    }

    /// Computes the digest the signature was made over.
    pub fn signing_hash(&self, chain_id: &ChainId) -> Option<B256> {
        self.payload.signing_hash(chain_id)
    }

    /// Returns the raw bytes to broadcast: the RLP-encoded type tag followed by the
    /// RLP-encoded payload carrying the signature.
    pub fn serialize(&self) -> Bytes {
        alloy_rlp::encode(self).into()
    }

    /// Computes the transaction hash, the Keccak-256 of the serialized bytes.
    pub fn hash(&self) -> B256 {
        keccak(self.serialize()).into()
    }
}

impl<T: TxPayload> Encodable for SignedTransaction<T> {
    fn encode(&self, out: &mut dyn BufMut) {
        self.payload.tx_type().encode(out);
        self.payload.encode_payload(&self.signature.to_bytes(), out);
    }

    fn length(&self) -> usize {
        self.payload.tx_type().length() + self.payload.payload_length(&self.signature.to_bytes())
    }
}
