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
use serde::{Deserialize, Serialize};

/// Length of a signature on the wire.
pub const SIGNATURE_LENGTH: usize = 65;

/// Represents a recoverable secp256k1 signature over a transaction digest.
///
/// `v` is the recovery ID plus a chain specific offset (zero for Theta), `r` and `s`
/// are the big-endian scalars, left padded to 32 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxSignature {
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl TxSignature {
    /// Returns the wire form `r ‖ s ‖ v`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(self.r.as_slice());
        bytes[32..64].copy_from_slice(self.s.as_slice());
        bytes[64] = self.v;
        bytes
    }

    /// Parses the wire form `r ‖ s ‖ v`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != SIGNATURE_LENGTH {
            return None;
        }
        Some(Self {
            r: B256::from_slice(&bytes[..32]),
            s: B256::from_slice(&bytes[32..64]),
            v: bytes[64],
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;

    use super::*;

    #[test]
    fn wire_form() {
        let signature = TxSignature {
            v: 1,
            r: b256!("00000000000000000000000000000000000000000000000000000000000000aa"),
            s: b256!("bb00000000000000000000000000000000000000000000000000000000000000"),
        };
        let bytes = signature.to_bytes();
        assert_eq!(bytes[31], 0xaa);
        assert_eq!(bytes[32], 0xbb);
        assert_eq!(bytes[64], 1);
        assert_eq!(TxSignature::from_bytes(&bytes), Some(signature));
        assert_eq!(TxSignature::from_bytes(&bytes[..64]), None);
    }
}
