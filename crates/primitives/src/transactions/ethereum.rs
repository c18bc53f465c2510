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

use alloy_primitives::{Address, Bytes, U256};
use alloy_rlp_derive::RlpEncodable;

/// A legacy Ethereum transaction used only as the container of a signing digest.
///
/// Every field except `input` is zero, so generic ECDSA tooling that expects a
/// conventional transaction shape can hash and recover Theta signatures. It is never
/// broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Default, RlpEncodable)]
pub struct EthereumTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
}

impl EthereumTx {
    /// Wraps `input` into an otherwise empty transaction.
    pub fn wrap(input: Bytes) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::bytes;
    use hex_literal::hex;

    use super::*;

    #[test]
    fn zero_valued_envelope() {
        let tx = EthereumTx::wrap(bytes!("0102"));
        assert_eq!(
            alloy_rlp::encode(tx),
            hex!("dc80808094000000000000000000000000000000000000000080820102")
        );
    }
}
