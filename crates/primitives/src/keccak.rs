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

use alloy_primitives::{b256, B256};
use sha3::{Digest, Keccak256};

/// Keccak hash of an empty slice.
pub const KECCAK_EMPTY: B256 =
    b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

/// Computes the Keccak-256 hash.
#[inline]
pub fn keccak(data: impl AsRef<[u8]>) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Computes the Keccak-256 digest that gets signed.
///
/// Returns `None` if the digest equals the null hash [KECCAK_EMPTY], which is never
/// accepted as the digest of a payload.
pub fn hash(data: impl AsRef<[u8]>) -> Option<B256> {
    let digest = B256::from(keccak(data));
    (digest != KECCAK_EMPTY).then_some(digest)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::b256;

    use super::*;

    #[test]
    fn empty_input_hashes_to_null() {
        assert_eq!(B256::from(keccak(b"")), KECCAK_EMPTY);
        assert_eq!(hash(b""), None);
    }

    #[test]
    fn digest() {
        assert_eq!(
            hash(b"abc"),
            Some(b256!(
                "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
            ))
        );
    }
}
