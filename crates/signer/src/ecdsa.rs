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

use alloy_primitives::{hex, Address, B256};
use k256::{
    ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
};
use theta_primitives::{keccak::keccak, TxSignature};

use crate::SignerError;

/// Offset added to the recovery ID to form `v`. Theta uses the raw recovery ID.
pub const THETA_V_OFFSET: u8 = 0;

/// Parses a hex encoded secp256k1 private key, with or without `0x` prefix.
pub fn parse_private_key(key: &str) -> Result<SigningKey, SignerError> {
    let bytes = hex::decode(key.trim()).map_err(|_| SignerError::InvalidKey)?;
    if bytes.len() != 32 {
        return Err(SignerError::InvalidKey);
    }
    SigningKey::from_slice(&bytes).map_err(|_| SignerError::InvalidKey)
}

/// Returns the address controlled by `key`: the last 20 bytes of the Keccak-256 of
/// the uncompressed public key.
pub fn address_of(key: &VerifyingKey) -> Address {
    let public_key = key.to_encoded_point(false);
    let public_key = public_key.as_bytes();
    debug_assert_eq!(public_key[0], 0x04);
    let hash = keccak(&public_key[1..]);

    Address::from_slice(&hash[12..])
}

/// Signs a 32-byte digest.
///
/// The nonce is derived deterministically (RFC 6979), so equal inputs always yield
/// equal signatures. `s` is normalized to the lower half of the curve order and the
/// recovery ID adjusted to match.
pub fn sign_prehash(
    digest: &B256,
    key: &SigningKey,
    v_offset: u8,
) -> Result<TxSignature, SignerError> {
    let (signature, recovery_id) = key.sign_prehash_recoverable(digest.as_slice())?;
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(normalized) => (
            normalized,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    };
    let v = recovery_id
        .to_byte()
        .checked_add(v_offset)
        .ok_or_else(|| SignerError::InvalidSignature(format!("v offset {v_offset} too large")))?;
    let (r, s) = signature.split_bytes();

    Ok(TxSignature {
        v,
        r: B256::from_slice(&r),
        s: B256::from_slice(&s),
    })
}

/// Recovers the address whose key produced `signature` over `digest`.
pub fn recover_signer(
    digest: &B256,
    signature: &TxSignature,
    v_offset: u8,
) -> Result<Address, SignerError> {
    let recovery_id = signature
        .v
        .checked_sub(v_offset)
        .and_then(RecoveryId::from_byte)
        .ok_or_else(|| SignerError::InvalidSignature(format!("v {} invalid", signature.v)))?;
    let signature = Signature::from_scalars(signature.r.0, signature.s.0)
        .map_err(|_| SignerError::InvalidSignature("r, s invalid".to_owned()))?;
    let verifying_key =
        VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
            .map_err(|_| SignerError::InvalidSignature("public key unrecoverable".to_owned()))?;

    Ok(address_of(&verifying_key))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, b256, U256};
    use rstest::rstest;

    use super::*;

    const KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn key_address() {
        let key = parse_private_key(KEY).unwrap();
        assert_eq!(
            address_of(key.verifying_key()),
            address!("2c7536e3605d9c16a7a3d7b1898e529396a65c23")
        );
        // the prefix is optional
        let prefixed = parse_private_key(&format!("0x{KEY}")).unwrap();
        assert_eq!(prefixed.verifying_key(), key.verifying_key());
    }

    #[rstest]
    #[case("")]
    #[case("0x")]
    #[case("0x4c0883a6")]
    #[case("zz0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318")]
    #[case("4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f36231800")]
    #[case("0000000000000000000000000000000000000000000000000000000000000000")]
    #[case("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")]
    fn invalid_keys(#[case] key: &str) {
        assert!(matches!(
            parse_private_key(key),
            Err(SignerError::InvalidKey)
        ));
    }

    #[test]
    fn deterministic_low_s() {
        let key = parse_private_key(KEY).unwrap();
        let digest = b256!("2b24fc72afaf5c65eaf228b668fa1e63fc6a3e4f1e6ef9da27c2302ebf9b0bc5");

        let signature = sign_prehash(&digest, &key, THETA_V_OFFSET).unwrap();
        assert_eq!(
            signature,
            TxSignature {
                v: 1,
                r: b256!("6472b75376319fbc0bcfe33a877609e4dae35ff52ef722a664bd849389b7494f"),
                s: b256!("7da60d922b36ee45edf4a55cdba19d421a08285f789d8ae2cd8c0725321a1b51"),
            }
        );
        assert_eq!(sign_prehash(&digest, &key, THETA_V_OFFSET).unwrap(), signature);

        // half the secp256k1 group order
        let half_order = U256::from_be_slice(&b256!(
            "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0"
        )[..]);
        assert!(U256::from_be_slice(&signature.s[..]) <= half_order);
    }

    #[test]
    fn v_offset() {
        let key = parse_private_key(KEY).unwrap();
        let digest = b256!("2b24fc72afaf5c65eaf228b668fa1e63fc6a3e4f1e6ef9da27c2302ebf9b0bc5");

        let signature = sign_prehash(&digest, &key, 27).unwrap();
        assert_eq!(signature.v, 28);
        assert_eq!(
            recover_signer(&digest, &signature, 27).unwrap(),
            address!("2c7536e3605d9c16a7a3d7b1898e529396a65c23")
        );
        assert!(sign_prehash(&digest, &key, u8::MAX).is_err());
    }

    #[test]
    fn recover() {
        let key = parse_private_key(KEY).unwrap();
        let digest = b256!("f5a5301085f34888b8f4b4f5e3f21b451d024bdff6e2fe66ecd12ff26fc2d180");
        let signature = sign_prehash(&digest, &key, THETA_V_OFFSET).unwrap();
        assert_eq!(signature.v, 0);
        assert_eq!(
            recover_signer(&digest, &signature, THETA_V_OFFSET).unwrap(),
            address_of(key.verifying_key())
        );

        let invalid = TxSignature {
            v: 4,
            ..signature
        };
        assert!(matches!(
            recover_signer(&digest, &invalid, THETA_V_OFFSET),
            Err(SignerError::InvalidSignature(_))
        ));
    }
}
