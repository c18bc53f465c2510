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

//! Signs Theta transactions and serializes them for broadcast.
//!
//! Signing hashes the transaction's signing bytes with Keccak-256, signs the digest
//! with secp256k1 and attaches the signature to the transaction. Private keys are
//! only ever borrowed and are never logged.

use alloy_primitives::{Address, Bytes};
use k256::ecdsa::SigningKey;
use log::{debug, trace};
use theta_primitives::{ChainId, SignedTransaction, TxPayload};

pub mod ecdsa;

pub use ecdsa::{address_of, parse_private_key, recover_signer, sign_prehash, THETA_V_OFFSET};

/// Errors raised while signing.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// The private key is malformed or out of range. The key itself is never included.
    #[error("invalid private key")]
    InvalidKey,
    #[error("signing failed: {0}")]
    Signing(#[from] k256::ecdsa::Error),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    #[error("signing bytes hash to the null digest")]
    NullDigest,
}

/// Signs `tx` for `chain_id` with a hex encoded private key.
///
/// Key errors are only raised here, when the key is actually used.
pub fn sign_tx<T: TxPayload>(
    chain_id: &ChainId,
    tx: T,
    private_key: &str,
) -> Result<SignedTransaction<T>, SignerError> {
    let key = parse_private_key(private_key)?;
    sign_tx_with_key(chain_id, tx, &key)
}

/// Signs `tx` for `chain_id` with an already parsed key.
pub fn sign_tx_with_key<T: TxPayload>(
    chain_id: &ChainId,
    tx: T,
    key: &SigningKey,
) -> Result<SignedTransaction<T>, SignerError> {
    trace!("Signing {:?} transaction for chain {chain_id}", tx.tx_type());
    let digest = tx.signing_hash(chain_id).ok_or(SignerError::NullDigest)?;
    debug!(
        "Signing digest {digest} with key of {}",
        address_of(key.verifying_key())
    );

    let signature = sign_prehash(&digest, key, THETA_V_OFFSET)?;
    Ok(tx.into_signed(signature))
}

/// Returns the raw bytes of a signed transaction, ready for broadcast.
pub fn serialize_tx<T: TxPayload>(tx: &SignedTransaction<T>) -> Bytes {
    tx.serialize()
}

/// Signs `tx` and serializes the result in one step.
pub fn sign_and_serialize_tx<T: TxPayload>(
    chain_id: &ChainId,
    tx: T,
    private_key: &str,
) -> Result<Bytes, SignerError> {
    let signed = sign_tx(chain_id, tx, private_key)?;
    Ok(serialize_tx(&signed))
}

/// Recovers the sender of a signed transaction, to check a signature before it is
/// broadcast.
pub fn recover_tx_signer<T: TxPayload>(
    chain_id: &ChainId,
    tx: &SignedTransaction<T>,
) -> Result<Address, SignerError> {
    let digest = tx.signing_hash(chain_id).ok_or(SignerError::NullDigest)?;
    recover_signer(&digest, tx.signature(), THETA_V_OFFSET)
}
