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

//! Transaction primitives for the Theta ledger: the RLP codec, coin pairs, the
//! multi-output send transaction and the Ethereum-compatible signing envelope.

pub mod chain;
pub mod coins;
pub mod keccak;
pub mod rlp;
pub mod transactions;

pub use alloy_primitives::{Address, Bytes, B256, U256};
pub use alloy_rlp;

pub use chain::{ChainId, NamedChain};
pub use coins::{Coins, Denomination};
pub use rlp::{parse_address, parse_amount, EncodingError, RlpItem};
pub use transactions::{
    send::{InvalidTransactionShape, SendTx, TxInput, TxOutput},
    signature::TxSignature,
    signed::SignedTransaction,
    TxPayload, TxType,
};
