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

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use alloy_rlp::{BufMut, Encodable, Header};

/// Errors raised when a literal cannot be turned into an encodable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("invalid numeric literal `{0}`")]
    InvalidNumber(String),
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
}

/// A value of the RLP data model: a byte string or an ordered list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Returns the byte string holding the minimal big-endian form of `value`.
    /// Zero becomes the empty string.
    pub fn number(value: U256) -> Self {
        RlpItem::Bytes(minimal_be_bytes(value))
    }

    fn payload_length(&self) -> usize {
        match self {
            RlpItem::Bytes(bytes) => bytes.len(),
            RlpItem::List(items) => items.iter().map(Encodable::length).sum(),
        }
    }
}

impl From<&[u8]> for RlpItem {
    fn from(value: &[u8]) -> Self {
        RlpItem::Bytes(value.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(value: Vec<RlpItem>) -> Self {
        RlpItem::List(value)
    }
}

impl Encodable for RlpItem {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            RlpItem::Bytes(bytes) => bytes.as_slice().encode(out),
            RlpItem::List(items) => {
                Header {
                    list: true,
                    payload_length: self.payload_length(),
                }
                .encode(out);
                items.iter().for_each(|item| item.encode(out));
            }
        }
    }

    #[inline]
    fn length(&self) -> usize {
        match self {
            RlpItem::Bytes(bytes) => bytes.as_slice().length(),
            RlpItem::List(_) => {
                let payload_length = self.payload_length();
                payload_length + alloy_rlp::length_of_length(payload_length)
            }
        }
    }
}

/// RLP-encodes a value.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    alloy_rlp::encode(item)
}

/// Returns the big-endian bytes of `value` without leading zeros.
pub fn minimal_be_bytes(value: U256) -> Vec<u8> {
    let bytes = value.to_be_bytes::<32>();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}

/// Parses an amount given either in decimal or as `0x`-prefixed hex.
pub fn parse_amount(literal: &str) -> Result<U256, EncodingError> {
    let invalid = || EncodingError::InvalidNumber(literal.to_owned());
    // an empty digit string would otherwise parse as zero
    if literal.strip_prefix("0x").unwrap_or(literal).is_empty() {
        return Err(invalid());
    }
    U256::from_str(literal).map_err(|_| invalid())
}

/// Parses a 20-byte address. The `0x` prefix is optional and the case is ignored.
pub fn parse_address(literal: &str) -> Result<Address, EncodingError> {
    Address::from_str(literal).map_err(|_| EncodingError::InvalidAddress(literal.to_owned()))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    fn bytes(value: &[u8]) -> RlpItem {
        RlpItem::from(value)
    }

    #[test]
    fn strings() {
        assert_eq!(encode(&bytes(b"")), hex!("80"));
        assert_eq!(encode(&bytes(&[0x00])), hex!("00"));
        assert_eq!(encode(&bytes(&[0x7f])), hex!("7f"));
        assert_eq!(encode(&bytes(&[0x80])), hex!("8180"));
        assert_eq!(encode(&bytes(b"dog")), hex!("83646f67"));

        let lorem = b"Lorem ipsum dolor sit amet, consectetur adipisicing elit";
        let encoded = encode(&bytes(lorem));
        assert_eq!(encoded[..2], hex!("b838"));
        assert_eq!(&encoded[2..], lorem);
    }

    #[test]
    fn numbers() {
        assert_eq!(encode(&RlpItem::number(U256::ZERO)), hex!("80"));
        assert_eq!(encode(&RlpItem::number(U256::from(15))), hex!("0f"));
        assert_eq!(encode(&RlpItem::number(U256::from(1024))), hex!("820400"));
        // agrees with the native encoding of integers
        let value = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(encode(&RlpItem::number(value)), alloy_rlp::encode(value));
    }

    #[test]
    fn lists() {
        assert_eq!(encode(&RlpItem::List(vec![])), hex!("c0"));
        assert_eq!(
            encode(&vec![bytes(b"cat"), bytes(b"dog")].into()),
            hex!("c88363617483646f67")
        );

        // the set theoretical representation of three
        let zero = RlpItem::List(vec![]);
        let one = RlpItem::List(vec![zero.clone()]);
        let two = RlpItem::List(vec![zero.clone(), one.clone()]);
        let three = RlpItem::List(vec![zero, one, two]);
        assert_eq!(encode(&three), hex!("c7c0c1c0c3c0c1c0"));
        assert_eq!(three.length(), 8);

        let long = RlpItem::List(vec![bytes(&[0xab; 60])]);
        let encoded = encode(&long);
        assert_eq!(encoded[..3], hex!("f83eb8"));
        assert_eq!(encoded.len(), long.length());
    }

    #[test]
    fn minimal_bytes() {
        assert!(minimal_be_bytes(U256::ZERO).is_empty());
        assert_eq!(minimal_be_bytes(U256::from(0x0100)), vec![0x01, 0x00]);
        assert_eq!(minimal_be_bytes(U256::MAX), vec![0xff; 32]);
    }

    #[rstest]
    #[case("0", U256::ZERO)]
    #[case("100", U256::from(100))]
    #[case("0x64", U256::from(100))]
    #[case("1000000000000000000", U256::from(1_000_000_000_000_000_000u128))]
    fn amounts(#[case] literal: &str, #[case] expected: U256) {
        assert_eq!(parse_amount(literal).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("0x")]
    #[case("-1")]
    #[case("0xzz")]
    #[case("12ab")]
    fn malformed_amounts(#[case] literal: &str) {
        assert_eq!(
            parse_amount(literal),
            Err(EncodingError::InvalidNumber(literal.to_owned()))
        );
    }

    #[test]
    fn addresses() {
        let expected = address!("2c7536e3605d9c16a7a3d7b1898e529396a65c23");
        assert_eq!(
            parse_address("0x2C7536E3605D9C16a7a3D7b1898e529396a65c23").unwrap(),
            expected
        );
        assert_eq!(
            parse_address("2c7536e3605d9c16a7a3d7b1898e529396a65c23").unwrap(),
            expected
        );
        assert!(matches!(
            parse_address("0x2c7536"),
            Err(EncodingError::InvalidAddress(_))
        ));
    }
}
