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

use std::fmt::{Display, Formatter};

use alloy_primitives::U256;
use alloy_rlp_derive::RlpEncodable;
use serde::{Deserialize, Serialize};

/// The two denominations a [Coins] value holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denomination {
    /// The staking token.
    Theta,
    /// The gas token; fees are paid in it.
    TFuel,
}

impl Display for Denomination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Denomination::Theta => f.write_str("theta"),
            Denomination::TFuel => f.write_str("tfuel"),
        }
    }
}

/// An amount of both denominations, in wei.
///
/// Each amount is RLP-encoded as its minimal big-endian representation, so a zero
/// amount encodes as the empty string.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, RlpEncodable,
)]
pub struct Coins {
    pub theta_wei: U256,
    pub tfuel_wei: U256,
}

impl Coins {
    pub const ZERO: Coins = Coins::new(U256::ZERO, U256::ZERO);

    pub const fn new(theta_wei: U256, tfuel_wei: U256) -> Self {
        Self {
            theta_wei,
            tfuel_wei,
        }
    }

    /// Coins holding only TFuel, as used for fees.
    pub const fn tfuel(tfuel_wei: U256) -> Self {
        Self::new(U256::ZERO, tfuel_wei)
    }

    pub fn get(&self, denomination: Denomination) -> U256 {
        match denomination {
            Denomination::Theta => self.theta_wei,
            Denomination::TFuel => self.tfuel_wei,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.theta_wei.is_zero() && self.tfuel_wei.is_zero()
    }

    /// Adds per denomination, returning the first denomination that overflows.
    pub fn checked_add(&self, other: &Coins) -> Result<Coins, Denomination> {
        Ok(Coins {
            theta_wei: self
                .theta_wei
                .checked_add(other.theta_wei)
                .ok_or(Denomination::Theta)?,
            tfuel_wei: self
                .tfuel_wei
                .checked_add(other.tfuel_wei)
                .ok_or(Denomination::TFuel)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Coins::ZERO, &hex!("c28080"))]
    #[case(Coins::new(U256::from(100), U256::ZERO), &hex!("c26480"))]
    #[case(Coins::tfuel(U256::from(1)), &hex!("c28001"))]
    #[case(
        Coins::new(U256::from(1_000_000_000_000_000_000u128), U256::from(0x0100)),
        &hex!("cc880de0b6b3a7640000820100")
    )]
    fn zero_amounts_encode_empty(#[case] coins: Coins, #[case] expected: &[u8]) {
        assert_eq!(alloy_rlp::encode(coins), expected);
    }

    #[test]
    fn checked_add() {
        let a = Coins::new(U256::from(1), U256::from(2));
        let b = Coins::tfuel(U256::from(3));
        assert_eq!(a.checked_add(&b), Ok(Coins::new(U256::from(1), U256::from(5))));
        assert_eq!(
            Coins::tfuel(U256::MAX).checked_add(&b),
            Err(Denomination::TFuel)
        );
        assert!(Coins::ZERO.is_zero());
        assert_eq!(a.get(Denomination::TFuel), U256::from(2));
    }
}
