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
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies the network a transaction is signed for.
///
/// The chain ID is part of the signed digest, so a signature produced for one network
/// is rejected by every other network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChainId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ChainId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<NamedChain> for ChainId {
    fn from(value: NamedChain) -> Self {
        Self::new(value.as_str())
    }
}

/// The public Theta networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamedChain {
    #[default]
    Mainnet,
    Testnet,
    Privatenet,
}

impl NamedChain {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NamedChain::Mainnet => "mainnet",
            NamedChain::Testnet => "testnet",
            NamedChain::Privatenet => "privatenet",
        }
    }
}

impl Display for NamedChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chain `{0}`, expected one of: mainnet, testnet, privatenet")]
pub struct UnknownChain(String);

impl FromStr for NamedChain {
    type Err = UnknownChain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(NamedChain::Mainnet),
            "testnet" => Ok(NamedChain::Testnet),
            "privatenet" => Ok(NamedChain::Privatenet),
            _ => Err(UnknownChain(s.to_owned())),
        }
    }
}
