use crate::ConfigError;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Substrate-based networks the wallet core can talk to.
///
/// The network decides the SS58 version byte of addresses, the display
/// parameters of balances and the block time the node client derives its
/// read cache TTL from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    Polkadot,
    Kusama,
    Westend,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Polkadot, Network::Kusama, Network::Westend];

    /// SS58 version byte prepended to encoded addresses
    pub fn ss58_format(&self) -> u8 {
        match self {
            Network::Polkadot => 0,
            Network::Kusama => 2,
            Network::Westend => 42,
        }
    }

    pub fn decimals(&self) -> u8 {
        match self {
            Network::Polkadot => 10,
            Network::Kusama | Network::Westend => 12,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Network::Polkadot => "DOT",
            Network::Kusama => "KSM",
            Network::Westend => "WND",
        }
    }

    /// Target block time. All three relay chains produce a block every 6 seconds.
    pub fn block_time(&self) -> Duration {
        Duration::from_millis(6_000)
    }

    /// TTL of cached node reads: a third of a block.
    pub fn cache_ttl(&self) -> Duration {
        self.block_time() / 3
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Polkadot => "polkadot",
            Network::Kusama => "kusama",
            Network::Westend => "westend",
        }
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "polkadot" | "dot" => Ok(Network::Polkadot),
            "kusama" | "ksm" => Ok(Network::Kusama),
            "westend" | "wnd" => Ok(Network::Westend),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
