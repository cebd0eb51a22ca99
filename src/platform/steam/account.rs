//! Steam account identifiers
//!
//! The catalog is keyed by the 32-bit account id (the `n` of a SteamID3
//! `[U:1:n]`), which is also the name of the account's `userdata` directory.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ConfigError;

/// Individual-account base of the SteamID64 space
const STEAM64_BASE: u64 = 76561197960265728;

static STEAM_ID3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[U:1:(\d+)\]$").expect("SteamID3 pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u32);

impl AccountId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn steam64(self) -> u64 {
        STEAM64_BASE + u64::from(self.0)
    }

    /// Accepts `12345`, `[U:1:12345]` or a SteamID64
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let digits = match STEAM_ID3.captures(input) {
            Some(caps) => caps.get(1)?.as_str(),
            None => input,
        };
        let number: u64 = digits.parse().ok()?;
        let account = if number >= STEAM64_BASE {
            number - STEAM64_BASE
        } else {
            number
        };
        u32::try_from(account).ok().map(Self)
    }
}

impl FromStr for AccountId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ConfigError::InvalidAccount(s.to_string()))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
