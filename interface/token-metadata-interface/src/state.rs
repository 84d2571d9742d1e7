//! Value types carried inside instruction payloads

use {
    borsh::{BorshDeserialize, BorshSerialize},
    solana_pubkey::Pubkey,
    std::{convert::Infallible, fmt, str::FromStr},
};

/// A creator credited on the metadata record
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Creator {
    /// Creator address
    pub address: Pubkey,
    /// Whether the creator signs the instruction that lists them
    pub verified: bool,
    /// Percentage of royalties (shares conventionally sum to 100)
    pub share: u8,
}

/// Collection the token belongs to
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    /// Collection key
    pub key: Pubkey,
    /// Whether the collection authority signs
    pub verified: bool,
}

/// How a token's uses are consumed
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseMethod {
    /// Token is burned on use
    Burn,
    /// Token can be used once
    Single,
    /// Token can be used many times
    Multiple,
}

/// Usage counters for the token
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uses {
    /// How uses are consumed
    pub use_method: UseMethod,
    /// Uses left (expected <= total)
    pub remaining: u64,
    /// Total uses
    pub total: u64,
}

/// Metadata slot targeted by an update.
///
/// Variant order is the wire tag: Name = 0, Symbol = 1, Uri = 2, Key = 3.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// The name field
    Name,
    /// The symbol field
    Symbol,
    /// The uri field
    Uri,
    /// A user field, keyed by an arbitrary string
    Key(String),
}

impl Field {
    /// Tag byte written ahead of the variant payload
    pub fn tag(&self) -> u8 {
        match self {
            Field::Name => 0,
            Field::Symbol => 1,
            Field::Uri => 2,
            Field::Key(_) => 3,
        }
    }

    /// Textual name of the field
    pub fn as_str(&self) -> &str {
        match self {
            Field::Name => "name",
            Field::Symbol => "symbol",
            Field::Uri => "uri",
            Field::Key(key) => key,
        }
    }
}

impl FromStr for Field {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name" => Field::Name,
            "symbol" => Field::Symbol,
            "uri" => Field::Uri,
            other => Field::Key(other.to_string()),
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
