//! Primitive types for wallet allow-list registries: list kinds, owner
//! identities, wallet addresses, and slot usage.

use {
  serde_with::{DeserializeFromStr, SerializeDisplay},
  std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
  },
};

pub use {
  address_format::AddressFormat, list_kind::ListKind, owner_id::OwnerId, usage::Usage,
  wallet_address::WalletAddress,
};

mod address_format;
mod list_kind;
mod owner_id;
mod usage;
mod wallet_address;

/// Slot limit applied to owners that have never been granted extra slots.
pub const DEFAULT_SLOTS: u32 = 1;

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
  Empty,
  Character(char),
  Length { expected: usize, actual: usize },
  Prefix,
  UnknownAddressFormat(String),
  UnknownListKind(String),
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Empty => write!(f, "value must not be empty"),
      Self::Character(c) => write!(f, "invalid character `{}`", c.escape_default()),
      Self::Length { expected, actual } => {
        write!(f, "expected {expected} hex digits but found {actual}")
      }
      Self::Prefix => write!(f, "address must start with `0x`"),
      Self::UnknownAddressFormat(format) => write!(f, "unknown address format `{format}`"),
      Self::UnknownListKind(kind) => write!(f, "unknown list kind `{kind}`"),
    }
  }
}

impl std::error::Error for Error {}
