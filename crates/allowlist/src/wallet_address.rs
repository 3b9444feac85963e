use super::*;

/// Wallet address as submitted by its owner. Compared byte-for-byte; no case
/// folding is applied.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct WalletAddress(String);

impl WalletAddress {
  pub fn parse(s: &str, format: AddressFormat) -> Result<Self, Error> {
    format.check(s)?;
    Ok(Self(s.into()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for WalletAddress {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for WalletAddress {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s, AddressFormat::Any)
  }
}
