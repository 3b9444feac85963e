use super::*;

/// Which wallet address shapes a registry accepts.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, DeserializeFromStr, SerializeDisplay)]
pub enum AddressFormat {
  /// Any non-empty token without whitespace, for non-EVM chains.
  Any,
  /// `0x` followed by 40 hex digits.
  #[default]
  Evm,
}

const EVM_HEX_DIGITS: usize = 40;

impl AddressFormat {
  pub fn check(self, address: &str) -> Result<(), Error> {
    if address.is_empty() {
      return Err(Error::Empty);
    }

    match self {
      Self::Any => {
        if let Some(c) = address
          .chars()
          .find(|c| c.is_whitespace() || c.is_control())
        {
          return Err(Error::Character(c));
        }
      }
      Self::Evm => {
        let digits = address.strip_prefix("0x").ok_or(Error::Prefix)?;

        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
          return Err(Error::Character(c));
        }

        if digits.len() != EVM_HEX_DIGITS {
          return Err(Error::Length {
            expected: EVM_HEX_DIGITS,
            actual: digits.len(),
          });
        }
      }
    }

    Ok(())
  }
}

impl Display for AddressFormat {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Any => write!(f, "any"),
      Self::Evm => write!(f, "evm"),
    }
  }
}

impl FromStr for AddressFormat {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "any" => Ok(Self::Any),
      "evm" => Ok(Self::Evm),
      _ => Err(Error::UnknownAddressFormat(s.into())),
    }
  }
}
