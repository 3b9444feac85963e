use super::*;

/// Opaque identity of the chat-platform user owning registry entries.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, DeserializeFromStr, SerializeDisplay)]
pub struct OwnerId(String);

impl OwnerId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Display for OwnerId {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for OwnerId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Err(Error::Empty);
    }

    if let Some(c) = s.chars().find(|c| c.is_whitespace() || c.is_control()) {
      return Err(Error::Character(c));
    }

    Ok(Self(s.into()))
  }
}
