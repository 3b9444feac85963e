use super::*;

#[derive(
  Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Default, DeserializeFromStr,
  SerializeDisplay,
)]
pub enum ListKind {
  #[default]
  Whitelist,
  Freemint,
}

impl ListKind {
  pub const ALL: [Self; 2] = [Self::Whitelist, Self::Freemint];

  pub fn store(self) -> u8 {
    match self {
      Self::Whitelist => 0,
      Self::Freemint => 1,
    }
  }

  pub fn load(value: u8) -> Option<Self> {
    Self::ALL.into_iter().find(|kind| kind.store() == value)
  }

  pub fn name(self) -> &'static str {
    match self {
      Self::Whitelist => "whitelist",
      Self::Freemint => "freemint",
    }
  }
}

impl Display for ListKind {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for ListKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "whitelist" | "wl" => Ok(Self::Whitelist),
      "freemint" | "fm" => Ok(Self::Freemint),
      _ => Err(Error::UnknownListKind(s.into())),
    }
  }
}
