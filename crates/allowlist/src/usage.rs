use super::*;

/// Slots held by an owner on one list, out of the owner's limit.
#[derive(Debug, PartialEq, Eq, Copy, Clone, serde::Serialize, serde::Deserialize)]
pub struct Usage {
  pub used: u32,
  pub limit: u32,
}

impl Usage {
  pub fn is_full(self) -> bool {
    self.used >= self.limit
  }
}

impl Display for Usage {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} of {}", self.used, self.limit)
  }
}
