use super::*;

pub use crate::registry::{Entry, SlotChange, Status};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEntry {
  pub discord_id: OwnerId,
  pub wallet_address: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceEntry {
  pub discord_id: OwnerId,
  pub old_wallet: String,
  pub new_wallet: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Success {
  pub success: bool,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeMint {
  pub has_free_mint: bool,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Check {
  pub listed: bool,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Error {
  pub error: registry::ErrorKind,
  pub message: String,
}
