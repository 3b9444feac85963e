use super::*;

/// One registry row, with the owner's slot limit for its list joined in.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
  #[serde(rename = "discordId")]
  pub owner: OwnerId,
  #[serde(rename = "walletAddress")]
  pub address: WalletAddress,
  pub list_kind: ListKind,
  pub max_slots: u32,
  pub via_code: bool,
}
