use super::*;

pub(crate) fn effective_limit(record: Option<u32>, default: u32) -> u32 {
  record.unwrap_or(default)
}

/// Decides whether `address` may join `existing` under `limit`, returning the
/// usage after the insert.
pub(crate) fn admit(
  kind: ListKind,
  owner: &OwnerId,
  existing: &[WalletAddress],
  address: &WalletAddress,
  limit: u32,
) -> Result<Usage, RegistryError> {
  if existing.contains(address) {
    return Err(RegistryError::DuplicateEntry {
      owner: owner.clone(),
      address: address.to_string(),
      kind,
    });
  }

  let usage = Usage {
    used: u32::try_from(existing.len())
      .map_err(|_| RegistryError::corrupt(format!("{owner} holds {} entries", existing.len())))?,
    limit,
  };

  if usage.is_full() {
    return Err(RegistryError::SlotLimitExceeded {
      owner: owner.clone(),
      kind,
      usage,
    });
  }

  Ok(Usage {
    used: usage.used + 1,
    limit,
  })
}

pub(crate) fn raise(current: u32, delta: i64) -> Result<u32, RegistryError> {
  if delta <= 0 {
    return Err(RegistryError::InvalidArgument {
      field: "delta",
      message: format!("must be positive, got {delta}"),
    });
  }

  u32::try_from(delta)
    .ok()
    .and_then(|delta| current.checked_add(delta))
    .ok_or_else(|| RegistryError::InvalidArgument {
      field: "delta",
      message: format!("raising {current} by {delta} exceeds {}", u32::MAX),
    })
}
