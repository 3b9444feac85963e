use {super::*, snafu::Snafu};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum RegistryError {
  #[snafu(display("permission denied for {scope}: {reason}"))]
  PermissionDenied { scope: Scope, reason: String },
  #[snafu(display("{address} is already registered to {owner} on the {kind}"))]
  DuplicateEntry {
    owner: OwnerId,
    address: String,
    kind: ListKind,
  },
  #[snafu(display("{address} is not registered to {owner} on the {kind}"))]
  EntryNotFound {
    owner: OwnerId,
    address: String,
    kind: ListKind,
  },
  #[snafu(display("{owner} has no free {kind} slots: using {usage}"))]
  SlotLimitExceeded {
    owner: OwnerId,
    kind: ListKind,
    usage: Usage,
  },
  #[snafu(display("invalid {field}: {message}"))]
  InvalidArgument {
    field: &'static str,
    message: String,
  },
  #[snafu(display("registry storage unavailable: {source}"))]
  UpstreamUnavailable { source: redb::Error },
  #[snafu(display("internal error: {message}"))]
  InternalError { message: String },
}

impl RegistryError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
      Self::DuplicateEntry { .. } => ErrorKind::DuplicateEntry,
      Self::EntryNotFound { .. } => ErrorKind::EntryNotFound,
      Self::SlotLimitExceeded { .. } => ErrorKind::SlotLimitExceeded,
      Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
      Self::UpstreamUnavailable { .. } => ErrorKind::UpstreamUnavailable,
      Self::InternalError { .. } => ErrorKind::InternalError,
    }
  }

  pub(crate) fn corrupt(what: impl Display) -> Self {
    Self::InternalError {
      message: format!("corrupt registry record: {what}"),
    }
  }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum ErrorKind {
  PermissionDenied,
  DuplicateEntry,
  EntryNotFound,
  SlotLimitExceeded,
  InvalidArgument,
  UpstreamUnavailable,
  InternalError,
}

macro_rules! from_storage_error {
  ($($error:ty),* $(,)?) => {
    $(
      impl From<$error> for RegistryError {
        fn from(error: $error) -> Self {
          Self::UpstreamUnavailable {
            source: error.into(),
          }
        }
      }
    )*
  };
}

from_storage_error! {
  redb::CommitError,
  redb::Error,
  redb::StorageError,
  redb::TableError,
  redb::TransactionError,
}
