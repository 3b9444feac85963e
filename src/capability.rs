//! Role-gated capabilities. A [`Capability`] can only be obtained by passing a
//! role check (or, inside the crate, from the authenticated HTTP API), and the
//! registry refuses operations whose capability was issued for another scope.

use super::*;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Scope {
  Admin,
  List(ListKind),
}

impl Display for Scope {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Admin => write!(f, "admin"),
      Self::List(kind) => write!(f, "{kind}"),
    }
  }
}

/// The user an interaction arrived from, with the role names the chat
/// platform reports for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
  pub owner: OwnerId,
  pub roles: BTreeSet<String>,
}

impl Caller {
  pub fn new(owner: OwnerId, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      owner,
      roles: roles.into_iter().map(Into::into).collect(),
    }
  }
}

/// Role names required for each scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Roles {
  pub admin: String,
  pub freemint: String,
  pub whitelist: String,
}

impl Roles {
  pub fn required(&self, scope: Scope) -> &str {
    match scope {
      Scope::Admin => &self.admin,
      Scope::List(ListKind::Whitelist) => &self.whitelist,
      Scope::List(ListKind::Freemint) => &self.freemint,
    }
  }

  pub fn authorize(&self, caller: &Caller, scope: Scope) -> Result<Capability, RegistryError> {
    let role = self.required(scope);

    if caller.roles.contains(role) {
      Ok(Capability { scope })
    } else {
      Err(RegistryError::PermissionDenied {
        scope,
        reason: format!("requires the `{role}` role"),
      })
    }
  }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Capability {
  scope: Scope,
}

impl Capability {
  /// Issued to callers authenticated by the shared API key.
  pub(crate) fn trusted(scope: Scope) -> Self {
    Self { scope }
  }

  pub(crate) fn require(self, scope: Scope) -> Result<(), RegistryError> {
    if self.scope == scope {
      Ok(())
    } else {
      Err(RegistryError::PermissionDenied {
        scope,
        reason: format!("capability was issued for {}", self.scope),
      })
    }
  }
}
