use {
  super::*,
  redb::{
    Database, DatabaseError, ReadableTable, StorageError, Table, WriteTransaction,
  },
};

pub use self::{
  entry::Entry,
  error::{ErrorKind, RegistryError},
};

mod entry;
mod error;
mod slots;

const SCHEMA_VERSION: u64 = 1;

type EntryKey = (u8, &'static str, &'static str);
type LimitKey = (u8, &'static str);

define_table! { ENTRIES, EntryKey, bool }
define_multimap_table! { ADDRESS_TO_OWNER, (u8, &str), &str }
define_table! { SLOT_LIMITS, LimitKey, u32 }
define_table! { STATISTIC_TO_COUNT, u64, u64 }

#[derive(Copy, Clone)]
pub(crate) enum Statistic {
  Schema = 0,
  Entries = 1,
}

impl Statistic {
  fn key(self) -> u64 {
    self.into()
  }
}

impl From<Statistic> for u64 {
  fn from(statistic: Statistic) -> Self {
    statistic as u64
  }
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct SlotChange {
  pub old: u32,
  pub new: u32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Status {
  pub entries: u64,
  pub schema: u64,
}

pub struct Registry {
  address_format: AddressFormat,
  database: Database,
  default_slots: u32,
  durability: redb::Durability,
  path: PathBuf,
}

impl Registry {
  pub fn open(settings: &Settings) -> Result<Self> {
    let path = settings.registry().to_owned();

    if let Some(parent) = path.parent() {
      if let Err(err) = fs::create_dir_all(parent) {
        bail!("failed to create data dir `{}`: {err}", parent.display());
      }
    }

    let durability = if cfg!(test) {
      redb::Durability::None
    } else {
      redb::Durability::Immediate
    };

    let database = match Database::builder().open(&path) {
      Ok(database) => {
        let schema_version = database
          .begin_read()?
          .open_table(STATISTIC_TO_COUNT)?
          .get(&Statistic::Schema.key())?
          .map(|x| x.value())
          .unwrap_or(0);

        match schema_version.cmp(&SCHEMA_VERSION) {
          cmp::Ordering::Less => bail!(
            "registry at `{}` appears to have been built with an older, incompatible version of mintlist: registry schema {schema_version}, mintlist schema {SCHEMA_VERSION}",
            path.display()
          ),
          cmp::Ordering::Greater => bail!(
            "registry at `{}` appears to have been built with a newer, incompatible version of mintlist, consider updating mintlist: registry schema {schema_version}, mintlist schema {SCHEMA_VERSION}",
            path.display()
          ),
          cmp::Ordering::Equal => {}
        }

        database
      }
      Err(DatabaseError::Storage(StorageError::Io(error)))
        if error.kind() == io::ErrorKind::NotFound =>
      {
        let database = Database::builder().create(&path)?;

        let tx = database.begin_write()?;

        tx.open_table(ENTRIES)?;
        tx.open_multimap_table(ADDRESS_TO_OWNER)?;
        tx.open_table(SLOT_LIMITS)?;

        tx.open_table(STATISTIC_TO_COUNT)?
          .insert(&Statistic::Schema.key(), &SCHEMA_VERSION)?;

        tx.commit()?;

        log::info!("Created registry at `{}`", path.display());

        database
      }
      Err(DatabaseError::DatabaseAlreadyOpen) => bail!(
        "registry `{}` is already open in another process",
        path.display()
      ),
      Err(error) => bail!("failed to open registry: {error}"),
    };

    Ok(Self {
      address_format: settings.address_format(),
      database,
      default_slots: settings.default_slots(),
      durability,
      path,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Registers `address` for `owner`. The duplicate check, the slot check and
  /// the insert share one write transaction, and redb admits a single writer
  /// at a time, so concurrent adds cannot overshoot the limit.
  pub fn add_entry(
    &self,
    capability: Capability,
    owner: &OwnerId,
    address: &str,
    kind: ListKind,
  ) -> Result<Usage, RegistryError> {
    capability.require(Scope::List(kind))?;

    let address = self.parse_address("address", address)?;

    let wtx = self.begin_write()?;

    let usage = {
      let mut entries = wtx.open_table(ENTRIES)?;

      let existing = Self::owned_addresses(&entries, kind, owner)?;

      let limit = Self::slot_limit(
        &wtx.open_table(SLOT_LIMITS)?,
        kind,
        owner,
        self.default_slots,
      )?;

      let usage = slots::admit(kind, owner, &existing, &address, limit)?;

      entries.insert((kind.store(), owner.as_str(), address.as_str()), false)?;

      wtx
        .open_multimap_table(ADDRESS_TO_OWNER)?
        .insert((kind.store(), address.as_str()), owner.as_str())?;

      Self::increment_statistic(&wtx, Statistic::Entries, 1)?;

      usage
    };

    wtx.commit()?;

    log::info!("Added {address} for {owner} to the {kind}, using {usage}");

    Ok(usage)
  }

  /// Swaps `old` for `new` in place, keeping the entry's provenance flag.
  pub fn replace_entry(
    &self,
    capability: Capability,
    owner: &OwnerId,
    old: &str,
    new: &str,
    kind: ListKind,
  ) -> Result<(), RegistryError> {
    capability.require(Scope::List(kind))?;

    let wtx = self.begin_write()?;

    {
      let mut entries = wtx.open_table(ENTRIES)?;

      let Some(via_code) = entries
        .get((kind.store(), owner.as_str(), old))?
        .map(|guard| guard.value())
      else {
        return Err(RegistryError::EntryNotFound {
          owner: owner.clone(),
          address: old.into(),
          kind,
        });
      };

      let new = self.parse_address("new address", new)?;

      if entries
        .get((kind.store(), owner.as_str(), new.as_str()))?
        .is_some()
      {
        return Err(RegistryError::DuplicateEntry {
          owner: owner.clone(),
          address: new.to_string(),
          kind,
        });
      }

      entries.remove((kind.store(), owner.as_str(), old))?;
      entries.insert((kind.store(), owner.as_str(), new.as_str()), via_code)?;

      let mut address_to_owner = wtx.open_multimap_table(ADDRESS_TO_OWNER)?;
      address_to_owner.remove((kind.store(), old), owner.as_str())?;
      address_to_owner.insert((kind.store(), new.as_str()), owner.as_str())?;
    }

    wtx.commit()?;

    log::info!("Replaced {old} with {new} for {owner} on the {kind}");

    Ok(())
  }

  /// Raises `owner`'s slot limit on `kind` by `delta`. Owners without a limit
  /// record start from the default.
  pub fn increase_slots(
    &self,
    capability: Capability,
    owner: &OwnerId,
    kind: ListKind,
    delta: i64,
  ) -> Result<SlotChange, RegistryError> {
    capability.require(Scope::Admin)?;

    let wtx = self.begin_write()?;

    let change = {
      let mut limits = wtx.open_table(SLOT_LIMITS)?;

      let old = Self::slot_limit(&limits, kind, owner, self.default_slots)?;

      let new = slots::raise(old, delta)?;

      limits.insert((kind.store(), owner.as_str()), new)?;

      SlotChange { old, new }
    };

    wtx.commit()?;

    log::info!(
      "Raised {kind} slots for {owner} from {} to {}",
      change.old,
      change.new
    );

    Ok(change)
  }

  /// Whether any owner holds `address` on `kind`.
  pub fn check_entry(&self, address: &str, kind: ListKind) -> Result<bool, RegistryError> {
    Ok(
      self
        .database
        .begin_read()?
        .open_multimap_table(ADDRESS_TO_OWNER)?
        .get((kind.store(), address))?
        .next()
        .transpose()?
        .is_some(),
    )
  }

  pub fn has_entries(&self, owner: &OwnerId, kind: ListKind) -> Result<bool, RegistryError> {
    let rtx = self.database.begin_read()?;

    Ok(!Self::owned_addresses(&rtx.open_table(ENTRIES)?, kind, owner)?.is_empty())
  }

  #[cfg(test)]
  pub(crate) fn usage(&self, owner: &OwnerId, kind: ListKind) -> Result<Usage, RegistryError> {
    let rtx = self.database.begin_read()?;

    let used = Self::owned_addresses(&rtx.open_table(ENTRIES)?, kind, owner)?.len();

    Ok(Usage {
      used: u32::try_from(used)
        .map_err(|_| RegistryError::corrupt(format!("{owner} holds {used} entries")))?,
      limit: Self::slot_limit(
        &rtx.open_table(SLOT_LIMITS)?,
        kind,
        owner,
        self.default_slots,
      )?,
    })
  }

  /// All entries on `kind`, or on every list when `kind` is `None`, ordered by
  /// list, owner and address.
  pub fn entries(&self, kind: Option<ListKind>) -> Result<Vec<Entry>, RegistryError> {
    let rtx = self.database.begin_read()?;

    let limits = rtx.open_table(SLOT_LIMITS)?;

    let mut entries = Vec::new();

    for result in rtx.open_table(ENTRIES)?.iter()? {
      let (key, via_code) = result?;

      let (list_kind, owner, address) = key.value();

      let list_kind = ListKind::load(list_kind)
        .ok_or_else(|| RegistryError::corrupt(format!("unknown list kind {list_kind}")))?;

      if kind.is_some_and(|kind| kind != list_kind) {
        continue;
      }

      let owner = owner
        .parse::<OwnerId>()
        .map_err(|err| RegistryError::corrupt(format!("owner `{owner}`: {err}")))?;

      let max_slots = Self::slot_limit(&limits, list_kind, &owner, self.default_slots)?;

      entries.push(Entry {
        address: Self::load_address(address)?,
        list_kind,
        max_slots,
        owner,
        via_code: via_code.value(),
      });
    }

    Ok(entries)
  }

  pub fn export(
    &self,
    capability: Capability,
    kind: Option<ListKind>,
  ) -> Result<Csv, RegistryError> {
    capability.require(Scope::Admin)?;
    Ok(Csv::new(self.entries(kind)?))
  }

  pub fn status(&self) -> Result<Status, RegistryError> {
    let rtx = self.database.begin_read()?;

    let statistic_to_count = rtx.open_table(STATISTIC_TO_COUNT)?;

    let statistic = |statistic: Statistic| -> Result<u64, RegistryError> {
      Ok(
        statistic_to_count
          .get(statistic.key())?
          .map(|guard| guard.value())
          .unwrap_or_default(),
      )
    };

    Ok(Status {
      entries: statistic(Statistic::Entries)?,
      schema: statistic(Statistic::Schema)?,
    })
  }

  fn begin_write(&self) -> Result<WriteTransaction, RegistryError> {
    let mut tx = self.database.begin_write()?;
    tx.set_durability(self.durability);
    Ok(tx)
  }

  fn parse_address(
    &self,
    field: &'static str,
    address: &str,
  ) -> Result<WalletAddress, RegistryError> {
    WalletAddress::parse(address, self.address_format).map_err(|err| {
      RegistryError::InvalidArgument {
        field,
        message: format!("`{address}`: {err}"),
      }
    })
  }

  fn load_address(address: &str) -> Result<WalletAddress, RegistryError> {
    address
      .parse()
      .map_err(|err| RegistryError::corrupt(format!("address `{address}`: {err}")))
  }

  fn owned_addresses(
    entries: &impl ReadableTable<EntryKey, bool>,
    kind: ListKind,
    owner: &OwnerId,
  ) -> Result<Vec<WalletAddress>, RegistryError> {
    let mut addresses = Vec::new();

    for result in entries.range((kind.store(), owner.as_str(), "")..)? {
      let (key, _via_code) = result?;

      let (list_kind, key_owner, address) = key.value();

      if list_kind != kind.store() || key_owner != owner.as_str() {
        break;
      }

      addresses.push(Self::load_address(address)?);
    }

    Ok(addresses)
  }

  fn slot_limit(
    limits: &impl ReadableTable<LimitKey, u32>,
    kind: ListKind,
    owner: &OwnerId,
    default: u32,
  ) -> Result<u32, RegistryError> {
    Ok(slots::effective_limit(
      limits
        .get((kind.store(), owner.as_str()))?
        .map(|guard| guard.value()),
      default,
    ))
  }

  fn increment_statistic(
    wtx: &WriteTransaction,
    statistic: Statistic,
    n: u64,
  ) -> Result<(), RegistryError> {
    let mut statistic_to_count: Table<u64, u64> = wtx.open_table(STATISTIC_TO_COUNT)?;
    let value = statistic_to_count
      .get(&(statistic.key()))?
      .map(|x| x.value())
      .unwrap_or_default()
      + n;
    statistic_to_count.insert(&statistic.key(), &value)?;
    Ok(())
  }
}
