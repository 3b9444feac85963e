#![allow(
  clippy::too_many_arguments,
  clippy::type_complexity,
  clippy::result_large_err
)]
#![deny(
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_sign_loss
)]

use {
  self::{
    arguments::Arguments,
    capability::{Caller, Capability, Roles, Scope},
    options::Options,
    registry::{Registry, RegistryError},
    settings::Settings,
    subcommand::{OutputFormat, Subcommand, SubcommandResult},
  },
  allowlist::{AddressFormat, ListKind, OwnerId, Usage, WalletAddress},
  anyhow::{anyhow, bail, ensure, Context, Error},
  clap::Parser,
  serde::{Deserialize, Serialize},
  std::{
    cmp,
    collections::{BTreeMap, BTreeSet},
    env,
    fmt::{self, Display, Formatter},
    fs::{self, File},
    io,
    net::ToSocketAddrs,
    path::{Path, PathBuf},
    process,
    sync::{
      atomic::{self, AtomicBool},
      Arc, Mutex,
    },
    time::Duration,
  },
  tokio::{runtime::Runtime, task},
};

pub use self::{
  command::{Command, Interaction, Reply},
  export::Csv,
};

#[cfg(test)]
use pretty_assertions::assert_eq as pretty_assert_eq;

#[cfg(test)]
macro_rules! assert_regex_match {
  ($value:expr, $pattern:expr $(,)?) => {
    let regex = regex::Regex::new(&format!("^(?s){}$", $pattern)).unwrap();
    let string = $value.to_string();

    if !regex.is_match(string.as_ref()) {
      panic!("Regex:\n\n{regex}\n\n…did not match string:\n\n{string}");
    }
  };
}

macro_rules! define_table {
  ($name:ident, $key:ty, $value:ty) => {
    const $name: redb::TableDefinition<$key, $value> =
      redb::TableDefinition::new(stringify!($name));
  };
}

macro_rules! define_multimap_table {
  ($name:ident, $key:ty, $value:ty) => {
    const $name: redb::MultimapTableDefinition<$key, $value> =
      redb::MultimapTableDefinition::new(stringify!($name));
  };
}

pub mod api;
mod arguments;
pub mod capability;
pub mod command;
pub mod export;
pub mod options;
pub mod registry;
pub mod settings;
pub mod subcommand;

type Result<T = (), E = Error> = std::result::Result<T, E>;

fn default<T: Default>() -> T {
  Default::default()
}

static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);
static LISTENERS: Mutex<Vec<axum_server::Handle>> = Mutex::new(Vec::new());

pub fn main() {
  env_logger::init();

  ctrlc::set_handler(move || {
    if SHUTTING_DOWN.fetch_or(true, atomic::Ordering::Relaxed) {
      process::exit(1);
    }

    eprintln!("Shutting down gracefully. Press <CTRL-C> again to shutdown immediately.");

    LISTENERS
      .lock()
      .unwrap()
      .iter()
      .for_each(|handle| handle.graceful_shutdown(Some(Duration::from_millis(100))));
  })
  .expect("Error setting <CTRL-C> handler");

  let args = Arguments::parse();

  let format = args.options.format;

  match args.run() {
    Err(err) => {
      eprintln!("error: {err}");
      err
        .chain()
        .skip(1)
        .for_each(|cause| eprintln!("because: {cause}"));
      if env::var_os("RUST_BACKTRACE")
        .map(|val| val == "1")
        .unwrap_or_default()
      {
        eprintln!("{}", err.backtrace());
      }

      process::exit(1);
    }
    Ok(output) => {
      if let Some(output) = output {
        output.print(format.unwrap_or_default());
      }
    }
  }
}
