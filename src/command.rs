//! Chat command surface. A gateway adapter turns each slash-command
//! interaction into a [`Command`] plus an [`Interaction`] and hands both to
//! [`dispatch`], which defers the reply, runs the command against the
//! registry, and edits the deferred reply exactly once.

use {super::*, registry::ErrorKind};

#[derive(Debug, Parser, Clone, PartialEq)]
pub enum Command {
  #[command(about = "Register a wallet address")]
  AddEntry {
    #[arg(help = "Register <ADDRESS>.")]
    address: String,
    #[arg(long, default_value_t, help = "Register on <LIST>.")]
    list: ListKind,
  },
  #[command(about = "Check whether a wallet address is registered")]
  CheckEntry {
    #[arg(help = "Look up <ADDRESS>.")]
    address: String,
    #[arg(long, default_value_t, help = "Look up on <LIST>.")]
    list: ListKind,
  },
  #[command(about = "Replace one of your registered wallet addresses")]
  ReplaceEntry {
    #[arg(help = "Replace <OLD_ADDRESS>.")]
    old_address: String,
    #[arg(help = "Register <NEW_ADDRESS> in its place.")]
    new_address: String,
    #[arg(long, default_value_t, help = "Replace on <LIST>.")]
    list: ListKind,
  },
  #[command(about = "Grant a user additional slots")]
  IncreaseSlots {
    #[arg(help = "Grant slots to <TARGET>.")]
    target: OwnerId,
    #[arg(
      allow_negative_numbers = true,
      help = "Grant <DELTA> additional slots.",
    )]
    delta: i64,
    #[arg(long, default_value_t, help = "Grant slots on <LIST>.")]
    list: ListKind,
  },
  #[command(about = "Export registered wallets as CSV")]
  ExportList {
    #[arg(long, help = "Export <LIST>. [default: all lists]")]
    list: Option<ListKind>,
  },
}

impl Command {
  pub fn name(&self) -> &'static str {
    match self {
      Self::AddEntry { .. } => "add-entry",
      Self::CheckEntry { .. } => "check-entry",
      Self::ReplaceEntry { .. } => "replace-entry",
      Self::IncreaseSlots { .. } => "increase-slots",
      Self::ExportList { .. } => "export-list",
    }
  }

  fn execute(
    self,
    registry: &Registry,
    roles: &Roles,
    caller: &Caller,
  ) -> Result<Reply, RegistryError> {
    match self {
      Self::AddEntry { address, list } => {
        let capability = roles.authorize(caller, Scope::List(list))?;
        let usage = registry.add_entry(capability, &caller.owner, &address, list)?;
        Ok(Reply::message(format!("Added {address} to the {list}. You are using {usage} slots.")))
      }
      Self::CheckEntry { address, list } => {
        let message = if registry.check_entry(&address, list)? {
          format!("{address} is on the {list}.")
        } else {
          format!("{address} is not on the {list}.")
        };
        Ok(Reply::message(message))
      }
      Self::ReplaceEntry {
        old_address,
        new_address,
        list,
      } => {
        let capability = roles.authorize(caller, Scope::List(list))?;
        registry.replace_entry(
          capability,
          &caller.owner,
          &old_address,
          &new_address,
          list,
        )?;
        Ok(Reply::message(format!("Replaced {old_address} with {new_address} on the {list}.")))
      }
      Self::IncreaseSlots {
        target,
        delta,
        list,
      } => {
        let capability = roles.authorize(caller, Scope::Admin)?;
        let change = registry.increase_slots(capability, &target, list, delta)?;
        Ok(Reply::message(format!(
          "Increased {list} slots for {target} from {} to {}.",
          change.old, change.new
        )))
      }
      Self::ExportList { list } => {
        let capability = roles.authorize(caller, Scope::Admin)?;
        let csv = registry.export(capability, list)?;
        Ok(Reply {
          message: format!(
            "Exported {} entries from {}.",
            csv.len(),
            match list {
              Some(list) => format!("the {list}"),
              None => "all lists".into(),
            }
          ),
          attachment: Some(Attachment {
            filename: Csv::filename(list),
            contents: csv.to_string(),
          }),
          error: None,
        })
      }
    }
  }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Attachment {
  pub filename: String,
  pub contents: String,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Reply {
  pub message: String,
  pub attachment: Option<Attachment>,
  pub error: Option<ErrorKind>,
}

impl Reply {
  fn message(message: String) -> Self {
    Self {
      message,
      attachment: None,
      error: None,
    }
  }

  fn failure(error: &RegistryError) -> Self {
    Self {
      message: error.to_string(),
      attachment: None,
      error: Some(error.kind()),
    }
  }
}

/// One inbound slash-command interaction with a single deferred reply.
pub trait Interaction {
  fn caller(&self) -> &Caller;

  /// Acknowledge the interaction before the registry is consulted.
  fn defer(&mut self) -> Result;

  /// Replace the deferred acknowledgement with the final reply.
  fn edit(&mut self, reply: &Reply) -> Result;
}

pub fn dispatch(
  registry: &Registry,
  roles: &Roles,
  command: Command,
  interaction: &mut dyn Interaction,
) -> Result<Reply> {
  interaction.defer()?;

  let name = command.name();

  let caller = interaction.caller().clone();

  let reply = match command.execute(registry, roles, &caller) {
    Ok(reply) => reply,
    Err(err) => {
      match err.kind() {
        ErrorKind::UpstreamUnavailable | ErrorKind::InternalError => {
          log::error!("`{name}` from {} failed: {err}", caller.owner)
        }
        _ => log::warn!("`{name}` from {} rejected: {err}", caller.owner),
      }
      Reply::failure(&err)
    }
  };

  interaction.edit(&reply)?;

  Ok(reply)
}

#[cfg(test)]
mod tests {
  use {super::*, tempfile::TempDir};

  const A: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
  const B: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

  #[derive(Default, Debug, PartialEq)]
  enum State {
    #[default]
    Received,
    Deferred,
    Edited(Reply),
  }

  struct Recording {
    caller: Caller,
    state: State,
  }

  impl Interaction for Recording {
    fn caller(&self) -> &Caller {
      &self.caller
    }

    fn defer(&mut self) -> Result {
      ensure!(self.state == State::Received, "deferred twice");
      self.state = State::Deferred;
      Ok(())
    }

    fn edit(&mut self, reply: &Reply) -> Result {
      ensure!(self.state == State::Deferred, "edited before defer");
      self.state = State::Edited(reply.clone());
      Ok(())
    }
  }

  struct Bot {
    registry: Registry,
    roles: Roles,
    #[allow(unused)]
    tempdir: TempDir,
  }

  impl Bot {
    fn new() -> Self {
      let tempdir = TempDir::new().unwrap();

      let settings = Settings::from_options(Options {
        data_dir: Some(tempdir.path().into()),
        ..default()
      })
      .or_defaults()
      .unwrap();

      Self {
        registry: Registry::open(&settings).unwrap(),
        roles: settings.roles(),
        tempdir,
      }
    }

    #[track_caller]
    fn run(&self, caller: &str, roles: &[&str], args: &str) -> Reply {
      let command = Command::try_parse_from(
        ["mintlist"]
          .into_iter()
          .chain(args.split_whitespace()),
      )
      .unwrap();

      let mut interaction = Recording {
        caller: Caller::new(caller.parse().unwrap(), roles.iter().copied()),
        state: State::Received,
      };

      let reply = dispatch(&self.registry, &self.roles, command, &mut interaction).unwrap();

      assert_eq!(interaction.state, State::Edited(reply.clone()));

      reply
    }
  }

  #[test]
  fn add_entry_reports_usage() {
    let bot = Bot::new();

    pretty_assert_eq!(
      bot.run("u1", &["whitelist"], &format!("add-entry {A}")),
      Reply {
        message: format!("Added {A} to the whitelist. You are using 1 of 1 slots."),
        attachment: None,
        error: None,
      }
    );
  }

  #[test]
  fn add_entry_requires_list_role() {
    let bot = Bot::new();

    let reply = bot.run(
      "u1",
      &["whitelist"],
      &format!("add-entry {A} --list freemint"),
    );

    assert_eq!(reply.error, Some(ErrorKind::PermissionDenied));
    assert_eq!(
      reply.message,
      "permission denied for freemint: requires the `freemint` role"
    );
    assert!(!bot.registry.check_entry(A, ListKind::Freemint).unwrap());
  }

  #[test]
  fn check_entry_needs_no_role() {
    let bot = Bot::new();

    bot.run("u1", &["whitelist"], &format!("add-entry {A}"));

    assert_eq!(
      bot.run("u2", &[], &format!("check-entry {A}")).message,
      format!("{A} is on the whitelist.")
    );

    assert_eq!(
      bot.run("u2", &[], &format!("check-entry {B}")).message,
      format!("{B} is not on the whitelist.")
    );
  }

  #[test]
  fn replace_entry() {
    let bot = Bot::new();

    bot.run("u1", &["whitelist"], &format!("add-entry {A}"));

    assert_eq!(
      bot
        .run("u1", &["whitelist"], &format!("replace-entry {A} {B}"))
        .message,
      format!("Replaced {A} with {B} on the whitelist.")
    );

    assert_eq!(
      bot
        .run("u1", &["whitelist"], &format!("replace-entry {A} {B}"))
        .error,
      Some(ErrorKind::EntryNotFound)
    );
  }

  #[test]
  fn increase_slots_is_admin_only() {
    let bot = Bot::new();

    assert_eq!(
      bot.run("u1", &["whitelist"], "increase-slots u1 5").error,
      Some(ErrorKind::PermissionDenied)
    );

    assert_eq!(
      bot.run("mod", &["admin"], "increase-slots u1 -1").error,
      Some(ErrorKind::InvalidArgument)
    );

    assert_eq!(
      bot.run("mod", &["admin"], "increase-slots u1 2").message,
      "Increased whitelist slots for u1 from 1 to 3."
    );
  }

  #[test]
  fn export_list_attaches_csv() {
    let bot = Bot::new();

    bot.run("u1", &["whitelist"], &format!("add-entry {A}"));

    let reply = bot.run("mod", &["admin"], "export-list --list whitelist");

    assert_eq!(reply.message, "Exported 1 entries from the whitelist.");

    pretty_assert_eq!(
      reply.attachment,
      Some(Attachment {
        filename: "whitelist.csv".into(),
        contents: format!(
          "Discord ID,Wallet Address,List Kind,Max Slots,Via Code\nu1,{A},whitelist,1,false\n"
        ),
      })
    );

    assert_eq!(
      bot.run("u1", &["whitelist"], "export-list").error,
      Some(ErrorKind::PermissionDenied)
    );
  }

  #[test]
  fn end_to_end() {
    let bot = Bot::new();

    assert_eq!(
      bot
        .run("U1", &["whitelist"], &format!("add-entry {A}"))
        .message,
      format!("Added {A} to the whitelist. You are using 1 of 1 slots.")
    );

    assert_eq!(
      bot
        .run("U1", &["whitelist"], &format!("add-entry {B}"))
        .error,
      Some(ErrorKind::SlotLimitExceeded)
    );

    bot.run("mod", &["admin"], "increase-slots U1 2");

    assert_eq!(
      bot
        .run("U1", &["whitelist"], &format!("add-entry {B}"))
        .message,
      format!("Added {B} to the whitelist. You are using 2 of 3 slots.")
    );
  }
}
