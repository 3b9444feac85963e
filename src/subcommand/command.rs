use {super::*, crate::command::dispatch};

/// Runs one chat command against the local registry, standing in for the
/// chat gateway.
#[derive(Debug, Parser)]
pub struct Run {
  #[arg(long, help = "Run as chat user <CALLER>.")]
  caller: OwnerId,
  #[arg(long = "role", help = "Grant the caller <ROLE>. May be repeated.")]
  roles: Vec<String>,
  #[command(subcommand)]
  command: Command,
}

struct Console {
  caller: Caller,
  deferred: bool,
}

impl Interaction for Console {
  fn caller(&self) -> &Caller {
    &self.caller
  }

  fn defer(&mut self) -> Result {
    ensure!(!self.deferred, "interaction already deferred");
    self.deferred = true;
    Ok(())
  }

  fn edit(&mut self, reply: &Reply) -> Result {
    ensure!(self.deferred, "interaction edited before it was deferred");
    log::debug!("reply to {}: {}", self.caller.owner, reply.message);
    Ok(())
  }
}

impl Run {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let registry = Registry::open(&settings)?;

    let mut console = Console {
      caller: Caller::new(self.caller, self.roles.iter().map(String::as_str)),
      deferred: false,
    };

    let reply = dispatch(&registry, &settings.roles(), self.command, &mut console)?;

    Ok(Some(Box::new(reply)))
  }
}
