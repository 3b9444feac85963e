use super::*;

#[derive(Debug, Parser)]
pub struct Entries {
  #[arg(long, help = "Only list entries on <LIST>.")]
  list: Option<ListKind>,
}

impl Entries {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let registry = Registry::open(&settings)?;

    Ok(Some(Box::new(registry.entries(self.list)?)))
  }
}
