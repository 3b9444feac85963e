use super::*;

#[derive(Debug, Parser)]
pub struct Export {
  #[arg(long, help = "Export <LIST>. [default: all lists]")]
  list: Option<ListKind>,
  #[arg(long, help = "Write CSV to <OUTPUT> instead of stdout.")]
  output: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Output {
  pub entries: usize,
  pub output: PathBuf,
}

impl Export {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let registry = Registry::open(&settings)?;

    let csv = registry.export(Capability::trusted(Scope::Admin), self.list)?;

    match self.output {
      Some(output) => {
        fs::write(&output, csv.to_string())
          .with_context(|| format!("failed to write export to `{}`", output.display()))?;

        Ok(Some(Box::new(Output {
          entries: csv.len(),
          output,
        })))
      }
      None => {
        print!("{csv}");
        Ok(None)
      }
    }
  }
}
