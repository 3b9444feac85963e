use super::*;

pub mod command;
pub mod entries;
pub mod export;
pub(crate) mod server;
mod settings;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[command(about = "Run a chat command as <CALLER>")]
  Command(command::Run),
  #[command(about = "List registered wallets")]
  Entries(entries::Entries),
  #[command(about = "Export registered wallets as CSV")]
  Export(export::Export),
  #[command(about = "Run the HTTP API server")]
  Server(server::Server),
  #[command(about = "Display settings")]
  Settings,
}

impl Subcommand {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    match self {
      Self::Command(run) => run.run(settings),
      Self::Entries(entries) => entries.run(settings),
      Self::Export(export) => export.run(settings),
      Self::Server(server) => {
        let registry = Arc::new(Registry::open(&settings)?);
        let handle = axum_server::Handle::new();
        LISTENERS.lock().unwrap().push(handle.clone());
        server.run(settings, registry, handle)
      }
      Self::Settings => settings::run(settings),
    }
  }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub enum OutputFormat {
  #[default]
  Json,
  Yaml,
  Minify,
}

pub trait Output: Send {
  fn print(&self, format: OutputFormat);
}

impl<T> Output for T
where
  T: Serialize + Send,
{
  fn print(&self, format: OutputFormat) {
    match format {
      OutputFormat::Json => serde_json::to_writer_pretty(io::stdout(), self).ok(),
      OutputFormat::Yaml => serde_yaml::to_writer(io::stdout(), self).ok(),
      OutputFormat::Minify => serde_json::to_writer(io::stdout(), self).ok(),
    };
    println!();
  }
}

pub(crate) type SubcommandResult = Result<Option<Box<dyn Output>>>;
