use super::*;

#[derive(Clone, Default, Debug, Parser)]
pub struct Options {
  #[arg(
    long,
    help = "Accept wallet addresses in <ADDRESS_FORMAT>. [default: evm]",
  )]
  pub(crate) address_format: Option<AddressFormat>,
  #[arg(
    long,
    help = "Require <ADMIN_ROLE> for administrative commands. [default: admin]",
  )]
  pub(crate) admin_role: Option<String>,
  #[arg(
    long,
    help = "Require <API_KEY> in the `api-key` header of JSON API requests."
  )]
  pub(crate) api_key: Option<String>,
  #[arg(
    long,
    conflicts_with = "config_dir",
    help = "Load configuration from <CONFIG>."
  )]
  pub(crate) config: Option<PathBuf>,
  #[arg(long, help = "Load configuration from <CONFIG_DIR>.")]
  pub(crate) config_dir: Option<PathBuf>,
  #[arg(long, alias = "datadir", help = "Store registry in <DATA_DIR>.")]
  pub(crate) data_dir: Option<PathBuf>,
  #[arg(
    long,
    help = "Allow owners without granted slots <DEFAULT_SLOTS> entries per list. [default: 1]"
  )]
  pub(crate) default_slots: Option<u32>,
  #[arg(long, help = "Print output as <FORMAT>. [default: json]")]
  pub(crate) format: Option<OutputFormat>,
  #[arg(
    long,
    help = "Require <FREEMINT_ROLE> to register freemint wallets. [default: freemint]",
  )]
  pub(crate) freemint_role: Option<String>,
  #[arg(long, hide = true)]
  pub(crate) integration_test: bool,
  #[arg(
    long,
    help = "Use registry at <REGISTRY>. [default: <DATA_DIR>/registry.redb]",
  )]
  pub(crate) registry: Option<PathBuf>,
  #[arg(
    long,
    help = "Require <WHITELIST_ROLE> to register whitelist wallets. [default: whitelist]"
  )]
  pub(crate) whitelist_role: Option<String>,
}
