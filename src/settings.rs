use super::*;

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  address_format: Option<AddressFormat>,
  admin_role: Option<String>,
  api_key: Option<String>,
  config: Option<PathBuf>,
  config_dir: Option<PathBuf>,
  data_dir: Option<PathBuf>,
  default_slots: Option<u32>,
  freemint_role: Option<String>,
  integration_test: bool,
  registry: Option<PathBuf>,
  whitelist_role: Option<String>,
}

impl Settings {
  pub fn load(options: Options) -> Result<Settings> {
    let mut env = BTreeMap::<String, String>::new();

    for (var, value) in env::vars_os() {
      let Some(var) = var.to_str() else {
        continue;
      };

      let Some(key) = var.strip_prefix("MINTLIST_") else {
        continue;
      };

      env.insert(
        key.into(),
        value.into_string().map_err(|value| {
          anyhow!(
            "environment variable `{var}` not valid unicode: `{}`",
            value.to_string_lossy()
          )
        })?,
      );
    }

    Self::merge(options, env)
  }

  pub fn merge(options: Options, env: BTreeMap<String, String>) -> Result<Self> {
    let settings = Settings::from_options(options).or(Settings::from_env(env)?);

    let config_path = match &settings.config {
      Some(path) => Some(path.into()),
      None => {
        let dir = match settings.config_dir.clone().or(settings.data_dir.clone()) {
          Some(dir) => Some(dir),
          None => Self::default_data_dir().ok(),
        };

        dir
          .map(|dir| dir.join("mintlist.yaml"))
          .filter(|path| path.exists())
      }
    };

    let config = match &config_path {
      Some(path) => {
        let file = File::open(path)
          .with_context(|| format!("failed to open config file `{}`", path.display()))?;

        serde_yaml::from_reader::<File, Settings>(file)
          .with_context(|| format!("failed to deserialize config file `{}`", path.display()))?
      }
      None => Settings::default(),
    };

    settings.or(config).or_defaults()
  }

  pub fn or(self, source: Settings) -> Self {
    Self {
      address_format: self.address_format.or(source.address_format),
      admin_role: self.admin_role.or(source.admin_role),
      api_key: self.api_key.or(source.api_key),
      config: self.config.or(source.config),
      config_dir: self.config_dir.or(source.config_dir),
      data_dir: self.data_dir.or(source.data_dir),
      default_slots: self.default_slots.or(source.default_slots),
      freemint_role: self.freemint_role.or(source.freemint_role),
      integration_test: self.integration_test || source.integration_test,
      registry: self.registry.or(source.registry),
      whitelist_role: self.whitelist_role.or(source.whitelist_role),
    }
  }

  pub fn from_options(options: Options) -> Self {
    Self {
      address_format: options.address_format,
      admin_role: options.admin_role,
      api_key: options.api_key,
      config: options.config,
      config_dir: options.config_dir,
      data_dir: options.data_dir,
      default_slots: options.default_slots,
      freemint_role: options.freemint_role,
      integration_test: options.integration_test,
      registry: options.registry,
      whitelist_role: options.whitelist_role,
    }
  }

  pub fn from_env(env: BTreeMap<String, String>) -> Result<Self> {
    let get_string = |key: &str| env.get(key).cloned();

    let get_path = |key: &str| env.get(key).map(PathBuf::from);

    let get_u32 = |key: &str| {
      env
        .get(key)
        .map(|value| {
          value
            .parse::<u32>()
            .with_context(|| format!("failed to parse environment variable MINTLIST_{key} as u32"))
        })
        .transpose()
    };

    Ok(Self {
      address_format: env
        .get("ADDRESS_FORMAT")
        .map(|format| {
          format
            .parse::<AddressFormat>()
            .context("failed to parse environment variable MINTLIST_ADDRESS_FORMAT")
        })
        .transpose()?,
      admin_role: get_string("ADMIN_ROLE"),
      api_key: get_string("API_KEY"),
      config: get_path("CONFIG"),
      config_dir: get_path("CONFIG_DIR"),
      data_dir: get_path("DATA_DIR"),
      default_slots: get_u32("DEFAULT_SLOTS")?,
      freemint_role: get_string("FREEMINT_ROLE"),
      integration_test: env.contains_key("INTEGRATION_TEST"),
      registry: get_path("REGISTRY"),
      whitelist_role: get_string("WHITELIST_ROLE"),
    })
  }

  pub fn or_defaults(self) -> Result<Self> {
    let data_dir = match &self.data_dir {
      Some(data_dir) => data_dir.clone(),
      None => Self::default_data_dir()?,
    };

    let default_slots = self.default_slots.unwrap_or(allowlist::DEFAULT_SLOTS);

    ensure!(default_slots > 0, "default slots must be at least 1");

    if let Some(api_key) = &self.api_key {
      ensure!(!api_key.is_empty(), "API key must not be empty");
    }

    Ok(Self {
      address_format: Some(self.address_format.unwrap_or_default()),
      admin_role: Some(self.admin_role.unwrap_or_else(|| "admin".into())),
      api_key: self.api_key,
      config: self.config,
      config_dir: self.config_dir,
      registry: Some(
        self
          .registry
          .unwrap_or_else(|| data_dir.join("registry.redb")),
      ),
      data_dir: Some(data_dir),
      default_slots: Some(default_slots),
      freemint_role: Some(self.freemint_role.unwrap_or_else(|| "freemint".into())),
      integration_test: self.integration_test,
      whitelist_role: Some(self.whitelist_role.unwrap_or_else(|| "whitelist".into())),
    })
  }

  fn default_data_dir() -> Result<PathBuf> {
    Ok(
      dirs::data_dir()
        .context("could not get data dir")?
        .join("mintlist"),
    )
  }

  pub fn address_format(&self) -> AddressFormat {
    self.address_format.unwrap_or_default()
  }

  pub fn api_key(&self) -> Option<&str> {
    self.api_key.as_deref()
  }

  pub fn default_slots(&self) -> u32 {
    self.default_slots.unwrap_or(allowlist::DEFAULT_SLOTS)
  }

  pub fn integration_test(&self) -> bool {
    self.integration_test
  }

  pub fn registry(&self) -> &Path {
    self.registry.as_ref().unwrap()
  }

  pub fn roles(&self) -> Roles {
    Roles {
      admin: self.admin_role.clone().unwrap_or_else(|| "admin".into()),
      freemint: self
        .freemint_role
        .clone()
        .unwrap_or_else(|| "freemint".into()),
      whitelist: self
        .whitelist_role
        .clone()
        .unwrap_or_else(|| "whitelist".into()),
    }
  }

  /// Copy safe to print: the API key is replaced with a marker.
  pub fn redacted(&self) -> Self {
    Self {
      api_key: self.api_key.as_ref().map(|_| "[redacted]".into()),
      ..self.clone()
    }
  }
}
