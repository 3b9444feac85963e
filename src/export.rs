use {super::*, registry::Entry};

/// Comma-separated rendering of registry entries with a fixed header row.
#[derive(Debug, PartialEq, Clone)]
pub struct Csv {
  entries: Vec<Entry>,
}

impl Csv {
  pub const HEADER: [&'static str; 5] = [
    "Discord ID",
    "Wallet Address",
    "List Kind",
    "Max Slots",
    "Via Code",
  ];

  pub fn new(entries: Vec<Entry>) -> Self {
    Self { entries }
  }

  pub fn filename(kind: Option<ListKind>) -> String {
    match kind {
      Some(kind) => format!("{kind}.csv"),
      None => "entries.csv".into(),
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  fn row(f: &mut Formatter, fields: &[&str]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
      if i > 0 {
        f.write_str(",")?;
      }

      if field.contains([',', '"', '\r', '\n']) {
        write!(f, "\"{}\"", field.replace('"', "\"\""))?;
      } else {
        f.write_str(field)?;
      }
    }

    f.write_str("\n")
  }
}

impl Display for Csv {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    Self::row(f, &Self::HEADER)?;

    for entry in &self.entries {
      Self::row(
        f,
        &[
          entry.owner.as_str(),
          entry.address.as_str(),
          entry.list_kind.name(),
          &entry.max_slots.to_string(),
          if entry.via_code { "true" } else { "false" },
        ],
      )?;
    }

    Ok(())
  }
}
