//! Writes each entry to `<dir>/<name>.txt`, one CIDR per line.

use std::path::PathBuf;

use anyhow::{Context, bail};
use async_trait::async_trait;
use tracing::{info, warn};

use geoset_common::GeoError;
use geoset_common::config::Config;
use geoset_common::network::family::IgnoreOption;
use geoset_core::Container;

use crate::converter::OutputConverter;
use crate::output::selected_entries;
use crate::spec::ConverterSpec;

const DEFAULT_DIR: &str = "./output/text";

pub struct TextOutput {
    dir: PathBuf,
    want: Vec<String>,
    only: IgnoreOption,
}

impl TextOutput {
    pub const TYPE: &'static str = "text";
    pub const DESCRIPTION: &'static str = "Plaintext lists, one file per entry";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            want: Vec::new(),
            only: IgnoreOption::None,
        }
    }

    pub fn from_spec(spec: &ConverterSpec, cfg: &Config) -> anyhow::Result<Box<dyn OutputConverter>> {
        Ok(Box::new(Self {
            dir: PathBuf::from(spec.get("path").unwrap_or(DEFAULT_DIR)),
            want: spec.want(),
            only: spec.only(cfg)?,
        }))
    }
}

/// `<name>.txt` for an entry, refusing names that would leave the output dir.
fn file_name(name: &str) -> anyhow::Result<String> {
    if name.contains(['/', '\\']) || name == ".." {
        bail!("entry name {name:?} cannot be used as a file name");
    }
    Ok(format!("{}.txt", name.to_lowercase()))
}

#[async_trait]
impl OutputConverter for TextOutput {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn output(&self, container: &Container) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("cannot create {}", self.dir.display()))?;

        let mut written = 0;
        for entry in selected_entries(container, &self.want) {
            let lines = match entry.to_text(self.only) {
                Ok(lines) => lines,
                Err(GeoError::EntryHasNoPrefix(name)) => {
                    warn!("entry {name} has no prefix, skipped");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let path = self.dir.join(file_name(entry.name())?);
            let mut body = lines.join("\n");
            body.push('\n');
            tokio::fs::write(&path, body)
                .await
                .with_context(|| format!("cannot write {}", path.display()))?;
            written += 1;
        }

        info!("wrote {written} file(s) to {}", self.dir.display());
        Ok(())
    }
}
