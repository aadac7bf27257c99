//! # Plaintext Input
//!
//! Reads prefix lists with one address or CIDR per line. The source is
//! either a single file or a directory of `*.txt` files; each file becomes
//! one entry named after its file stem unless `name` overrides it.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use async_trait::async_trait;
use tracing::{debug, info};

use geoset_common::action::Action;
use geoset_common::config::Config;
use geoset_common::network::family::IgnoreOption;
use geoset_core::entry::normalize_name;
use geoset_core::{Container, Entry, RemoveScope};

use crate::converter::InputConverter;
use crate::input::tolerate_missing;
use crate::lines::parse_lines;
use crate::spec::ConverterSpec;

const LIST_EXTENSION: &str = "txt";

pub struct TextInput {
    path: PathBuf,
    name: Option<String>,
    action: Action,
    want: Vec<String>,
    only: IgnoreOption,
    strict: bool,
}

impl TextInput {
    pub const TYPE: &'static str = "text";
    pub const DESCRIPTION: &'static str = "Plaintext lists, one IP or CIDR per line";

    pub fn new(path: impl Into<PathBuf>, action: Action) -> Self {
        Self {
            path: path.into(),
            name: None,
            action,
            want: Vec::new(),
            only: IgnoreOption::None,
            strict: false,
        }
    }

    pub fn from_spec(spec: &ConverterSpec, cfg: &Config) -> anyhow::Result<Box<dyn InputConverter>> {
        let action = spec.action(Action::Add)?;
        if action == Action::Output {
            bail!("{} input cannot use action {action}", Self::TYPE);
        }

        Ok(Box::new(Self {
            path: PathBuf::from(spec.require("path")?),
            name: spec.get("name").map(normalize_name),
            action,
            want: spec.want(),
            only: spec.only(cfg)?,
            strict: cfg.strict,
        }))
    }

    /// `(entry name, file)` pairs to read, sorted by path.
    async fn sources(&self) -> anyhow::Result<Vec<(String, PathBuf)>> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .with_context(|| format!("cannot read {}", self.path.display()))?;

        if meta.is_file() {
            let name = match &self.name {
                Some(name) => name.clone(),
                None => entry_name(&self.path)?,
            };
            return Ok(vec![(name, self.path.clone())]);
        }

        let mut files = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.path)
            .await
            .with_context(|| format!("cannot list {}", self.path.display()))?;
        while let Some(item) = dir.next_entry().await? {
            let path = item.path();
            let hidden = item.file_name().to_string_lossy().starts_with('.');
            if hidden || !item.file_type().await?.is_file() {
                continue;
            }
            if !is_list_file(&path) {
                debug!("skipping {}, not a .txt list", path.display());
                continue;
            }
            files.push((entry_name(&path)?, path));
        }
        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }

    async fn load(name: &str, path: &Path) -> anyhow::Result<Entry> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?;
        let parsed = tokio::task::spawn_blocking(move || parse_lines(&content))
            .await?
            .with_context(|| format!("in {}", path.display()))?;

        debug!(
            "{}: {} prefixes, {} blank or comment lines",
            path.display(),
            parsed.prefixes.len(),
            parsed.skipped
        );

        let mut entry = Entry::new(name);
        for prefix in parsed.prefixes {
            entry.insert(prefix)?;
        }
        Ok(entry)
    }
}

fn is_list_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LIST_EXTENSION))
}

fn entry_name(path: &Path) -> anyhow::Result<String> {
    let stem = path
        .file_stem()
        .map(|s| normalize_name(&s.to_string_lossy()))
        .unwrap_or_default();
    if stem.is_empty() {
        bail!("cannot derive an entry name from {}", path.display());
    }
    Ok(stem)
}

#[async_trait]
impl InputConverter for TextInput {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn action(&self) -> Action {
        self.action
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn input(&self, container: &Container) -> anyhow::Result<()> {
        let mut loaded = 0;
        for (name, path) in self.sources().await? {
            if !self.want.is_empty() && !self.want.contains(&name) {
                continue;
            }
            let entry = Self::load(&name, &path).await?;

            match self.action {
                Action::Remove => {
                    let removed = container.remove(&name, RemoveScope::Prefixes(entry), self.only);
                    tolerate_missing(&name, removed, self.strict)?;
                }
                _ => container.add(entry, self.only)?,
            }
            loaded += 1;
        }

        info!("{} {} file(s) from {}", self.action, loaded, self.path.display());
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
