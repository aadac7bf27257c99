//! Drops whole entries, or one family of them, from the container.

use anyhow::bail;
use async_trait::async_trait;
use tracing::info;

use geoset_common::action::Action;
use geoset_common::config::Config;
use geoset_common::network::family::IgnoreOption;
use geoset_core::{Container, RemoveOutcome, RemoveScope};

use crate::converter::InputConverter;
use crate::input::tolerate_missing;
use crate::spec::ConverterSpec;

pub struct CutterInput {
    want: Vec<String>,
    only: IgnoreOption,
    strict: bool,
}

impl CutterInput {
    pub const TYPE: &'static str = "cutter";
    pub const DESCRIPTION: &'static str = "Remove the listed entries (or one family of them)";

    pub fn from_spec(spec: &ConverterSpec, cfg: &Config) -> anyhow::Result<Box<dyn InputConverter>> {
        let action = spec.action(Action::Remove)?;
        if action != Action::Remove {
            bail!("{} only supports action remove, got {action}", Self::TYPE);
        }
        let want = spec.want();
        if want.is_empty() {
            bail!("{} needs a non-empty 'want' list", Self::TYPE);
        }
        Ok(Box::new(Self {
            want,
            only: spec.only(cfg)?,
            strict: cfg.strict,
        }))
    }
}

#[async_trait]
impl InputConverter for CutterInput {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn action(&self) -> Action {
        Action::Remove
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn input(&self, container: &Container) -> anyhow::Result<()> {
        let mut deleted = 0;
        for name in &self.want {
            let removed = container.remove(name, RemoveScope::Whole, self.only);
            if tolerate_missing(name, removed, self.strict)? == Some(RemoveOutcome::Deleted) {
                deleted += 1;
            }
        }
        info!("cut {} of {} entries", deleted, self.want.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoset_core::Entry;
    use std::str::FromStr;

    fn container() -> Container {
        let container = Container::new();
        for name in ["cn", "us"] {
            let mut entry = Entry::new(name);
            entry.insert("10.0.0.0/8").unwrap();
            entry.insert("fc00::/7").unwrap();
            container.add(entry, IgnoreOption::None).unwrap();
        }
        container
    }

    #[tokio::test]
    async fn test_cut_whole_entries() {
        let container = container();
        let spec = ConverterSpec::from_str("cutter,want=cn+ghost").unwrap();
        CutterInput::from_spec(&spec, &Config::default())
            .unwrap()
            .input(&container)
            .await
            .unwrap();
        assert_eq!(container.names(), vec!["US"]);
    }

    #[tokio::test]
    async fn test_cut_one_family() {
        let container = container();
        let spec = ConverterSpec::from_str("cutter,want=us,only=ipv6").unwrap();
        CutterInput::from_spec(&spec, &Config::default())
            .unwrap()
            .input(&container)
            .await
            .unwrap();

        let us = container.get("us").unwrap();
        assert!(us.has_v4());
        assert!(!us.has_v6());
        assert!(container.get("cn").unwrap().has_v6());
    }

    #[test]
    fn test_cutter_requires_want() {
        let spec = ConverterSpec::from_str("cutter").unwrap();
        assert!(CutterInput::from_spec(&spec, &Config::default()).is_err());
        let spec = ConverterSpec::from_str("cutter,want=cn,action=add").unwrap();
        assert!(CutterInput::from_spec(&spec, &Config::default()).is_err());
    }
}
