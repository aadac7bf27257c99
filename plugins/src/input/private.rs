//! Reserved and special-purpose networks, as one `PRIVATE` entry.

use anyhow::bail;
use async_trait::async_trait;
use tracing::info;

use geoset_common::action::Action;
use geoset_common::config::Config;
use geoset_common::network::family::IgnoreOption;
use geoset_core::{Container, Entry, RemoveScope};

use crate::converter::InputConverter;
use crate::input::tolerate_missing;
use crate::spec::ConverterSpec;

const ENTRY_NAME: &str = "PRIVATE";

const RESERVED: &[&str] = &[
    "0.0.0.0/8",
    "10.0.0.0/8",
    "100.64.0.0/10",
    "127.0.0.0/8",
    "169.254.0.0/16",
    "172.16.0.0/12",
    "192.0.0.0/24",
    "192.0.2.0/24",
    "192.88.99.0/24",
    "192.168.0.0/16",
    "198.18.0.0/15",
    "198.51.100.0/24",
    "203.0.113.0/24",
    "224.0.0.0/4",
    "240.0.0.0/4",
    "255.255.255.255/32",
    "::/128",
    "::1/128",
    "fc00::/7",
    "fe80::/10",
    "ff00::/8",
];

pub struct PrivateInput {
    action: Action,
    only: IgnoreOption,
    strict: bool,
}

impl PrivateInput {
    pub const TYPE: &'static str = "private";
    pub const DESCRIPTION: &'static str = "Reserved and private-use networks as entry PRIVATE";

    pub fn from_spec(spec: &ConverterSpec, cfg: &Config) -> anyhow::Result<Box<dyn InputConverter>> {
        let action = spec.action(Action::Add)?;
        if action == Action::Output {
            bail!("{} input cannot use action {action}", Self::TYPE);
        }
        Ok(Box::new(Self {
            action,
            only: spec.only(cfg)?,
            strict: cfg.strict,
        }))
    }

    fn entry() -> anyhow::Result<Entry> {
        let mut entry = Entry::new(ENTRY_NAME);
        for cidr in RESERVED {
            entry.insert(*cidr)?;
        }
        Ok(entry)
    }
}

#[async_trait]
impl InputConverter for PrivateInput {
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
        let entry = Self::entry()?;
        match self.action {
            Action::Remove => {
                let removed = container.remove(ENTRY_NAME, RemoveScope::Prefixes(entry), self.only);
                tolerate_missing(ENTRY_NAME, removed, self.strict)?;
            }
            _ => container.add(entry, self.only)?,
        }
        info!("{} {} reserved networks", self.action, RESERVED.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_private_entry_is_added() {
        let spec = ConverterSpec::from_str("private").unwrap();
        let input = PrivateInput::from_spec(&spec, &Config::default()).unwrap();

        let container = Container::new();
        input.input(&container).await.unwrap();

        let (names, found) = container.lookup("192.168.1.1", &["private"]).unwrap();
        assert!(found);
        assert_eq!(names, vec!["PRIVATE"]);
        assert!(container.lookup("fd12::1", &["private"]).unwrap().1);
        assert!(!container.lookup("8.8.8.8", &["private"]).unwrap().1);
    }

    #[tokio::test]
    async fn test_private_only_ipv6() {
        let spec = ConverterSpec::from_str("private,only=ipv6").unwrap();
        let input = PrivateInput::from_spec(&spec, &Config::default()).unwrap();

        let container = Container::new();
        input.input(&container).await.unwrap();

        let entry = container.get("private").unwrap();
        assert!(!entry.has_v4());
        assert!(entry.has_v6());
    }
}
