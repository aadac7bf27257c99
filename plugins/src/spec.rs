//! # Converter Specifications
//!
//! A converter is named on the command line as
//! `type[:path][,key=value...]`, for example:
//! * `private`
//! * `text:./data`
//! * `text,path=./cn.txt,name=cn,action=remove`
//! * `cutter,want=cn+us,only=ipv6`
//!
//! Lists inside a value are separated with `+`.

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::Context;

use geoset_common::action::Action;
use geoset_common::config::Config;
use geoset_common::network::family::{AddressFamily, IgnoreOption};
use geoset_core::entry::normalize_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterSpec {
    pub type_name: String,
    pub options: BTreeMap<String, String>,
}

impl FromStr for ConverterSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);

        let head = parts.next().unwrap_or_default();
        let (type_name, path) = match head.split_once(':') {
            Some((name, path)) => (name, Some(path)),
            None => (head, None),
        };
        let type_name = type_name.trim().to_ascii_lowercase();
        if type_name.is_empty() {
            return Err(format!("missing converter type in '{s}'"));
        }

        let mut options = BTreeMap::new();
        if let Some(path) = path {
            options.insert("path".to_string(), path.to_string());
        }

        for part in parts {
            if part.is_empty() {
                continue;
            }
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, found '{part}' in '{s}'"))?;
            options.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }

        Ok(Self { type_name, options })
    }
}

impl ConverterSpec {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn require(&self, key: &str) -> anyhow::Result<&str> {
        self.get(key)
            .with_context(|| format!("converter '{}' needs option '{key}'", self.type_name))
    }

    /// The `action` option, or `default` when absent.
    pub fn action(&self, default: Action) -> anyhow::Result<Action> {
        match self.get("action") {
            Some(action) => Ok(action.parse::<Action>()?),
            None => Ok(default),
        }
    }

    /// The `only` option as a family filter, falling back to the global one.
    pub fn only(&self, cfg: &Config) -> anyhow::Result<IgnoreOption> {
        match self.get("only") {
            Some(family) => {
                let family = family.parse::<AddressFamily>().map_err(anyhow::Error::msg)?;
                Ok(IgnoreOption::from_only_family(family))
            }
            None => Ok(cfg.only),
        }
    }

    /// The `want` option as normalized entry names.
    pub fn want(&self) -> Vec<String> {
        self.get("want")
            .map(|list| {
                list.split('+')
                    .map(normalize_name)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
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

#[cfg(test)]
mod tests {
    use super::*;
    use geoset_common::GeoError;

    #[test]
    fn test_parse_bare_type() {
        let spec = ConverterSpec::from_str("Private").unwrap();
        assert_eq!(spec.type_name, "private");
        assert!(spec.options.is_empty());
    }

    #[test]
    fn test_parse_path_shorthand_and_options() {
        let spec = ConverterSpec::from_str("text:./data, action=remove ,want=cn+ us").unwrap();
        assert_eq!(spec.type_name, "text");
        assert_eq!(spec.get("path"), Some("./data"));
        assert_eq!(spec.action(Action::Add).unwrap(), Action::Remove);
        assert_eq!(spec.want(), vec!["CN", "US"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(ConverterSpec::from_str("").is_err());
        assert!(ConverterSpec::from_str(":x").is_err());
        assert!(ConverterSpec::from_str("text,oops").is_err());
    }

    #[test]
    fn test_unknown_action_surfaces() {
        let spec = ConverterSpec::from_str("text,action=merge").unwrap();
        let err = spec.action(Action::Add).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GeoError>(),
            Some(&GeoError::UnknownAction("merge".into()))
        );
    }

    #[test]
    fn test_only_option_overrides_config() {
        let cfg = Config {
            only: IgnoreOption::IgnoreV4,
            ..Config::default()
        };
        let spec = ConverterSpec::from_str("stdout,only=ipv4").unwrap();
        assert_eq!(spec.only(&cfg).unwrap(), IgnoreOption::IgnoreV6);

        let spec = ConverterSpec::from_str("stdout").unwrap();
        assert_eq!(spec.only(&cfg).unwrap(), IgnoreOption::IgnoreV4);

        let spec = ConverterSpec::from_str("stdout,only=ipv7").unwrap();
        assert!(spec.only(&cfg).is_err());
    }

    #[test]
    fn test_require() {
        let spec = ConverterSpec::from_str("cutter,want=").unwrap();
        assert!(spec.require("want").is_err());
        assert!(spec.want().is_empty());
    }
}
