//! Prints entries to standard output in a form the text input can re-read.

use std::io::Write;

use async_trait::async_trait;
use tracing::warn;

use geoset_common::GeoError;
use geoset_common::config::Config;
use geoset_common::network::family::IgnoreOption;
use geoset_core::Container;

use crate::converter::OutputConverter;
use crate::output::selected_entries;
use crate::spec::ConverterSpec;

pub struct StdoutOutput {
    want: Vec<String>,
    only: IgnoreOption,
}

impl StdoutOutput {
    pub const TYPE: &'static str = "stdout";
    pub const DESCRIPTION: &'static str = "Print entries as commented CIDR lists";

    pub fn from_spec(spec: &ConverterSpec, cfg: &Config) -> anyhow::Result<Box<dyn OutputConverter>> {
        Ok(Box::new(Self {
            want: spec.want(),
            only: spec.only(cfg)?,
        }))
    }

    /// `# NAME` followed by the entry's CIDRs, for every selected entry.
    pub fn render(&self, container: &Container) -> anyhow::Result<String> {
        let mut out = String::new();
        for entry in selected_entries(container, &self.want) {
            match entry.to_text(self.only) {
                Ok(lines) => {
                    out.push_str(&format!("# {}\n", entry.name()));
                    for line in lines {
                        out.push_str(&line);
                        out.push('\n');
                    }
                }
                Err(GeoError::EntryHasNoPrefix(name)) => warn!("entry {name} has no prefix, skipped"),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl OutputConverter for StdoutOutput {
    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    async fn output(&self, container: &Container) -> anyhow::Result<()> {
        let rendered = self.render(container)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoset_core::Entry;
    use std::str::FromStr;

    #[test]
    fn test_render_is_sorted_and_filtered() {
        let container = Container::new();
        for (name, cidr) in [("us", "3.0.0.0/8"), ("cn", "1.0.1.0/24"), ("jp", "2001:200::/23")] {
            let mut entry = Entry::new(name);
            entry.insert(cidr).unwrap();
            container.add(entry, IgnoreOption::None).unwrap();
        }

        let spec = ConverterSpec::from_str("stdout,only=ipv4").unwrap();
        let output = StdoutOutput {
            want: spec.want(),
            only: spec.only(&Config::default()).unwrap(),
        };
        assert_eq!(
            output.render(&container).unwrap(),
            "# CN\n1.0.1.0/24\n# US\n3.0.0.0/8\n"
        );

        let output = StdoutOutput {
            want: vec!["JP".into(), "MISSING".into()],
            only: IgnoreOption::None,
        };
        assert_eq!(output.render(&container).unwrap(), "# JP\n2001:200::/23\n");
    }
}
