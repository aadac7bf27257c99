//! # Converter Registry
//!
//! Maps converter type names to constructors. A registry is an ordinary
//! value: build one with [`Registry::with_defaults`] at startup and pass it
//! to whatever turns [`ConverterSpec`]s into converters.

use std::collections::BTreeMap;

use anyhow::bail;

use geoset_common::config::Config;

use crate::converter::{InputConverter, OutputConverter};
use crate::input::{cutter::CutterInput, private::PrivateInput, text::TextInput};
use crate::output::{stdout::StdoutOutput, text::TextOutput};
use crate::spec::ConverterSpec;

pub type InputFactory = fn(&ConverterSpec, &Config) -> anyhow::Result<Box<dyn InputConverter>>;
pub type OutputFactory = fn(&ConverterSpec, &Config) -> anyhow::Result<Box<dyn OutputConverter>>;

struct Registration<F> {
    description: &'static str,
    factory: F,
}

#[derive(Default)]
pub struct Registry {
    inputs: BTreeMap<&'static str, Registration<InputFactory>>,
    outputs: BTreeMap<&'static str, Registration<OutputFactory>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in converter.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert_input(TextInput::TYPE, TextInput::DESCRIPTION, TextInput::from_spec);
        registry.insert_input(PrivateInput::TYPE, PrivateInput::DESCRIPTION, PrivateInput::from_spec);
        registry.insert_input(CutterInput::TYPE, CutterInput::DESCRIPTION, CutterInput::from_spec);
        registry.insert_output(TextOutput::TYPE, TextOutput::DESCRIPTION, TextOutput::from_spec);
        registry.insert_output(StdoutOutput::TYPE, StdoutOutput::DESCRIPTION, StdoutOutput::from_spec);
        registry
    }

    fn insert_input(&mut self, type_name: &'static str, description: &'static str, factory: InputFactory) {
        self.inputs.insert(type_name, Registration { description, factory });
    }

    fn insert_output(&mut self, type_name: &'static str, description: &'static str, factory: OutputFactory) {
        self.outputs.insert(type_name, Registration { description, factory });
    }

    pub fn register_input(
        &mut self,
        type_name: &'static str,
        description: &'static str,
        factory: InputFactory,
    ) -> anyhow::Result<()> {
        if self.inputs.contains_key(type_name) {
            bail!("input converter '{type_name}' is already registered");
        }
        self.insert_input(type_name, description, factory);
        Ok(())
    }

    pub fn register_output(
        &mut self,
        type_name: &'static str,
        description: &'static str,
        factory: OutputFactory,
    ) -> anyhow::Result<()> {
        if self.outputs.contains_key(type_name) {
            bail!("output converter '{type_name}' is already registered");
        }
        self.insert_output(type_name, description, factory);
        Ok(())
    }

    pub fn build_input(&self, spec: &ConverterSpec, cfg: &Config) -> anyhow::Result<Box<dyn InputConverter>> {
        match self.inputs.get(spec.type_name.as_str()) {
            Some(registration) => (registration.factory)(spec, cfg),
            None => bail!("unknown input converter type: {}", spec.type_name),
        }
    }

    pub fn build_output(&self, spec: &ConverterSpec, cfg: &Config) -> anyhow::Result<Box<dyn OutputConverter>> {
        match self.outputs.get(spec.type_name.as_str()) {
            Some(registration) => (registration.factory)(spec, cfg),
            None => bail!("unknown output converter type: {}", spec.type_name),
        }
    }

    /// `(type, description)` of every input converter, sorted by type.
    pub fn input_types(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.inputs.iter().map(|(name, reg)| (*name, reg.description))
    }

    pub fn output_types(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.outputs.iter().map(|(name, reg)| (*name, reg.description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults_are_registered() {
        let registry = Registry::with_defaults();
        let inputs: Vec<_> = registry.input_types().map(|(name, _)| name).collect();
        let outputs: Vec<_> = registry.output_types().map(|(name, _)| name).collect();
        assert_eq!(inputs, vec!["cutter", "private", "text"]);
        assert_eq!(outputs, vec!["stdout", "text"]);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = Registry::with_defaults();
        assert!(registry.register_input("text", "again", TextInput::from_spec).is_err());
        assert!(registry.register_output("csv", "not really", TextOutput::from_spec).is_ok());
    }

    #[test]
    fn test_build_unknown_type_fails() {
        let registry = Registry::with_defaults();
        let spec = ConverterSpec::from_str("mmdb:./Country.mmdb").unwrap();
        assert!(registry.build_input(&spec, &Config::default()).is_err());
        assert!(registry.build_output(&spec, &Config::default()).is_err());
    }

    #[test]
    fn test_build_known_type() {
        let registry = Registry::with_defaults();
        let spec = ConverterSpec::from_str("private").unwrap();
        let input = registry.build_input(&spec, &Config::default()).unwrap();
        assert_eq!(input.type_name(), "private");
    }
}
