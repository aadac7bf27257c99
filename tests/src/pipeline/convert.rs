#![cfg(test)]
use std::fs;
use std::path::Path;
use std::str::FromStr;

use geoset_common::config::Config;
use geoset_common::network::family::IgnoreOption;
use geoset_core::Container;
use geoset_plugins::{ConverterSpec, InputConverter, OutputConverter, Registry};

fn inputs(registry: &Registry, specs: &[String], cfg: &Config) -> Vec<Box<dyn InputConverter>> {
    specs
        .iter()
        .map(|s| registry.build_input(&ConverterSpec::from_str(s).unwrap(), cfg).unwrap())
        .collect()
}

fn outputs(registry: &Registry, specs: &[String], cfg: &Config) -> Vec<Box<dyn OutputConverter>> {
    specs
        .iter()
        .map(|s| registry.build_output(&ConverterSpec::from_str(s).unwrap(), cfg).unwrap())
        .collect()
}

fn write(dir: &Path, file: &str, body: &str) {
    fs::write(dir.join(file), body).unwrap();
}

/// Two additive loads of overlapping data, a scoped removal and a cut,
/// written back out as text.
#[tokio::test]
async fn convert_merge_remove_and_write() {
    let src = tempfile::tempdir().unwrap();
    let extra = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    write(src.path(), "cn.txt", "# cn\n1.0.1.0/24\n1.0.2.0/23\n2001:250::/35\n");
    write(src.path(), "us.txt", "3.0.0.0/8\n2600::/12\n");
    write(extra.path(), "cn.txt", "1.0.1.0/25 // overlap\n1.0.8.0/21\n");
    write(extra.path(), "holes.txt", "3.1.0.0/16\n");

    let registry = Registry::with_defaults();
    let cfg = Config::default();

    let input_specs = vec![
        format!("text:{}", src.path().display()),
        format!("text:{},want=cn", extra.path().display()),
        format!("text:{},name=us,action=remove", extra.path().join("holes.txt").display()),
        "private".to_string(),
        "cutter,want=private".to_string(),
    ];
    let output_specs = vec![format!("text:{}", out.path().display())];

    let container = Container::new();
    geoset_plugins::run(
        &inputs(&registry, &input_specs, &cfg),
        &outputs(&registry, &output_specs, &cfg),
        &container,
    )
    .await
    .unwrap();

    assert_eq!(container.names(), vec!["CN", "US"]);

    let cn = fs::read_to_string(out.path().join("cn.txt")).unwrap();
    assert_eq!(cn, "1.0.1.0/24\n1.0.2.0/23\n1.0.8.0/21\n2001:250::/35\n");

    let us = fs::read_to_string(out.path().join("us.txt")).unwrap();
    assert!(us.starts_with("3.0.0.0/16\n3.2.0.0/15\n"), "{us}");
    assert!(us.ends_with("2600::/12\n"), "{us}");
    assert!(!us.contains("3.1.0.0"));
}

#[tokio::test]
async fn convert_only_ipv6_globally() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "jp.txt", "1.0.16.0/20\n2001:200::/23\n");

    let registry = Registry::with_defaults();
    let cfg = Config {
        only: IgnoreOption::from_only(false, true),
        ..Config::default()
    };

    let container = Container::new();
    geoset_plugins::run(
        &inputs(&registry, &[format!("text:{}", src.path().display())], &cfg),
        &outputs(&registry, &[format!("text:{}", out.path().display())], &cfg),
        &container,
    )
    .await
    .unwrap();

    let jp = container.get("jp").unwrap();
    assert!(!jp.has_v4());
    assert_eq!(fs::read_to_string(out.path().join("jp.txt")).unwrap(), "2001:200::/23\n");
}

#[tokio::test]
async fn convert_aborts_on_malformed_line() {
    let src = tempfile::tempdir().unwrap();
    write(src.path(), "bad.txt", "1.1.1.0/24\n1.1.1.0/40\n");

    let registry = Registry::with_defaults();
    let cfg = Config::default();
    let container = Container::new();

    let result = geoset_plugins::run(
        &inputs(&registry, &[format!("text:{}", src.path().display())], &cfg),
        &[],
        &container,
    )
    .await;

    assert!(result.is_err());
    assert!(container.is_empty());
}
