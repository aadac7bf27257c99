#![cfg(test)]
use std::str::FromStr;

use geoset_common::GeoError;
use geoset_common::config::Config;
use geoset_core::Container;
use geoset_plugins::{ConverterSpec, Registry};

async fn load(dir: &std::path::Path) -> Container {
    std::fs::write(dir.join("test.txt"), "192.168.1.0/24\n").unwrap();
    std::fs::write(dir.join("wide.txt"), "192.168.0.0/16\n2001:db8::/32\n").unwrap();

    let registry = Registry::with_defaults();
    let spec = ConverterSpec::from_str(&format!("text:{}", dir.display())).unwrap();
    let input = registry.build_input(&spec, &Config::default()).unwrap();

    let container = Container::new();
    input.input(&container).await.unwrap();
    container
}

#[tokio::test]
async fn lookup_across_loaded_files() {
    let dir = tempfile::tempdir().unwrap();
    let container = load(dir.path()).await;
    let no_names: [&str; 0] = [];

    assert_eq!(
        container.lookup("192.168.1.100", &no_names).unwrap(),
        (vec!["TEST".to_string(), "WIDE".to_string()], true)
    );
    assert_eq!(
        container.lookup("192.168.1.0/25", &["test"]).unwrap(),
        (vec!["TEST".to_string()], true)
    );
    assert_eq!(
        container.lookup("192.168.2.0/24", &no_names).unwrap(),
        (vec!["WIDE".to_string()], true)
    );
    assert_eq!(container.lookup("10.0.0.1", &no_names).unwrap(), (vec![], false));
    assert_eq!(
        container.lookup("2001:db8:ffff::/48", &no_names).unwrap(),
        (vec!["WIDE".to_string()], true)
    );
    assert_eq!(
        container.lookup("not-an-ip", &no_names),
        Err(GeoError::InvalidAddress("not-an-ip".into()))
    );
}
