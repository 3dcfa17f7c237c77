use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn reads_all_variables() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("MAPPINNER_HOST", "127.0.0.1"),
        ("PORT", "8080"),
        ("MAPPINNER_MAX_HOTSPOTS", "25"),
    ]))
    .unwrap();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.max_hotspots, 25);
    assert_eq!(config.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = ServerConfig::from_lookup(lookup(&[("MAPPINNER_HOST", " "), ("PORT", "")])).unwrap();
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
fn invalid_port_names_variable() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "eighty".into() });
    assert!(err.to_string().contains("PORT"));
}

#[test]
fn invalid_max_hotspots_names_variable() {
    let err = ServerConfig::from_lookup(lookup(&[("MAPPINNER_MAX_HOTSPOTS", "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "MAPPINNER_MAX_HOTSPOTS", .. }));
}
