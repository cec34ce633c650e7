use crate::app::args::{Args, KeyValueArgs};
use crate::error::Error;

fn argv(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_key_value_pairs() {
    let mut args = KeyValueArgs::new();
    args.setup(&argv(&["shd=phong", "msaa=4"])).unwrap();

    assert_eq!(args.len(), 2);
    assert_eq!(args.value("shd"), Some("phong"));
    assert_eq!(args.value("msaa"), Some("4"));
    assert_eq!(args.value("missing"), None);
}

#[test]
fn test_quotes_are_stripped() {
    let mut args = KeyValueArgs::new();
    args.setup(&argv(&["title=\"falcon demo\"", "path='assets/mesh.bin'", "odd=\"open"]))
        .unwrap();

    assert_eq!(args.value("title"), Some("falcon demo"));
    assert_eq!(args.value("path"), Some("assets/mesh.bin"));
    assert_eq!(args.value("odd"), Some("\"open"));
}

#[test]
fn test_bare_key_has_empty_value() {
    let mut args = KeyValueArgs::new();
    args.setup(&argv(&["fullscreen"])).unwrap();

    assert!(args.exists("fullscreen"));
    assert_eq!(args.value("fullscreen"), Some(""));
    assert!(!args.bool_value("fullscreen"));
}

#[test]
fn test_value_or_and_bool_value() {
    let mut args = KeyValueArgs::new();
    args.setup(&argv(&["vsync=on", "debug=yes", "hud=false"])).unwrap();

    assert_eq!(args.value_or("shd", "default"), "default");
    assert_eq!(args.value_or("vsync", "off"), "on");
    assert!(args.bool_value("vsync"));
    assert!(args.bool_value("debug"));
    assert!(!args.bool_value("hud"));
    assert!(!args.bool_value("missing"));
}

#[test]
fn test_empty_key_is_rejected() {
    let mut args = KeyValueArgs::new();
    let result = args.setup(&argv(&["ok=1", "=value"]));

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(args.is_empty());
}

#[test]
fn test_shutdown_clears_values() {
    let mut args = KeyValueArgs::new();
    args.setup(&argv(&["a=1"])).unwrap();
    args.shutdown();

    assert!(!args.exists("a"));
}
