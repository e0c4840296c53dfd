use super::*;

use std::collections::HashMap;

#[test]
fn defaults_match_documented_values() {
    let cfg = ConsoleConfig::default();
    assert_eq!(cfg.base_url, "http://127.0.0.1:8000");
    assert_eq!(cfg.token, None);
    assert_eq!(cfg.page_limit, 100);
    assert_eq!(cfg.catalog_limit, 30);
    assert_eq!(cfg.request_timeout(), Duration::from_secs(15));
    assert_eq!(cfg.intervals.logs(), Duration::from_secs(5));
    assert_eq!(cfg.intervals.stats(), Duration::from_secs(10));
    assert_eq!(cfg.intervals.repositories(), Duration::from_secs(10));
    assert_eq!(cfg.intervals.catalog(), Duration::from_secs(30));
    assert_eq!(cfg.intervals.setup(), Duration::from_secs(1));
    cfg.validate().unwrap();
}

#[test]
fn env_overrides_url_and_token_but_ignores_blank_values() {
    let env: HashMap<&str, &str> = HashMap::from([(ENV_URL, "https://warden.example"), (ENV_TOKEN, "  ")]);
    let mut cfg = ConsoleConfig::default();
    cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.base_url, "https://warden.example");
    assert_eq!(cfg.token, None);

    cfg.apply_env(|k| (k == ENV_TOKEN).then(|| "tok".to_string()));
    assert_eq!(cfg.token.as_deref(), Some("tok"));
    assert_eq!(cfg.base_url, "https://warden.example");
}

#[test]
fn validate_rejects_bad_scheme_limits_and_zero_intervals() {
    let mut cfg = ConsoleConfig::default();
    cfg.base_url = "ftp://x".to_string();
    assert!(cfg.validate().unwrap_err().to_string().contains("http://"));

    let mut cfg = ConsoleConfig::default();
    cfg.page_limit = 0;
    assert!(cfg.validate().unwrap_err().to_string().contains("page_limit"));

    let mut cfg = ConsoleConfig::default();
    cfg.catalog_limit = 201;
    assert!(cfg.validate().unwrap_err().to_string().contains("catalog_limit"));

    let mut cfg = ConsoleConfig::default();
    cfg.intervals.setup_secs = 0;
    assert!(
        cfg.validate()
            .unwrap_err()
            .to_string()
            .contains("intervals.setup_secs")
    );
}

#[test]
fn read_fills_missing_fields_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console.json");
    std::fs::write(
        &path,
        r#"{ "base_url": "http://10.0.0.2:9000", "intervals": { "logs_secs": 2 } }"#,
    )
    .unwrap();

    let cfg = ConsoleConfig::read(&path).unwrap();
    assert_eq!(cfg.base_url, "http://10.0.0.2:9000");
    assert_eq!(cfg.intervals.logs_secs, 2);
    assert_eq!(cfg.intervals.stats_secs, 10);
    assert_eq!(cfg.page_limit, 100);
}

#[test]
fn read_reports_path_on_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = ConsoleConfig::read(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.json"));
}
