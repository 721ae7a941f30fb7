use mw_domain::config::Config;

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
}

#[test]
fn explicit_zero_host_parses() {
    let toml_str = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
}

#[test]
fn default_pipeline_knobs() {
    let config = Config::default();
    assert_eq!(config.pipeline.page_size, 20);
    assert_eq!(config.pipeline.window_size, 20);
    assert_eq!(config.pipeline.target_label, "sexist");
    assert_eq!(config.pipeline.threshold, 0.5);
}

#[test]
fn default_slack_auth_reads_bot_token_env() {
    let config = Config::default();
    assert_eq!(config.slack.auth.env.as_deref(), Some("SLACK_BOT_TOKEN"));
    assert_eq!(config.slack.base_url, "https://slack.com/api");
}

#[test]
fn classifier_base_url_derived_from_location() {
    let config = Config::default();
    assert_eq!(
        config.classifier.effective_base_url(),
        "https://us-central1-aiplatform.googleapis.com"
    );
}

#[test]
fn classifier_base_url_override_wins() {
    let toml_str = r#"
[classifier]
base_url = "http://localhost:9999"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.classifier.effective_base_url(), "http://localhost:9999");
}

#[test]
fn partial_pipeline_section_keeps_other_defaults() {
    let toml_str = r#"
[pipeline]
threshold = 0.8
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.pipeline.threshold, 0.8);
    assert_eq!(config.pipeline.window_size, 20);
    assert_eq!(config.pipeline.target_label, "sexist");
}

#[test]
fn empty_config_parses_with_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.pipeline.page_size, 20);
    assert_eq!(config.classifier.location, "us-central1");
    assert_eq!(config.classifier.max_retries, 0);
}
