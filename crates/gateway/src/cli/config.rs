use mw_domain::config::Config;

/// Parse and sanity-check the config, printing any issues.
///
/// Returns false when errors are found so the caller can exit non-zero.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let mut errors = Vec::new();

    if config.pipeline.window_size == 0 {
        errors.push("pipeline.window_size must be at least 1".to_string());
    }
    if config.pipeline.page_size == 0 {
        errors.push("pipeline.page_size must be at least 1".to_string());
    }
    if !(0.0..=1.0).contains(&config.pipeline.threshold) {
        errors.push(format!(
            "pipeline.threshold must be in [0, 1], got {}",
            config.pipeline.threshold
        ));
    }
    if config.pipeline.target_label.is_empty() {
        errors.push("pipeline.target_label must not be empty".to_string());
    }
    if config.classifier.project.is_empty() {
        errors.push("classifier.project is not set".to_string());
    }
    if config.classifier.endpoint_id.is_empty() {
        errors.push("classifier.endpoint_id is not set".to_string());
    }

    if errors.is_empty() {
        println!("Config OK ({config_path})");
        return true;
    }
    for error in &errors {
        println!("error: {error}");
    }
    println!("\n{} error(s) in {config_path}", errors.len());
    false
}

/// Dump the resolved config (with all defaults filled in) as TOML.
pub fn show(config: &Config) {
    match toml::to_string_pretty(config) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Failed to serialize config: {e}");
            std::process::exit(1);
        }
    }
}
