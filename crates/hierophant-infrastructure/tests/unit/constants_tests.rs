//! Constants Tests

use hierophant_infrastructure::constants::*;

#[test]
fn test_config_constants() {
    assert!(DEFAULT_CONFIG_FILENAME.ends_with(".toml"));
    assert_eq!(CONFIG_ENV_PREFIX, "HIEROPHANT");
    assert!(LOG_FILTER_ENV.starts_with(CONFIG_ENV_PREFIX));
}

#[test]
fn test_resolution_constants() {
    assert!(DEFAULT_MAX_RESOLUTION_DEPTH > 0);
}
