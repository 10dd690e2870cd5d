use rproxy_middlewares::settings::{parse_env_var, LogFormat, Settings, SettingsError};

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial; // 환경 변수를 공유하므로 순차 실행

    fn cleanup_env() {
        std::env::remove_var("PROXY_LOG_LEVEL");
        std::env::remove_var("PROXY_LOG_FORMAT");
        std::env::remove_var("PROXY_CONFIG_FILE");
    }

    fn create_test_toml(content: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");
        std::fs::write(&file_path, content).unwrap();
        (file_path.to_str().unwrap().to_string(), dir)
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        cleanup_env();

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.logging.level, tracing::Level::INFO);
        assert_eq!(settings.logging.format, LogFormat::Text);
    }

    #[test]
    #[serial]
    fn test_settings_from_env() {
        cleanup_env();
        std::env::set_var("PROXY_LOG_LEVEL", "debug");
        std::env::set_var("PROXY_LOG_FORMAT", "json");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(settings.logging.format, LogFormat::Json);

        cleanup_env();
    }

    #[test]
    #[serial]
    fn test_settings_invalid_env() {
        cleanup_env();

        std::env::set_var("PROXY_LOG_LEVEL", "invalid_level");
        assert!(Settings::from_env().is_err());
        cleanup_env();

        std::env::set_var("PROXY_LOG_FORMAT", "xml");
        assert!(Settings::from_env().is_err());
        cleanup_env();
    }

    #[test]
    #[serial]
    fn test_missing_env_var_uses_default() {
        cleanup_env();

        let level: tracing::Level = parse_env_var("PROXY_LOG_LEVEL", || tracing::Level::ERROR).unwrap();
        assert_eq!(level, tracing::Level::ERROR);

        std::env::set_var("PROXY_LOG_LEVEL", "loud");
        let result: Result<tracing::Level, _> = parse_env_var("PROXY_LOG_LEVEL", || tracing::Level::ERROR);
        assert!(matches!(result, Err(SettingsError::EnvVarInvalid { .. })));
        cleanup_env();
    }

    #[test]
    #[serial]
    fn test_load_from_config_file() {
        cleanup_env();
        let (path, _dir) = create_test_toml(
            r#"
            [logging]
            format = "json"
            level = "warn"
            "#,
        );
        std::env::set_var("PROXY_CONFIG_FILE", &path);

        let settings = Settings::load().unwrap();
        assert_eq!(settings.logging.level, tracing::Level::WARN);
        assert_eq!(settings.logging.format, LogFormat::Json);

        cleanup_env();
    }

    #[test]
    #[serial]
    fn test_missing_config_file() {
        cleanup_env();
        assert!(Settings::from_toml_file("/nonexistent/config.toml").is_err());
    }
}
