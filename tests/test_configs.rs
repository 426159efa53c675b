use quelog::configs::LoggerSettings;
use quelog::loggers::{LogLevel, Logger};
use figment::Jail;

#[test]
fn test_settings_build_a_logger() {
    Jail::expect_with(|jail| {
        jail.create_file("logging.json", r#"{ "buffer_size": 12, "level": "warn" }"#)?;
        jail.set_env("QUELOG_RETRY_DELAY_MS", "5");

        let settings = LoggerSettings::load("logging.json")
            .map_err(|e| figment::Error::from(e.to_string()))?;
        let logger = Logger::with_config(settings.into_config())
            .map_err(|e| figment::Error::from(e.to_string()))?;

        assert_eq!(logger.capacity(), 12);
        let opts = logger.options();
        assert_eq!(opts.level, LogLevel::Warn);
        assert_eq!(opts.retry_delay.as_millis(), 5);
        assert_eq!(opts.max_attempts, 3);

        logger.shutdown().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(())
    });
}

#[test]
fn test_zero_buffer_falls_back_to_default() {
    Jail::expect_with(|jail| {
        jail.set_env("QUELOG_BUFFER_SIZE", "0");
        let settings = LoggerSettings::from_env().map_err(|e| figment::Error::from(e.to_string()))?;
        assert_eq!(settings.buffer_size, 0);

        let logger = Logger::with_config(settings.into_config())
            .map_err(|e| figment::Error::from(e.to_string()))?;
        assert_eq!(logger.capacity(), 100);
        logger.shutdown().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(())
    });
}
