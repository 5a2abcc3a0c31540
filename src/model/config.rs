use clap::Parser;
use serde::{Deserialize, Serialize};

/**
 * Command-line arguments for the application.
 */
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ApplicationArguments {
    /**
     * Path to the configuration file.
     */
    #[arg(short, long)]
    pub config_file: String,
}

/**
 * Represents the configuration for the application.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /**
     * Logging configuration for the application.
     */
    pub logging: LoggingConfig,
    /**
     * Server configuration for the application.
     */
    pub server: Server,
    /**
     * Notification configuration. Defaults are used when the section is missing.
     */
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /**
     * Whether to log the target of the log message.
     */
    pub target: bool,
    /**
     * Whether to log thread IDs .
     */
    pub thread_ids: bool,
    /**
     * Whether to log thread names.
     */
    pub thread_names: bool,
    /**
     * Whether to log line numbers.
     */
    pub line_number: bool,
    /**
     * Whether to log the log level.
     */
    pub level: bool,
    /**
     * Whether to use ANSI colors in logs.
     */
    pub ansi: bool,
    /**
     * Whether to log the source file.
     */
    pub file: bool,
    /**
     * Additional directives for logging configuration, e.g. `parking_admin=debug`.
     */
    pub directives: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { target: true, thread_ids: true, thread_names: true, line_number: true, level: true, ansi: true, file: true, directives: vec![] }
    }
}

/**
 * Represents the server configuration for the application.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /**
     * Number of worker threads for the server.
     */
    pub workers: usize,
    /**
     * HTTP port for the server.
     */
    pub http_port: Option<u16>,
    /**
     * HTTPS configuration for the server.
     */
    pub https_config: Option<HttpsConfig>,
}

/**
 * Represents the HTTPS configuration for the server.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpsConfig {
    /**
     * Port for the HTTPS server.
     */
    pub port: u16,
    /**
     * Path to the certificate file.
     */
    pub certificate_file: String,
    /**
     * Path to the private key file.
     */
    pub private_key_file: String,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    /**
     * Number of undelivered notifications kept before the oldest are dropped.
     */
    pub capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig { capacity: 50 }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = Config {
            logging: LoggingConfig { directives: vec!["parking_admin=debug".to_string()], ..LoggingConfig::default() },
            server: Server {
                workers: 4,
                http_port: Some(8080),
                https_config: Some(HttpsConfig { port: 8443, certificate_file: "./certs/cert.pem".to_string(), private_key_file: "./certs/key.pem".to_string() }),
            },
            notifications: NotificationConfig { capacity: 10 },
        };
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.logging.target, deserialized.logging.target);
        assert_eq!(config.logging.thread_ids, deserialized.logging.thread_ids);
        assert_eq!(config.logging.line_number, deserialized.logging.line_number);
        assert_eq!(config.logging.ansi, deserialized.logging.ansi);
        assert_eq!(config.logging.directives, deserialized.logging.directives);
        assert_eq!(config.server.workers, deserialized.server.workers);
        assert_eq!(config.server.http_port, deserialized.server.http_port);
        let https_config = deserialized.server.https_config.unwrap();
        assert_eq!(https_config.port, 8443);
        assert_eq!(https_config.private_key_file, "./certs/key.pem");
        assert_eq!(deserialized.notifications.capacity, 10);
    }

    #[test]
    fn test_config_without_notifications_section() {
        let config_str = r#"
            [logging]
            target = false
            threadIds = false
            threadNames = false
            lineNumber = false
            level = true
            ansi = false
            file = false
            directives = []

            [server]
            workers = 2
            httpPort = 8080
        "#;
        let config: Config = toml::from_str(config_str).unwrap();
        assert_eq!(config.notifications.capacity, 50);
        assert_eq!(config.server.http_port, Some(8080));
        assert!(config.server.https_config.is_none());
        assert!(!config.logging.ansi);
    }
}
