mod api;
mod model;
mod service;

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::api::endpoints::{ApiRecord, configure_routes};
use crate::api::middleware::request_timing;
use crate::api::state::AppState;
use crate::model::apperror::{ApplicationError, ErrorType};
use crate::model::config::{ApplicationArguments, Config, HttpsConfig, LoggingConfig};
use crate::model::models::{ParkingLocation, ParkingRate};
use crate::service::notification::NotificationCenter;

use actix_web::middleware::from_fn;
use actix_web::{App, HttpServer, web};
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use clap::Parser;
use prometheus::IntGauge;
use rustls::pki_types::PrivateKeyDer;
use rustls::{ServerConfig, SupportedProtocolVersion};
use rustls_pemfile::{certs, pkcs8_private_keys};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = ApplicationArguments::parse();

    let config = get_config(&args.config_file)?;

    init_tracing(&config.logging)?;

    let notification_center = Arc::new(NotificationCenter::new(config.notifications.capacity));
    let state = web::Data::new(AppState::new(notification_center));

    let prometheus = PrometheusMetricsBuilder::new("")
        .endpoint("/metrics")
        .mask_unmatched_patterns("UNKNOWN")
        .build()
        .map_err(|err| std::io::Error::other(format!("Failed to create Prometheus metrics: {err}")))?;

    // Initialize custom metrics
    let locations_gauge = IntGauge::new("parking_locations", "Parking locations in the collection").map_err(|err| std::io::Error::other(format!("Failed to create parking_locations gauge: {err}")))?;
    let rates_gauge = IntGauge::new("parking_rates", "Rate plans in the collection").map_err(|err| std::io::Error::other(format!("Failed to create parking_rates gauge: {err}")))?;
    register_prometheus_metrics(&prometheus, &locations_gauge)?;
    register_prometheus_metrics(&prometheus, &rates_gauge)?;

    gather_collection_metrics(locations_gauge, rates_gauge, state.clone());

    let server_init = HttpServer::new(move || App::new().wrap(prometheus.clone()).wrap(from_fn(request_timing)).app_data(state.clone()).configure(configure_routes));

    let server_init = if let Some(http_port) = &config.server.http_port {
        info!(port = http_port, "Listening for http");
        server_init.bind(("127.0.0.1", *http_port))?
    } else {
        server_init
    };
    let server_init = if let Some(https_config) = &config.server.https_config {
        let ssl_builder = ssl_builder(https_config).map_err(|err| std::io::Error::other(format!("Failed to create SSL/TLS configuration: {err}")))?;
        info!(port = https_config.port, "Listening for https");
        server_init.bind_rustls_0_23(("127.0.0.1", https_config.port), ssl_builder).map_err(|err| std::io::Error::other(format!("Failed to bind HTTPS server: {err}")))?
    } else {
        server_init
    };

    server_init.workers(config.server.workers).run().await
}

/**
 * Initializes structured logging for the application.
 *
 * #Arguments
 * `logging`: Formatting switches and extra filter directives.
 *
 * #Returns
 * A `Result` indicating success or failure.
 */
fn init_tracing(logging: &LoggingConfig) -> Result<(), std::io::Error> {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    for directive in &logging.directives {
        let directive = directive.parse().map_err(|err| std::io::Error::other(format!("Invalid logging directive {directive}: {err}")))?;
        filter = filter.add_directive(directive);
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(logging.target)
        .with_thread_ids(logging.thread_ids)
        .with_thread_names(logging.thread_names)
        .with_line_number(logging.line_number)
        .with_level(logging.level)
        .with_ansi(logging.ansi)
        .with_file(logging.file);

    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init().map_err(|err| std::io::Error::other(format!("Failed to initialize logging: {err}")))?;

    Ok(())
}

/**
 * Registers custom Prometheus metrics.
 *
 * #Arguments
 * `prometheus_metrics`: The Prometheus metrics instance to register the gauge with.
 * `gauge`: The gauge to register.
 */
fn register_prometheus_metrics(prometheus_metrics: &PrometheusMetrics, gauge: &IntGauge) -> Result<(), std::io::Error> {
    prometheus_metrics.registry.register(Box::new(gauge.clone())).map_err(|err| std::io::Error::other(format!("Failed to register Prometheus gauge: {err}")))?;
    Ok(())
}

/**
 * Gathers collection sizes in a separate thread.
 *
 * #Arguments
 * `locations_gauge`: Gauge for the number of parking locations.
 * `rates_gauge`: Gauge for the number of rate plans.
 * `state`: The application state holding the collections.
 */
fn gather_collection_metrics(locations_gauge: IntGauge, rates_gauge: IntGauge, state: web::Data<AppState>) {
    thread::spawn(move || {
        loop {
            if let Ok(editor) = ParkingLocation::editor(&state).lock() {
                locations_gauge.set(i64::try_from(editor.list().len()).unwrap_or(i64::MAX));
            }
            if let Ok(editor) = ParkingRate::editor(&state).lock() {
                rates_gauge.set(i64::try_from(editor.list().len()).unwrap_or(i64::MAX));
            }
            thread::sleep(Duration::from_secs(1));
        }
    });
}

/**
 * Initializes the SSL/TLS configuration for the server.
 *
 * #Arguments
 * `https_config`: The HTTPS configuration containing the certificate and private key files.
 *
 * #Returns
 * A `Result` containing the initialized `ServerConfig` or an `ApplicationError` if initialization fails.
 */
fn ssl_builder(https_config: &HttpsConfig) -> Result<ServerConfig, ApplicationError> {
    let config_builder = ServerConfig::builder_with_protocol_versions(&get_protocol_versions());
    let cert_file = &mut std::io::BufReader::new(
        std::fs::File::open(&https_config.certificate_file).map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to read certificate file: {err}")))?,
    );
    let key_file = &mut std::io::BufReader::new(
        std::fs::File::open(&https_config.private_key_file).map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to read private key file: {err}")))?,
    );
    let cert_chain = certs(cert_file).collect::<Result<Vec<_>, _>>().map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to convert certificate to der: {err}")))?;
    let key = pkcs8_private_keys(key_file)
        .map(|key| key.map(PrivateKeyDer::Pkcs8))
        .next()
        .ok_or_else(|| ApplicationError::new(ErrorType::Initialization, "No private key found in private key file".to_string()))?
        .map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to convert private key to der: {err}")))?;
    let config = config_builder
        .with_no_client_auth()
        .with_single_cert(cert_chain, key)
        .map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to create server config: {err}")))?;
    Ok(config)
}

/**
 * Returns the supported TLS protocol versions.
 */
fn get_protocol_versions() -> Vec<&'static SupportedProtocolVersion> {
    vec![&rustls::version::TLS13]
}

/**
 * Reads the configuration from the specified file.
 *
 * #Arguments
 * `config_file`: The path to the configuration file.
 *
 * #Returns
 * A `Result` containing the parsed `Config` or an `std::io::Error` if reading or parsing fails.
*/
fn get_config(config_file: &str) -> Result<Config, std::io::Error> {
    let config_str: String = std::fs::read_to_string(config_file).map_err(|err| std::io::Error::other(format!("Failed to read config file: {err}")))?;
    let config: Config = toml::from_str(&config_str).map_err(|err| std::io::Error::other(format!("Failed to parse config file: {err}")))?;
    Ok(config)
}
