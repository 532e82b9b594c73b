use json_log_facade::{log_error, log_info, LogConfiguration, Logger};

fn main() {
    // LOG_FILE=/tmp/app.log LOG_SERVICE_NAME=api cargo run --example basic
    let config = LogConfiguration::from_env();
    let logger = Logger::new(config);

    logger.info("service started", "sess-123");
    log_info!(logger, "sess-123", "listening on port {}", 8080);
    log_error!(logger, "sess-456", "upstream returned {}", 502);
    logger.fatal("recorded at fatal level, process keeps running", "sess-456");
}
