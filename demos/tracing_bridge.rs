use std::sync::Arc;
use tracing::{debug, error, info};

use json_log_facade::init::init_tracing;
use json_log_facade::{LogConfiguration, Logger};

fn main() {
    let logger = Arc::new(Logger::new(LogConfiguration::new("bridge-demo")));
    if let Err(err) = init_tracing(Arc::clone(&logger)) {
        eprintln!("tracing already initialized: {}", err);
        return;
    }

    info!(request_id = "sess-1", "tracing events become JSON lines");
    debug!("debug events are not recorded");
    error!(request_id = "sess-1", user_id = 42, "authentication failed");
}
