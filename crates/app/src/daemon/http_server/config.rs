use std::net::SocketAddr;

use crate::daemon::ServiceConfig;

#[derive(Debug, Clone)]
pub struct Config {
    // Listen address
    pub listen_addr: SocketAddr,
    // log level for http tracing
    pub log_level: tracing::Level,
}

impl From<&ServiceConfig> for Config {
    fn from(service_config: &ServiceConfig) -> Self {
        Self {
            listen_addr: service_config.listen_addr,
            log_level: service_config.log_level,
        }
    }
}
