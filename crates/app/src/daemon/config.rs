use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// address for the HTML server to listen on
    pub listen_addr: SocketAddr,

    // data store configuration
    /// directory holding the flat document namespace
    pub data_path: PathBuf,
    /// directory of static images, served as-is and
    ///  checked when image references are created
    pub public_path: PathBuf,
    /// YAML file mapping usernames to password hashes
    pub credentials_path: PathBuf,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}
