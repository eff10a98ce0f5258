//! HTTP Server Configuration
//!
//! Bind address and CORS origins for the listener. The on-disk format lives
//! in `cli::Config`, which shares the defaults below.

/// Bind host when none is configured
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Bind port when none is configured
pub(crate) fn default_port() -> u16 {
    8080
}

/// Runtime settings for [`super::HttpServer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// `host:port` as handed to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_all_interfaces() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr_uses_host_and_port() {
        let config = HttpServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            cors_origins: Vec::new(),
        };
        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
    }
}
