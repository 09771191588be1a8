use crate::{parse_or, process_env, string_or};

/// Listen address of the HTTP server.
///
/// # Environment Variables
///
/// - `HOST`: bind address (default: `0.0.0.0`)
/// - `PORT`: bind port (default: `5000`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: string_or(&lookup, "HOST", &defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_port_override() {
        let config = ServerConfig::from_lookup(lookup_from(&[("PORT", "10000")]));
        assert_eq!(config.port, 10000);
    }
}
