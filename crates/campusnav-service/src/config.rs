//! Environment configuration for the HTTP service.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use campusnav_lib::resolve_map_path;
use campusnav_service_shared::MetricsConfig;

const DEFAULT_PORT: u16 = 8080;

/// Runtime settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// JSON map from `CAMPUSNAV_MAP_PATH`; `None` selects the reference campus.
    pub map_path: Option<PathBuf>,
    /// `SERVICE_PORT`, default 8080.
    pub port: u16,
    pub metrics: MetricsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            map_path: None,
            port: DEFAULT_PORT,
            metrics: MetricsConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let port = env::var("SERVICE_PORT")
            .ok()
            .and_then(|p| parse_port(&p))
            .unwrap_or(DEFAULT_PORT);

        Self {
            map_path: resolve_map_path(None),
            port,
            metrics: MetricsConfig::from_env(),
        }
    }

    /// Listen on every interface.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_port(value: &str) -> Option<u16> {
    value.trim().parse().ok().filter(|port| *port != 0)
}
