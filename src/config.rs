use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::services::portfolio_history_service::AggregationOptions;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub sort_histories_by_date: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            sort_histories_by_date: false,
        }
    }
}

impl AppConfig {
    /// Reads `SERVER_HOST`, `SERVER_PORT` and `SORT_HISTORIES_BY_DATE`,
    /// keeping the default for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            sort_histories_by_date: std::env::var("SORT_HISTORIES_BY_DATE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(defaults.sort_histories_by_date),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions {
            sort_by_date: self.sort_histories_by_date,
        }
    }
}
