use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::client::DEFAULT_API_BASE;
use crate::config::environment::{parse_var, ConfigError};

/// Cómo se resuelven fetches solapados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Cada fetch lleva un número de secuencia; se descartan las resoluciones
    /// más antiguas que la última ya aplicada.
    #[default]
    Sequenced,
    /// La última resolución en llegar gana, sin importar el orden de inicio.
    LastWriteWins,
}

impl FromStr for ResolutionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequenced" => Ok(ResolutionPolicy::Sequenced),
            "last-write-wins" | "lww" => Ok(ResolutionPolicy::LastWriteWins),
            other => Err(format!("expected sequenced or last-write-wins, got {}", other)),
        }
    }
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionPolicy::Sequenced => f.write_str("sequenced"),
            ResolutionPolicy::LastWriteWins => f.write_str("last-write-wins"),
        }
    }
}

/// Configuración del dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub poll_interval: Duration,
    /// Cero = sin debounce, cada cambio de búsqueda dispara un fetch
    pub search_debounce: Duration,
    pub resolution: ResolutionPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            poll_interval: Duration::from_secs(10),
            search_debounce: Duration::ZERO,
            resolution: ResolutionPolicy::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let poll_secs: Option<u64> = parse_var(&lookup, "DASHBOARD_POLL_INTERVAL_SECS")?;
        if poll_secs == Some(0) {
            return Err(ConfigError::Invalid {
                key: "DASHBOARD_POLL_INTERVAL_SECS",
                value: "0".to_string(),
                reason: "poll interval must be positive".to_string(),
            });
        }
        let debounce_ms: Option<u64> = parse_var(&lookup, "DASHBOARD_SEARCH_DEBOUNCE_MS")?;

        Ok(Self {
            api_base_url: lookup("FLEET_API_URL").unwrap_or(defaults.api_base_url),
            poll_interval: poll_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.poll_interval),
            search_debounce: debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            resolution: parse_var(&lookup, "DASHBOARD_RESOLUTION")?
                .unwrap_or(defaults.resolution),
        })
    }
}
