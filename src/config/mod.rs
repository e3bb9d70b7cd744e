//! Configuration loading and management

use crate::core::{DealershipError, DealershipResult};
use crate::entities::OriginalStock;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Closed range of days an arrival estimate is sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalWindow {
    pub min: u32,
    pub max: u32,
}

impl ArrivalWindow {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }

    pub fn contains(&self, days: u32) -> bool {
        self.range().contains(&days)
    }
}

/// Arrival windows per factory of origin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalConfig {
    /// Window for units built in Germany
    pub germany: ArrivalWindow,
    /// Window for every other origin
    pub default: ArrivalWindow,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            germany: ArrivalWindow::new(38, 52),
            default: ArrivalWindow::new(90, 120),
        }
    }
}

impl ArrivalConfig {
    pub fn window_for(&self, origin: Option<OriginalStock>) -> ArrivalWindow {
        match origin {
            Some(OriginalStock::Germany) => self.germany,
            _ => self.default,
        }
    }
}

/// Order derivation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    /// Fail TransformToOrder with NotFound instead of falling back to the nil
    /// dealer id when `reserved_by` matches no dealer
    pub strict_dealer_resolution: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast channel capacity
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Complete configuration for the dealership core
///
/// Every section is optional in YAML and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DealershipConfig {
    pub arrival: ArrivalConfig,
    pub orders: OrdersConfig,
    pub events: EventsConfig,
    pub server: ServerConfig,
}

impl DealershipConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> DealershipResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> DealershipResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject inconsistent settings
    pub fn validate(&self) -> DealershipResult<()> {
        for (name, window) in [
            ("arrival.germany", self.arrival.germany),
            ("arrival.default", self.arrival.default),
        ] {
            if window.min > window.max {
                return Err(DealershipError::Config(format!(
                    "{name}: min ({}) is greater than max ({})",
                    window.min, window.max
                )));
            }
        }
        if self.events.capacity == 0 {
            return Err(DealershipError::Config(
                "events.capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
