use crate::application::scheduler::{EntityFamily, RefreshCadence};
use crate::domain::profile::BaseProfile;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Refresh cadence for {family} must be greater than zero")]
    ZeroCadence { family: &'static str },

    #[error("source.max_revenue_points must be greater than zero")]
    ZeroCapacity,

    #[error("Profile must define at least one {0}")]
    EmptyProfile(&'static str),

    #[error("Profile {0} is not a finite number in range")]
    InvalidBaseline(&'static str),

    #[error("Channel {channel}: {reason}")]
    InvalidChannel { channel: String, reason: &'static str },
}

/// Upper end of the conversion share scale
const MAX_CHANNEL_SHARE: f64 = 100.0;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub refresh: RefreshSettings,
    pub source: SourceSettings,
    pub profile: BaseProfile,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefreshSettings {
    pub metrics_ms: u64,
    pub conversions_ms: u64,
    pub performance_ms: u64,
    pub revenue_ms: u64,
    pub live_on_start: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceSettings {
    pub max_revenue_points: usize,
    /// Fixed seed for reproducible data; entropy when unset
    pub seed: Option<u64>,
    pub latency: LatencySettings,
}

/// Simulated fetch latency per entity family
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LatencySettings {
    pub revenue_ms: u64,
    pub conversions_ms: u64,
    pub performance_ms: u64,
    pub metrics_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            metrics_ms: 3000,
            conversions_ms: 8000,
            performance_ms: 12000,
            revenue_ms: 15000,
            live_on_start: true,
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            max_revenue_points: 12,
            seed: None,
            latency: LatencySettings::default(),
        }
    }
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            revenue_ms: 300,
            conversions_ms: 200,
            performance_ms: 250,
            metrics_ms: 150,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl RefreshSettings {
    pub fn cadence(&self) -> RefreshCadence {
        RefreshCadence {
            metrics: Duration::from_millis(self.metrics_ms),
            conversions: Duration::from_millis(self.conversions_ms),
            performance: Duration::from_millis(self.performance_ms),
            revenue: Duration::from_millis(self.revenue_ms),
        }
    }
}

impl LatencySettings {
    pub fn delay(&self, family: EntityFamily) -> Duration {
        let ms = match family {
            EntityFamily::Metrics => self.metrics_ms,
            EntityFamily::Conversions => self.conversions_ms,
            EntityFamily::Performance => self.performance_ms,
            EntityFamily::Revenue => self.revenue_ms,
        };
        Duration::from_millis(ms)
    }

    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            revenue_ms: 0,
            conversions_ms: 0,
            performance_ms: 0,
            metrics_ms: 0,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cadence = self.refresh.cadence();
        for family in EntityFamily::ALL {
            if cadence.period(family).is_zero() {
                return Err(ConfigError::ZeroCadence {
                    family: family.as_str(),
                });
            }
        }

        if self.source.max_revenue_points == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.profile.channels.is_empty() {
            return Err(ConfigError::EmptyProfile("channel"));
        }
        if self.profile.devices.is_empty() {
            return Err(ConfigError::EmptyProfile("device"));
        }

        validate_profile(&self.profile)
    }
}

fn positive(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidBaseline(field))
    }
}

fn non_negative(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidBaseline(field))
    }
}

fn validate_profile(profile: &BaseProfile) -> Result<(), ConfigError> {
    positive(profile.base_revenue, "base_revenue")?;
    for multiplier in profile.seasonal_multipliers {
        positive(multiplier, "seasonal_multipliers")?;
    }
    non_negative(profile.monthly_growth, "monthly_growth")?;

    for channel in &profile.channels {
        let invalid = |reason: &'static str| ConfigError::InvalidChannel {
            channel: channel.name.clone(),
            reason,
        };
        if !(0.0..=1.0).contains(&channel.volatility) {
            return Err(invalid("volatility must be within [0, 1]"));
        }
        if !channel.base_value.is_finite() || channel.base_value < 0.0 {
            return Err(invalid("base_value must be a non-negative finite number"));
        }
        if channel.base_value * (1.0 + channel.volatility) > MAX_CHANNEL_SHARE {
            return Err(invalid("base_value perturbed by volatility exceeds 100"));
        }
    }

    for device in &profile.devices {
        positive(device.base_performance, "devices.base_performance")?;
        positive(device.target, "devices.target")?;
    }

    let metrics = &profile.metrics;
    positive(metrics.revenue, "metrics.revenue")?;
    positive(metrics.users, "metrics.users")?;
    positive(metrics.conversions, "metrics.conversions")?;
    non_negative(metrics.growth, "metrics.growth")?;
    positive(metrics.bounce_rate, "metrics.bounce_rate")?;
    positive(metrics.avg_session_duration, "metrics.avg_session_duration")?;

    Ok(())
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__SECTION__KEY` variables
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        );

    build_app_config(builder)
}

fn build_app_config(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let app_config: AppConfig = builder.build()?.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}
