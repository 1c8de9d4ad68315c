// Seed profile the generator perturbs around
use serde::Deserialize;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BaseProfile {
    pub base_revenue: f64,
    /// One multiplier per calendar month, holiday boost in Nov/Dec
    pub seasonal_multipliers: [f64; 12],
    /// Compounding growth applied per month index
    pub monthly_growth: f64,
    pub channels: Vec<ChannelBaseline>,
    pub devices: Vec<DeviceBaseline>,
    pub metrics: MetricBaseline,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChannelBaseline {
    pub name: String,
    pub base_value: f64,
    pub color: String,
    pub volatility: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DeviceBaseline {
    pub name: String,
    pub base_performance: f64,
    pub target: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MetricBaseline {
    pub revenue: f64,
    pub users: f64,
    pub conversions: f64,
    pub growth: f64,
    pub bounce_rate: f64,
    pub avg_session_duration: f64,
}

impl ChannelBaseline {
    fn new(name: &str, base_value: f64, color: &str, volatility: f64) -> Self {
        Self {
            name: name.to_string(),
            base_value,
            color: color.to_string(),
            volatility,
        }
    }
}

impl DeviceBaseline {
    fn new(name: &str, base_performance: f64, target: f64) -> Self {
        Self {
            name: name.to_string(),
            base_performance,
            target,
        }
    }
}

impl Default for BaseProfile {
    fn default() -> Self {
        Self {
            base_revenue: 45000.0,
            seasonal_multipliers: [0.8, 0.85, 0.9, 1.0, 1.1, 1.2, 1.3, 1.25, 1.15, 1.05, 1.4, 1.5],
            monthly_growth: 0.03,
            channels: vec![
                ChannelBaseline::new("Google Ads", 45.0, "#667eea", 0.1),
                ChannelBaseline::new("Facebook Ads", 25.0, "#764ba2", 0.2),
                ChannelBaseline::new("Email Marketing", 15.0, "#f093fb", 0.15),
                ChannelBaseline::new("LinkedIn Ads", 10.0, "#f5576c", 0.05),
                ChannelBaseline::new("Organic & Referrals", 5.0, "#4ade80", 0.3),
            ],
            devices: vec![
                DeviceBaseline::new("Mobile Campaigns", 78.0, 85.0),
                DeviceBaseline::new("Desktop Campaigns", 85.0, 90.0),
                DeviceBaseline::new("Tablet Campaigns", 72.0, 80.0),
                DeviceBaseline::new("Smart TV Ads", 45.0, 60.0),
            ],
            metrics: MetricBaseline::default(),
        }
    }
}

impl Default for MetricBaseline {
    fn default() -> Self {
        Self {
            revenue: 847000.0,
            users: 42800.0,
            conversions: 3247.0,
            growth: 12.5,
            bounce_rate: 35.2,
            avg_session_duration: 4.3,
        }
    }
}
