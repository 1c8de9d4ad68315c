// Campaign metric domain models
use serde::Serialize;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDataPoint {
    pub month: String,
    pub revenue: u64,
    pub users: u64,
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

impl RevenueDataPoint {
    pub fn new(month: String, revenue: u64, users: u64, timestamp_ms: i64) -> Self {
        Self {
            month,
            revenue,
            users,
            timestamp_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSource {
    #[serde(rename = "source")]
    pub name: String,
    pub value: u32,
    pub color: String,
    pub trend: f64,
}

impl ConversionSource {
    pub fn new(name: String, value: u32, color: String, trend: f64) -> Self {
        Self {
            name,
            value,
            color,
            trend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePerformance {
    pub category: String,
    pub current: f64,
    pub previous: f64,
    pub target: f64,
}

impl DevicePerformance {
    pub const SCORE_RANGE: RangeInclusive<f64> = 10.0..=100.0;

    pub fn new(category: String, current: f64, previous: f64, target: f64) -> Self {
        Self {
            category,
            current,
            previous,
            target,
        }
    }

    pub fn clamp_score(score: f64) -> f64 {
        score.clamp(*Self::SCORE_RANGE.start(), *Self::SCORE_RANGE.end())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateMetrics {
    pub revenue: u64,
    pub users: u64,
    pub conversions: u64,
    pub growth: f64,
    pub bounce_rate: f64,
    pub avg_session_duration: f64,
}

impl AggregateMetrics {
    pub const GROWTH_RANGE: RangeInclusive<f64> = 0.0..=50.0;
    pub const BOUNCE_RATE_RANGE: RangeInclusive<f64> = 20.0..=60.0;
    /// Minutes
    pub const SESSION_DURATION_RANGE: RangeInclusive<f64> = 2.0..=8.0;
}

/// Clamp a value into an inclusive range
pub fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.clamp(*range.start(), *range.end())
}
