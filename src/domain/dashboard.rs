// Dashboard domain model
use super::campaign::{AggregateMetrics, ConversionSource, DevicePerformance};
use super::revenue_series::{RevenueSeries, RevenueTotals};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub revenue: RevenueSeries,
    pub conversions: Vec<ConversionSource>,
    pub performance: Vec<DevicePerformance>,
    pub metrics: AggregateMetrics,
    pub live_mode: bool,
    pub last_update: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn new(
        revenue: RevenueSeries,
        conversions: Vec<ConversionSource>,
        performance: Vec<DevicePerformance>,
        metrics: AggregateMetrics,
        live_mode: bool,
        last_update: DateTime<Utc>,
    ) -> Self {
        Self {
            revenue,
            conversions,
            performance,
            metrics,
            live_mode,
            last_update,
        }
    }

    pub fn totals(&self) -> RevenueTotals {
        self.revenue.totals()
    }
}
