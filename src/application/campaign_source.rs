// Data source trait for campaign metrics
use crate::domain::campaign::{AggregateMetrics, ConversionSource, DevicePerformance, RevenueDataPoint};
use async_trait::async_trait;

#[async_trait]
pub trait CampaignDataSource: Send + Sync {
    /// Fetch a full revenue history, oldest point first
    async fn fetch_revenue_series(&self) -> anyhow::Result<Vec<RevenueDataPoint>>;

    /// Fetch the point that follows `last` in a live series
    async fn fetch_next_revenue_point(
        &self,
        last: &RevenueDataPoint,
    ) -> anyhow::Result<RevenueDataPoint>;

    /// Fetch the per-channel conversion breakdown
    async fn fetch_conversions(&self) -> anyhow::Result<Vec<ConversionSource>>;

    /// Fetch device category performance
    async fn fetch_performance(&self) -> anyhow::Result<Vec<DevicePerformance>>;

    /// Fetch headline KPIs
    async fn fetch_metrics(&self) -> anyhow::Result<AggregateMetrics>;
}
