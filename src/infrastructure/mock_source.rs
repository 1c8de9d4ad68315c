// Mock campaign data source - generator output behind simulated fetch latency
use crate::application::campaign_source::CampaignDataSource;
use crate::application::generator;
use crate::application::random_source::RandomSource;
use crate::application::scheduler::EntityFamily;
use crate::domain::campaign::{AggregateMetrics, ConversionSource, DevicePerformance, RevenueDataPoint};
use crate::domain::profile::BaseProfile;
use crate::infrastructure::config::LatencySettings;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

pub struct MockCampaignSource {
    profile: BaseProfile,
    latency: LatencySettings,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl MockCampaignSource {
    pub fn new(profile: BaseProfile, latency: LatencySettings, rng: Box<dyn RandomSource>) -> Self {
        Self {
            profile,
            latency,
            rng: Mutex::new(rng),
        }
    }

    async fn simulate_latency(&self, family: EntityFamily) {
        let delay = self.latency.delay(family);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Run a generator step with exclusive access to the random source
    fn generate<T>(&self, f: impl FnOnce(&BaseProfile, &mut dyn RandomSource) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&self.profile, &mut **rng)
    }
}

#[async_trait]
impl CampaignDataSource for MockCampaignSource {
    async fn fetch_revenue_series(&self) -> Result<Vec<RevenueDataPoint>> {
        self.simulate_latency(EntityFamily::Revenue).await;
        let now_ms = chrono::Utc::now().timestamp_millis();
        Ok(self.generate(|profile, rng| generator::generate_revenue_series(profile, rng, now_ms)))
    }

    async fn fetch_next_revenue_point(&self, last: &RevenueDataPoint) -> Result<RevenueDataPoint> {
        self.simulate_latency(EntityFamily::Revenue).await;
        let now_ms = chrono::Utc::now().timestamp_millis();
        Ok(self.generate(|_, rng| generator::next_revenue_point(last, rng, now_ms)))
    }

    async fn fetch_conversions(&self) -> Result<Vec<ConversionSource>> {
        self.simulate_latency(EntityFamily::Conversions).await;
        Ok(self.generate(generator::generate_conversions))
    }

    async fn fetch_performance(&self) -> Result<Vec<DevicePerformance>> {
        self.simulate_latency(EntityFamily::Performance).await;
        Ok(self.generate(generator::generate_performance))
    }

    async fn fetch_metrics(&self) -> Result<AggregateMetrics> {
        self.simulate_latency(EntityFamily::Metrics).await;
        Ok(self.generate(generator::generate_metrics))
    }
}
