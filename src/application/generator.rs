// Synthetic campaign data generator - pure functions over a profile and a random source
use crate::application::random_source::RandomSource;
use crate::domain::campaign::{
    AggregateMetrics, ConversionSource, DevicePerformance, RevenueDataPoint, clamp_to,
};
use crate::domain::profile::{BaseProfile, MONTH_LABELS, MetricBaseline};

/// Spacing between the timestamps of generated history points
const HISTORY_STEP_MS: i64 = 1000;

/// Perturb `value` by up to `max_variation` in either direction and round
pub fn perturb(value: f64, max_variation: f64, rng: &mut dyn RandomSource) -> f64 {
    let variation = 1.0 + (rng.next_unit() - 0.5) * 2.0 * max_variation;
    (value * variation).round()
}

fn users_for_revenue(revenue: f64, rng: &mut dyn RandomSource) -> f64 {
    (revenue * (0.04 + rng.next_unit() * 0.02)).round()
}

/// Twelve months of revenue with seasonality, +/-15% noise and a monthly growth trend.
/// Users land at 4-6% of revenue.
pub fn generate_revenue_series(
    profile: &BaseProfile,
    rng: &mut dyn RandomSource,
    now_ms: i64,
) -> Vec<RevenueDataPoint> {
    MONTH_LABELS
        .iter()
        .zip(profile.seasonal_multipliers.iter())
        .enumerate()
        .map(|(index, (month, seasonal))| {
            let variation = 0.85 + rng.next_unit() * 0.3;
            let growth_trend = 1.0 + index as f64 * profile.monthly_growth;

            let revenue = (profile.base_revenue * seasonal * variation * growth_trend).round();
            let users = users_for_revenue(revenue, rng);

            RevenueDataPoint::new(
                month.to_string(),
                revenue as u64,
                users as u64,
                now_ms + index as i64 * HISTORY_STEP_MS,
            )
        })
        .collect()
}

/// Next live point: revenue drifts from the latest one, users are re-derived
/// from the new revenue so they stay at 4-6% of it
pub fn next_revenue_point(
    last: &RevenueDataPoint,
    rng: &mut dyn RandomSource,
    now_ms: i64,
) -> RevenueDataPoint {
    let revenue = (last.revenue as f64 * (0.98 + rng.next_unit() * 0.04)).round();
    let users = users_for_revenue(revenue, rng);
    let label = format!("T{}", (now_ms / 1000).rem_euclid(100));

    RevenueDataPoint::new(label, revenue as u64, users as u64, now_ms)
}

pub fn generate_conversions(
    profile: &BaseProfile,
    rng: &mut dyn RandomSource,
) -> Vec<ConversionSource> {
    profile
        .channels
        .iter()
        .map(|channel| {
            let value = perturb(channel.base_value, channel.volatility, rng).max(1.0);
            let trend = (rng.next_unit() - 0.5) * 10.0;

            ConversionSource::new(channel.name.clone(), value as u32, channel.color.clone(), trend)
        })
        .collect()
}

pub fn generate_performance(
    profile: &BaseProfile,
    rng: &mut dyn RandomSource,
) -> Vec<DevicePerformance> {
    profile
        .devices
        .iter()
        .map(|device| {
            let variation = 0.9 + rng.next_unit() * 0.2;
            let current = DevicePerformance::clamp_score((device.base_performance * variation).round());
            let previous = DevicePerformance::clamp_score(current + (rng.next_unit() - 0.5) * 10.0);

            DevicePerformance::new(device.name.clone(), current, previous, device.target)
        })
        .collect()
}

pub fn generate_metrics(profile: &BaseProfile, rng: &mut dyn RandomSource) -> AggregateMetrics {
    let base: &MetricBaseline = &profile.metrics;

    AggregateMetrics {
        revenue: (base.revenue * (0.95 + rng.next_unit() * 0.1)).round() as u64,
        users: (base.users * (0.98 + rng.next_unit() * 0.04)).round() as u64,
        conversions: (base.conversions * (0.9 + rng.next_unit() * 0.2)).round() as u64,
        growth: clamp_to(
            base.growth + (rng.next_unit() - 0.5) * 4.0,
            &AggregateMetrics::GROWTH_RANGE,
        ),
        bounce_rate: clamp_to(
            base.bounce_rate + (rng.next_unit() - 0.5) * 6.0,
            &AggregateMetrics::BOUNCE_RATE_RANGE,
        ),
        avg_session_duration: clamp_to(
            base.avg_session_duration + (rng.next_unit() - 0.5) * 2.0,
            &AggregateMetrics::SESSION_DURATION_RANGE,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::revenue_series::RevenueSeries;
    use crate::infrastructure::random::{SequenceSource, StdRandomSource};

    #[test]
    fn test_revenue_at_midpoint_randomness() {
        let profile = BaseProfile::default();
        let mut rng = SequenceSource::constant(0.5);

        let series = generate_revenue_series(&profile, &mut rng, 1_000_000);
        assert_eq!(series.len(), 12);

        // 45000 * 0.8 * 1.0 * 1.0
        let january = &series[0];
        assert_eq!(january.month, "Jan");
        assert_eq!(january.revenue, 36000);
        assert_eq!(january.users, 1800);
        assert_eq!(january.timestamp_ms, 1_000_000);

        // 45000 * 1.5 * 1.0 * 1.33
        let december = &series[11];
        assert_eq!(december.month, "Dec");
        assert_eq!(december.revenue, 89775);
        assert_eq!(december.timestamp_ms, 1_011_000);
    }

    #[test]
    fn test_revenue_noise_band_edges() {
        let profile = BaseProfile::default();

        let mut low = SequenceSource::constant(0.0);
        assert_eq!(generate_revenue_series(&profile, &mut low, 0)[0].revenue, 30600);

        let mut high = SequenceSource::constant(0.999_999);
        let high_revenue = generate_revenue_series(&profile, &mut high, 0)[0].revenue;
        assert!((41399..=41400).contains(&high_revenue));
    }

    #[test]
    fn test_users_stay_within_four_to_six_percent() {
        let profile = BaseProfile::default();
        let mut rng = StdRandomSource::seeded(42);

        for _ in 0..1_000 {
            for point in generate_revenue_series(&profile, &mut rng, 0) {
                let ratio = point.users as f64 / point.revenue as f64 * 100.0;
                assert!(
                    (3.99..=6.01).contains(&ratio),
                    "{} users for {} revenue",
                    point.users,
                    point.revenue
                );
            }
        }
    }

    #[test]
    fn test_live_points_keep_user_ratio_across_ticks() {
        let profile = BaseProfile::default();
        let mut rng = StdRandomSource::seeded(42);
        let history = generate_revenue_series(&profile, &mut rng, 0);
        let mut last = history[history.len() - 1].clone();

        for tick in 0..200 {
            let next = next_revenue_point(&last, &mut rng, (tick + 1) * 1000);
            let ratio = next.users as f64 / next.revenue as f64 * 100.0;
            assert!(
                (3.99..=6.01).contains(&ratio),
                "tick {}: {} users for {} revenue",
                tick,
                next.users,
                next.revenue
            );
            last = next;
        }
    }

    #[test]
    fn test_next_revenue_point_drifts_from_last() {
        let last = RevenueDataPoint::new("Dec".to_string(), 100_000, 5_000, 0);
        let mut rng = SequenceSource::new(vec![0.5, 0.0]);

        let next = next_revenue_point(&last, &mut rng, 1_234_567);
        assert_eq!(next.revenue, 100_000);
        assert_eq!(next.users, 4_000);
        assert_eq!(next.month, "T34");
        assert_eq!(next.timestamp_ms, 1_234_567);
    }

    #[test]
    fn test_appending_live_points_keeps_cap() {
        let profile = BaseProfile::default();
        let mut rng = StdRandomSource::seeded(3);
        let mut series = RevenueSeries::from_points(generate_revenue_series(&profile, &mut rng, 0), 12);
        let oldest = series.iter().next().cloned();

        let last = series.latest().cloned().unwrap();
        let evicted = series.push(next_revenue_point(&last, &mut rng, 20_000));

        assert_eq!(evicted, oldest);
        assert_eq!(series.len(), 12);
        assert_eq!(series.latest().map(|p| p.timestamp_ms), Some(20_000));
    }

    #[test]
    fn test_conversions_follow_channel_baselines() {
        let profile = BaseProfile::default();
        let mut rng = SequenceSource::constant(0.5);

        let conversions = generate_conversions(&profile, &mut rng);
        let values: Vec<u32> = conversions.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![45, 25, 15, 10, 5]);
        assert!(conversions.iter().all(|c| c.trend == 0.0));
        assert_eq!(conversions[0].name, "Google Ads");
        assert_eq!(conversions[4].color, "#4ade80");
    }

    #[test]
    fn test_conversion_value_never_below_one() {
        let mut profile = BaseProfile::default();
        profile.channels[4].base_value = 0.4;
        profile.channels[4].volatility = 1.0;
        let mut rng = SequenceSource::constant(0.0);

        let conversions = generate_conversions(&profile, &mut rng);
        assert_eq!(conversions[4].value, 1);
        assert_eq!(conversions[4].trend, -5.0);
    }

    #[test]
    fn test_performance_scores_stay_bounded() {
        let mut profile = BaseProfile::default();
        profile.devices[0].base_performance = 99.0;
        profile.devices[3].base_performance = 9.0;
        let mut rng = StdRandomSource::seeded(11);

        for _ in 0..10_000 {
            for device in generate_performance(&profile, &mut rng) {
                assert!(DevicePerformance::SCORE_RANGE.contains(&device.current));
                assert!(DevicePerformance::SCORE_RANGE.contains(&device.previous));
            }
        }
    }

    #[test]
    fn test_performance_at_midpoint_randomness() {
        let profile = BaseProfile::default();
        let mut rng = SequenceSource::constant(0.5);

        let performance = generate_performance(&profile, &mut rng);
        assert_eq!(performance[0].category, "Mobile Campaigns");
        assert_eq!(performance[0].current, 78.0);
        assert_eq!(performance[0].previous, 78.0);
        assert_eq!(performance[0].target, 85.0);
    }

    #[test]
    fn test_metrics_stay_within_ranges() {
        let profile = BaseProfile::default();
        let base = &profile.metrics;
        let mut rng = StdRandomSource::seeded(7);

        let revenue = (base.revenue * 0.95).round() as u64..=(base.revenue * 1.05).round() as u64;
        let users = (base.users * 0.98).round() as u64..=(base.users * 1.02).round() as u64;
        let conversions =
            (base.conversions * 0.9).round() as u64..=(base.conversions * 1.1).round() as u64;

        for _ in 0..10_000 {
            let metrics = generate_metrics(&profile, &mut rng);
            assert!(revenue.contains(&metrics.revenue));
            assert!(users.contains(&metrics.users));
            assert!(conversions.contains(&metrics.conversions));
            assert!(AggregateMetrics::GROWTH_RANGE.contains(&metrics.growth));
            assert!(AggregateMetrics::BOUNCE_RATE_RANGE.contains(&metrics.bounce_rate));
            assert!(AggregateMetrics::SESSION_DURATION_RANGE.contains(&metrics.avg_session_duration));
        }
    }

    #[test]
    fn test_metrics_clamp_extreme_baselines() {
        let mut profile = BaseProfile::default();
        profile.metrics.growth = 49.5;
        profile.metrics.bounce_rate = 18.0;
        profile.metrics.avg_session_duration = 9.0;
        let mut rng = SequenceSource::constant(0.99);

        let metrics = generate_metrics(&profile, &mut rng);
        assert_eq!(metrics.growth, 50.0);
        assert!(metrics.bounce_rate >= 20.0);
        assert_eq!(metrics.avg_session_duration, 8.0);
    }

    #[test]
    fn test_perturb() {
        let mut rng = SequenceSource::new(vec![0.0, 0.5, 0.75]);
        assert_eq!(perturb(100.0, 0.1, &mut rng), 90.0);
        assert_eq!(perturb(100.0, 0.1, &mut rng), 100.0);
        assert_eq!(perturb(100.0, 0.1, &mut rng), 105.0);
    }
}
