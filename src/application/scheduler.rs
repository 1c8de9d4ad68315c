// Refresh scheduler - Periodic regeneration of each entity family while live mode is on
use crate::application::campaign_source::CampaignDataSource;
use crate::domain::campaign::{AggregateMetrics, ConversionSource, DevicePerformance, RevenueDataPoint};
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::revenue_series::RevenueSeries;
use chrono::Utc;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityFamily {
    Metrics,
    Conversions,
    Performance,
    Revenue,
}

impl EntityFamily {
    pub const ALL: [EntityFamily; 4] = [
        EntityFamily::Metrics,
        EntityFamily::Conversions,
        EntityFamily::Performance,
        EntityFamily::Revenue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityFamily::Metrics => "metrics",
            EntityFamily::Conversions => "conversions",
            EntityFamily::Performance => "performance",
            EntityFamily::Revenue => "revenue",
        }
    }
}

/// Refresh period per entity family
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshCadence {
    pub metrics: Duration,
    pub conversions: Duration,
    pub performance: Duration,
    pub revenue: Duration,
}

impl RefreshCadence {
    pub fn period(&self, family: EntityFamily) -> Duration {
        match family {
            EntityFamily::Metrics => self.metrics,
            EntityFamily::Conversions => self.conversions,
            EntityFamily::Performance => self.performance,
            EntityFamily::Revenue => self.revenue,
        }
    }
}

impl Default for RefreshCadence {
    fn default() -> Self {
        Self {
            metrics: Duration::from_secs(3),
            conversions: Duration::from_secs(8),
            performance: Duration::from_secs(12),
            revenue: Duration::from_secs(15),
        }
    }
}

/// Owned periodic trigger. Aborted on cancel and on drop.
struct TimerHandle {
    family: EntityFamily,
    task: JoinHandle<()>,
}

impl TimerHandle {
    fn cancel(&self) {
        tracing::debug!(family = self.family.as_str(), "Cancelling refresh timer");
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Default)]
struct Control {
    live_mode: bool,
    disposed: bool,
    /// Bumped on every live-mode change; ticks from an older epoch are discarded
    epoch: u64,
    timers: Vec<TimerHandle>,
}

enum SnapshotUpdate {
    Metrics(AggregateMetrics),
    Conversions(Vec<ConversionSource>),
    Performance(Vec<DevicePerformance>),
    RevenuePoint(RevenueDataPoint),
    RevenueSeries(Vec<RevenueDataPoint>),
}

impl SnapshotUpdate {
    fn apply(self, snapshot: &mut DashboardSnapshot) {
        match self {
            SnapshotUpdate::Metrics(metrics) => snapshot.metrics = metrics,
            SnapshotUpdate::Conversions(conversions) => snapshot.conversions = conversions,
            SnapshotUpdate::Performance(performance) => snapshot.performance = performance,
            SnapshotUpdate::RevenuePoint(point) => {
                snapshot.revenue.push(point);
            }
            SnapshotUpdate::RevenueSeries(points) => {
                let capacity = snapshot.revenue.capacity();
                snapshot.revenue = RevenueSeries::from_points(points, capacity);
            }
        }
    }
}

struct Shared {
    source: Arc<dyn CampaignDataSource>,
    cadence: RefreshCadence,
    control: Mutex<Control>,
    snapshot_tx: watch::Sender<DashboardSnapshot>,
    disposed_tx: watch::Sender<bool>,
}

impl Shared {
    fn lock_control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn refresh(&self, family: EntityFamily, epoch: u64) {
        let started = Instant::now();

        let result = match family {
            EntityFamily::Metrics => self.source.fetch_metrics().await.map(SnapshotUpdate::Metrics),
            EntityFamily::Conversions => self
                .source
                .fetch_conversions()
                .await
                .map(SnapshotUpdate::Conversions),
            EntityFamily::Performance => self
                .source
                .fetch_performance()
                .await
                .map(SnapshotUpdate::Performance),
            EntityFamily::Revenue => self.next_revenue_update().await,
        };

        match result {
            Ok(update) => {
                if self.publish(epoch, update) {
                    tracing::debug!(
                        family = family.as_str(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Published refresh"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    family = family.as_str(),
                    error = %e,
                    "Refresh failed, keeping previous snapshot"
                );
            }
        }
    }

    async fn next_revenue_update(&self) -> anyhow::Result<SnapshotUpdate> {
        let latest = self.snapshot_tx.borrow().revenue.latest().cloned();

        match latest {
            Some(last) => self
                .source
                .fetch_next_revenue_point(&last)
                .await
                .map(SnapshotUpdate::RevenuePoint),
            None => self
                .source
                .fetch_revenue_series()
                .await
                .map(SnapshotUpdate::RevenueSeries),
        }
    }

    /// Apply an update unless live mode changed since the tick started
    fn publish(&self, epoch: u64, update: SnapshotUpdate) -> bool {
        let control = self.lock_control();
        if control.disposed || !control.live_mode || control.epoch != epoch {
            return false;
        }

        self.snapshot_tx.send_modify(|snapshot| {
            update.apply(snapshot);
            snapshot.last_update = Utc::now();
        });
        true
    }
}

/// Owns the live-mode flag and one periodic task per entity family.
///
/// Consumers read [`RefreshScheduler::current_snapshot`] or hold a receiver from
/// [`RefreshScheduler::subscribe`]. Enabling live mode must happen inside a tokio runtime.
pub struct RefreshScheduler {
    shared: Arc<Shared>,
}

impl RefreshScheduler {
    /// Load an initial snapshot from `source`. Live mode starts off.
    pub async fn initialize(
        source: Arc<dyn CampaignDataSource>,
        cadence: RefreshCadence,
        max_revenue_points: usize,
    ) -> anyhow::Result<Self> {
        let (revenue, conversions, performance, metrics) = tokio::try_join!(
            source.fetch_revenue_series(),
            source.fetch_conversions(),
            source.fetch_performance(),
            source.fetch_metrics(),
        )?;

        let snapshot = DashboardSnapshot::new(
            RevenueSeries::from_points(revenue, max_revenue_points),
            conversions,
            performance,
            metrics,
            false,
            Utc::now(),
        );
        if snapshot.revenue.is_empty() {
            tracing::warn!("Initial revenue series is empty");
        }
        tracing::info!(
            revenue_points = snapshot.revenue.len(),
            channels = snapshot.conversions.len(),
            devices = snapshot.performance.len(),
            "Loaded initial snapshot"
        );

        let (snapshot_tx, _) = watch::channel(snapshot);
        let (disposed_tx, _) = watch::channel(false);

        Ok(Self {
            shared: Arc::new(Shared {
                source,
                cadence,
                control: Mutex::new(Control::default()),
                snapshot_tx,
                disposed_tx,
            }),
        })
    }

    pub fn current_snapshot(&self) -> DashboardSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    pub fn is_live(&self) -> bool {
        self.shared.lock_control().live_mode
    }

    /// Turn live mode on or off.
    ///
    /// Turning it on starts one periodic task per family, each firing immediately.
    /// Turning it off cancels every task before returning; no publish from a
    /// cancelled task can land afterwards. Ignored once disposed.
    pub fn set_live_mode(&self, enabled: bool) {
        let mut control = self.shared.lock_control();

        if control.disposed {
            if enabled {
                tracing::warn!("Ignoring live mode request on disposed scheduler");
            }
            return;
        }
        if control.live_mode == enabled {
            return;
        }

        control.live_mode = enabled;
        control.epoch += 1;
        for timer in control.timers.drain(..) {
            timer.cancel();
        }

        if enabled {
            let epoch = control.epoch;
            control.timers = EntityFamily::ALL
                .iter()
                .map(|&family| self.spawn_timer(family, epoch))
                .collect();
        }

        self.shared.snapshot_tx.send_modify(|snapshot| {
            snapshot.live_mode = enabled;
            snapshot.last_update = Utc::now();
        });

        tracing::info!(enabled, epoch = control.epoch, "Live mode changed");
    }

    /// Cancel every pending trigger and refuse further live-mode requests
    pub fn dispose(&self) {
        let mut control = self.shared.lock_control();
        if control.disposed {
            return;
        }

        control.disposed = true;
        control.epoch += 1;
        for timer in control.timers.drain(..) {
            timer.cancel();
        }

        if control.live_mode {
            control.live_mode = false;
            self.shared
                .snapshot_tx
                .send_modify(|snapshot| snapshot.live_mode = false);
        }
        self.shared.disposed_tx.send_replace(true);

        tracing::info!("Refresh scheduler disposed");
    }

    /// Resolves once the scheduler has been disposed
    pub fn disposed(&self) -> impl Future<Output = ()> + Send + use<> {
        let mut rx = self.shared.disposed_tx.subscribe();
        async move {
            let _ = rx.wait_for(|disposed| *disposed).await;
        }
    }

    fn spawn_timer(&self, family: EntityFamily, epoch: u64) -> TimerHandle {
        let shared = self.shared.clone();
        let period = shared.cadence.period(family).max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                shared.refresh(family, epoch).await;
            }
        });

        TimerHandle { family, task }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.dispose();
    }
}
