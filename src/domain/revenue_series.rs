// Bounded revenue series, most recent point last
use super::campaign::RevenueDataPoint;
use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// Upfront allocation limit; larger series grow on demand
const MAX_PREALLOCATED_POINTS: usize = 64;

/// Share of users assumed to convert when estimating totals
const ESTIMATED_CONVERSION_RATE: f64 = 0.076;

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueSeries {
    points: VecDeque<RevenueDataPoint>,
    capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTotals {
    pub revenue: u64,
    pub users: u64,
    pub conversions: u64,
}

impl RevenueSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(MAX_PREALLOCATED_POINTS)),
            capacity,
        }
    }

    /// Build a series from generated points, keeping only the newest `capacity` of them
    pub fn from_points(points: Vec<RevenueDataPoint>, capacity: usize) -> Self {
        let mut series = Self::with_capacity(capacity);
        for point in points {
            series.push(point);
        }
        series
    }

    /// Append a point, evicting the oldest one when the series is full.
    /// Returns the evicted point, if any.
    pub fn push(&mut self, point: RevenueDataPoint) -> Option<RevenueDataPoint> {
        if self.capacity == 0 {
            return Some(point);
        }

        let evicted = if self.points.len() >= self.capacity {
            self.points.pop_front()
        } else {
            None
        };
        self.points.push_back(point);
        evicted
    }

    pub fn latest(&self) -> Option<&RevenueDataPoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &RevenueDataPoint> {
        self.points.iter()
    }

    pub fn totals(&self) -> RevenueTotals {
        let revenue = self.iter().map(|p| p.revenue).sum();
        let users: u64 = self.iter().map(|p| p.users).sum();
        let conversions = (users as f64 * ESTIMATED_CONVERSION_RATE).round() as u64;

        RevenueTotals {
            revenue,
            users,
            conversions,
        }
    }
}

impl Serialize for RevenueSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
