// KPI domain model - Monotonic running totals
use serde::Serialize;
use std::sync::Arc;

/// Fraction of every gross revenue increment booked as net revenue.
pub const NET_REVENUE_RATIO: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub total_sold: u64,
    pub total_gross_revenue: f64,
    pub total_net_revenue: f64,
}

impl KpiSnapshot {
    pub const BASELINE: KpiSnapshot = KpiSnapshot {
        total_sold: 123_456,
        total_gross_revenue: 120_670_000.0,
        total_net_revenue: 100_450_000.0,
    };

    fn with_delta(&self, delta: &KpiDelta) -> Self {
        Self {
            total_sold: self.total_sold + delta.sold(),
            total_gross_revenue: self.total_gross_revenue + delta.gross_revenue(),
            total_net_revenue: self.total_net_revenue + delta.net_revenue(),
        }
    }
}

/// A strictly positive increment to the running totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KpiDelta {
    sold: u64,
    gross_revenue: f64,
    net_revenue: f64,
}

impl KpiDelta {
    /// Build a delta for `units` tickets at `unit_price` each. Zero units
    /// yield no delta at all.
    pub fn for_units(units: u64, unit_price: f64) -> Option<Self> {
        if units == 0 {
            return None;
        }

        let gross_revenue = units as f64 * unit_price.max(0.0);
        Some(Self {
            sold: units,
            gross_revenue,
            net_revenue: gross_revenue * NET_REVENUE_RATIO,
        })
    }

    pub fn sold(&self) -> u64 {
        self.sold
    }

    pub fn gross_revenue(&self) -> f64 {
        self.gross_revenue
    }

    pub fn net_revenue(&self) -> f64 {
        self.net_revenue
    }
}

/// Whether an increment produced a new snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiChange {
    Unchanged,
    Updated,
}

/// Holds the running totals. The snapshot is shared behind an `Arc` that is
/// only replaced when the totals actually move, so consumers can detect
/// changes with `Arc::ptr_eq`.
#[derive(Debug, Clone)]
pub struct KpiAccumulator {
    current: Arc<KpiSnapshot>,
}

impl KpiAccumulator {
    pub fn initialize() -> Self {
        Self {
            current: Arc::new(KpiSnapshot::BASELINE),
        }
    }

    pub fn snapshot(&self) -> Arc<KpiSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn apply_increment(&mut self, delta: Option<KpiDelta>) -> KpiChange {
        let Some(delta) = delta else {
            return KpiChange::Unchanged;
        };

        let next = self.current.with_delta(&delta);
        debug_assert!(next.total_sold >= self.current.total_sold);
        debug_assert!(next.total_gross_revenue >= self.current.total_gross_revenue);
        debug_assert!(next.total_net_revenue >= self.current.total_net_revenue);
        debug_assert!(next.total_net_revenue <= next.total_gross_revenue);

        self.current = Arc::new(next);
        KpiChange::Updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_uses_baseline() {
        let kpi = KpiAccumulator::initialize();
        let snapshot = kpi.snapshot();

        assert_eq!(snapshot.total_sold, 123_456);
        assert_eq!(snapshot.total_gross_revenue, 120_670_000.0);
        assert_eq!(snapshot.total_net_revenue, 100_450_000.0);
    }

    #[test]
    fn test_zero_units_is_no_delta() {
        assert_eq!(KpiDelta::for_units(0, 900.0), None);
    }

    #[test]
    fn test_missing_delta_keeps_same_snapshot() {
        let mut kpi = KpiAccumulator::initialize();
        let before = kpi.snapshot();

        assert_eq!(kpi.apply_increment(None), KpiChange::Unchanged);

        let after = kpi.snapshot();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }

    #[test]
    fn test_net_is_fixed_fraction_of_gross() {
        let mut kpi = KpiAccumulator::initialize();
        let delta = KpiDelta::for_units(3, 1000.0).unwrap();

        assert_eq!(kpi.apply_increment(Some(delta)), KpiChange::Updated);

        let snapshot = kpi.snapshot();
        assert_eq!(snapshot.total_sold, 123_459);
        assert!((snapshot.total_gross_revenue - 120_673_000.0).abs() < 1e-6);
        assert!((snapshot.total_net_revenue - 100_452_550.0).abs() < 1e-6);
    }
}
