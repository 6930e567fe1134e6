// Console renderer - Text rendering of dashboard snapshots
use crate::application::snapshot_renderer::SnapshotRenderer;
use crate::domain::composition::total_share;
use crate::domain::snapshot::DashboardSnapshot;
use crate::domain::window::Bucket;
use crate::presentation::app_state::AppState;
use async_trait::async_trait;
use futures::StreamExt;
use std::fmt::Write;
use std::sync::Arc;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRenderer;

#[async_trait]
impl SnapshotRenderer for ConsoleRenderer {
    async fn render(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<()> {
        println!("{}", format_snapshot(snapshot));
        Ok(())
    }

    async fn render_countdown(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<()> {
        println!("{}", format_sync_status(snapshot));
        Ok(())
    }

    async fn notify(&self, message: &str) -> anyhow::Result<()> {
        println!("{}", message);
        Ok(())
    }
}

/// Re-render whenever a step lands or auto refresh flips. Countdown-only
/// changes are drawn when `render_on_tick` is set.
pub async fn run_render_loop(state: Arc<AppState>, render_on_tick: bool) {
    let mut updates = state.dashboard.updates();
    let mut last_seen: Option<(u64, bool)> = None;

    while let Some(snapshot) = updates.next().await {
        let key = (snapshot.sequence, snapshot.auto_refresh);
        let result = if last_seen != Some(key) {
            state.renderer.render(&snapshot).await
        } else if render_on_tick {
            state.renderer.render_countdown(&snapshot).await
        } else {
            continue;
        };
        last_seen = Some(key);

        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to render snapshot");
        }
    }
}

pub fn format_snapshot(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "==================== Live Sales Dashboard ====================");
    let _ = writeln!(
        out,
        "Last updated {}  |  {}",
        snapshot.last_real_update.format("%Y-%m-%d %H:%M:%S"),
        format_sync_status(snapshot)
    );

    let kpi = &snapshot.kpi;
    let _ = writeln!(out);
    let _ = writeln!(out, "Total sold      {:>20}", group_thousands(kpi.total_sold));
    let _ = writeln!(out, "Gross (HKD)     {:>20}", format_money(kpi.total_gross_revenue));
    let _ = writeln!(out, "Net (HKD)       {:>20}", format_money(kpi.total_net_revenue));

    let _ = writeln!(out);
    let _ = writeln!(out, "Sales composition");
    for slice in snapshot.composition.iter() {
        let _ = writeln!(out, "  {:<12} {:>6.1}%", slice.category, slice.share);
    }
    let _ = writeln!(out, "  {:<12} {:>6.1}%", "(total)", total_share(&snapshot.composition));

    let _ = writeln!(out);
    let _ = writeln!(out, "Last {} minutes", snapshot.window.len());
    out.push_str(&format_window(&snapshot.window));

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<22} {:<12} {:<17} {:>6} {:>8} {:>10} {:>10}",
        "Activity", "Ticket", "Date/Time", "Sold", "Pending", "Gross", "Net"
    );
    for row in snapshot.rows.iter() {
        let _ = writeln!(
            out,
            "{:<22} {:<12} {:<17} {:>6} {:>8} {:>10} {:>10}",
            row.activity_name,
            row.ticket_type,
            row.date_time,
            row.sold_count,
            row.pending_count,
            group_thousands(row.gross_revenue),
            group_thousands(row.net_revenue)
        );
    }

    let filters = &snapshot.applied_filters;
    let _ = writeln!(out);
    let _ = write!(
        out,
        "Filters: activity={:?} date={:?} time={:?} ticket_type={:?} range={:?}-{:?}",
        filters.activity,
        filters.date,
        filters.time,
        filters.ticket_type,
        filters.start_time,
        filters.end_time
    );

    out
}

pub fn format_sync_status(snapshot: &DashboardSnapshot) -> String {
    match snapshot.countdown {
        Some(seconds) if snapshot.auto_refresh => {
            format!("AUTO-SYNC ON  |  next update in {}s", seconds)
        }
        _ => "AUTO-SYNC OFF  |  paused".to_string(),
    }
}

/// One bar per bucket, scaled to the busiest minute in the window.
pub fn format_window(buckets: &[Bucket]) -> String {
    let peak = buckets.iter().map(Bucket::total).max().unwrap_or(0).max(1);
    let mut out = String::new();

    for bucket in buckets {
        let total = bucket.total();
        let filled = (total as usize * BAR_WIDTH).div_ceil(peak as usize);
        let breakdown = bucket
            .counts()
            .iter()
            .map(|c| format!("{} {}", c.category, c.count))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "  {} {:<width$} {:>5}  ({})",
            bucket.label(),
            "#".repeat(filled),
            total,
            breakdown,
            width = BAR_WIDTH
        );
    }

    out
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_money(value: f64) -> String {
    let cents = (value.max(0.0) * 100.0).round() as u64;
    format!("{}.{:02}", group_thousands(cents / 100), cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::composition::CompositionSlice;
    use crate::domain::detail::DetailRow;
    use crate::domain::filters::Filters;
    use crate::domain::kpi::KpiSnapshot;
    use crate::domain::window::CategoryCount;
    use chrono::{Local, TimeZone};

    fn snapshot(countdown: Option<u32>, auto_refresh: bool) -> DashboardSnapshot {
        let now = Local.with_ymd_and_hms(2025, 1, 29, 15, 0, 0).unwrap();
        DashboardSnapshot {
            sequence: 0,
            last_mode: None,
            last_real_update: now,
            virtual_cursor: now,
            auto_refresh,
            countdown,
            kpi: Arc::new(KpiSnapshot::BASELINE),
            composition: Vec::<CompositionSlice>::new().into(),
            window: vec![Bucket::new(&now, vec![CategoryCount::new("HK$1180", 120)])],
            rows: Vec::<DetailRow>::new().into(),
            applied_filters: Filters::default(),
            filter_draft: Filters::default(),
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(123_456), "123,456");
        assert_eq!(group_thousands(120_670_000), "120,670,000");
    }

    #[test]
    fn test_format_money_rounds_to_cents() {
        assert_eq!(format_money(100_450_000.0), "100,450,000.00");
        assert_eq!(format_money(1234.567), "1,234.57");
    }

    #[test]
    fn test_countdown_hidden_while_paused() {
        assert_eq!(
            format_sync_status(&snapshot(Some(42), true)),
            "AUTO-SYNC ON  |  next update in 42s"
        );
        assert_eq!(
            format_sync_status(&snapshot(None, false)),
            "AUTO-SYNC OFF  |  paused"
        );
    }

    #[test]
    fn test_format_snapshot_contains_kpis_and_window() {
        let text = format_snapshot(&snapshot(Some(60), true));

        assert!(text.contains("123,456"));
        assert!(text.contains("120,670,000.00"));
        assert!(text.contains("Last 1 minutes"));
        assert!(text.contains("15:00"));
        assert!(text.contains("HK$1180 120"));
    }

    #[test]
    fn test_window_bars_scale_to_peak() {
        let now = Local.with_ymd_and_hms(2025, 1, 29, 15, 0, 0).unwrap();
        let buckets = vec![
            Bucket::new(&now, vec![CategoryCount::new("HK$680", 50)]),
            Bucket::new(&now, vec![CategoryCount::new("HK$680", 100)]),
        ];

        let text = format_window(&buckets);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].matches('#').count(), BAR_WIDTH / 2);
        assert_eq!(lines[1].matches('#').count(), BAR_WIDTH);
    }
}
