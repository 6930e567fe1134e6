// Random aggregate source - Synthetic sales figures for one step
//
// Every function draws from the caller's generator and keeps no state, so a
// seeded generator reproduces the exact same dashboard.
use crate::domain::category::{OTHER_CATEGORY, TICKET_TYPES, WINDOW_CATEGORIES};
use crate::domain::composition::CompositionSlice;
use crate::domain::detail::DetailRow;
use crate::domain::kpi::KpiDelta;
use crate::domain::window::CategoryCount;
use rand::Rng;

/// `base + span * u` floored, for count ranges `[base, base + span)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CountRange {
    base: f64,
    span: f64,
}

const SEED_RANGES: [CountRange; 3] = [
    CountRange { base: 100.0, span: 300.0 },
    CountRange { base: 100.0, span: 200.0 },
    CountRange { base: 50.0, span: 150.0 },
];

const STEP_RANGES: [CountRange; 3] = [
    CountRange { base: 100.0, span: 400.0 },
    CountRange { base: 100.0, span: 300.0 },
    CountRange { base: 50.0, span: 200.0 },
];

const INCREMENT_CHANCE_THRESHOLD: f64 = 0.3;
const MAX_INCREMENT_EXCLUSIVE: f64 = 5.0;
const UNIT_PRICE_BASE: f64 = 500.0;
const UNIT_PRICE_SPAN: f64 = 680.0;

const HEADLINE_ACTIVITY: &str = "xxxx演唱会啦啦啦啦";
const DETAIL_DATE_TIME: &str = "2025/01/29 15:00";

fn uniform<R: Rng + ?Sized>(rng: &mut R, base: f64, span: f64) -> f64 {
    base + rng.r#gen::<f64>() * span
}

fn floored<R: Rng + ?Sized>(rng: &mut R, base: f64, span: f64) -> u64 {
    uniform(rng, base, span).floor() as u64
}

fn counts_in<R: Rng + ?Sized>(rng: &mut R, ranges: &[CountRange; 3]) -> Vec<CategoryCount> {
    WINDOW_CATEGORIES
        .iter()
        .zip(ranges)
        .map(|(category, range)| {
            CategoryCount::new(*category, floored(rng, range.base, range.span) as u32)
        })
        .collect()
}

/// Counts for a bucket created while pre-seeding the window.
pub fn seed_counts<R: Rng + ?Sized>(rng: &mut R) -> Vec<CategoryCount> {
    counts_in(rng, &SEED_RANGES)
}

/// Counts for the bucket appended by a step. Ranges run higher than the
/// seeded history.
pub fn step_counts<R: Rng + ?Sized>(rng: &mut R) -> Vec<CategoryCount> {
    counts_in(rng, &STEP_RANGES)
}

pub fn composition<R: Rng + ?Sized>(rng: &mut R) -> Vec<CompositionSlice> {
    vec![
        CompositionSlice::new(TICKET_TYPES[0], uniform(rng, 35.0, 5.0)),
        CompositionSlice::new(TICKET_TYPES[1], uniform(rng, 25.0, 5.0)),
        CompositionSlice::new(TICKET_TYPES[2], uniform(rng, 20.0, 5.0)),
        CompositionSlice::new(TICKET_TYPES[3], 15.0),
        CompositionSlice::new(OTHER_CATEGORY, 5.0),
    ]
}

/// Draw the next KPI increment. `None` means nothing was sold this step.
pub fn kpi_delta<R: Rng + ?Sized>(rng: &mut R) -> Option<KpiDelta> {
    let units = if rng.r#gen::<f64>() > INCREMENT_CHANCE_THRESHOLD {
        floored(rng, 0.0, MAX_INCREMENT_EXCLUSIVE)
    } else {
        0
    };

    if units == 0 {
        return None;
    }

    let unit_price = uniform(rng, UNIT_PRICE_BASE, UNIT_PRICE_SPAN);
    KpiDelta::for_units(units, unit_price)
}

pub fn detail_rows<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<DetailRow> {
    (0..count)
        .map(|i| DetailRow {
            id: format!("row-{:016x}", rng.next_u64()),
            activity_name: if i == 0 {
                HEADLINE_ACTIVITY.to_string()
            } else {
                format!("Sample Event {}", i)
            },
            ticket_type: TICKET_TYPES[i % TICKET_TYPES.len()].to_string(),
            date_time: DETAIL_DATE_TIME.to_string(),
            sold_count: floored(rng, 200.0, 500.0) as u32,
            gross_revenue: floored(rng, 50_000.0, 100_000.0),
            net_revenue: floored(rng, 40_000.0, 85_000.0),
            pending_count: floored(rng, 0.0, 50.0) as u32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    // Every f64 draw comes out as 0.0.
    fn lowest() -> StepRng {
        StepRng::new(0, 0)
    }

    // Every f64 draw comes out just below 1.0.
    fn highest() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_seed_counts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let counts = seed_counts(&mut rng);
            assert_eq!(counts.len(), 3);
            assert!((100..400).contains(&counts[0].count));
            assert!((100..300).contains(&counts[1].count));
            assert!((50..200).contains(&counts[2].count));
        }
    }

    #[test]
    fn test_step_counts_use_wider_ranges() {
        let counts = step_counts(&mut highest());
        assert_eq!(counts[0].count, 499);
        assert_eq!(counts[1].count, 399);
        assert_eq!(counts[2].count, 249);

        let counts = step_counts(&mut lowest());
        assert_eq!(counts[0].count, 100);
        assert_eq!(counts[2].count, 50);
    }

    #[test]
    fn test_composition_is_not_normalized() {
        let slices = composition(&mut lowest());
        let names: Vec<&str> = slices.iter().map(|s| s.category.as_str()).collect();

        assert_eq!(names, vec!["HK$1180", "HK$680", "HK$380", "VIP Package", "Other"]);
        assert_eq!(crate::domain::composition::total_share(&slices), 100.0);

        let slices = composition(&mut highest());
        assert!(crate::domain::composition::total_share(&slices) > 100.0);
    }

    #[test]
    fn test_kpi_delta_none_below_threshold() {
        assert_eq!(kpi_delta(&mut lowest()), None);
    }

    #[test]
    fn test_kpi_delta_at_top_of_range() {
        let delta = kpi_delta(&mut highest()).unwrap();

        assert_eq!(delta.sold(), 4);
        assert!(delta.gross_revenue() > 4.0 * 1179.0);
        // 500 + u * 680 rounds up to exactly 1180 when u is the largest f64 below 1.
        assert!(delta.gross_revenue() <= 4.0 * 1180.0);
        assert!((delta.net_revenue() - delta.gross_revenue() * 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_detail_rows_layout() {
        let mut rng = StdRng::seed_from_u64(11);
        let rows = detail_rows(&mut rng, 15);

        assert_eq!(rows.len(), 15);
        assert_eq!(rows[0].activity_name, "xxxx演唱会啦啦啦啦");
        assert_eq!(rows[1].activity_name, "Sample Event 1");
        assert_eq!(rows[4].ticket_type, "HK$1180");
        assert_eq!(rows[3].ticket_type, "VIP Package");
        assert!(rows.iter().all(|r| r.date_time == "2025/01/29 15:00"));
        assert!(rows.iter().all(|r| (200..700).contains(&r.sold_count)));
        assert!(rows.iter().all(|r| r.pending_count < 50));
        assert_ne!(rows[0].id, rows[1].id);
    }
}
