// Sales composition domain model
use serde::Serialize;

/// One slice of the composition chart.
///
/// Shares are illustrative and are not normalized, so a full snapshot
/// usually does not add up to exactly 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionSlice {
    pub category: String,
    pub share: f64,
}

impl CompositionSlice {
    pub fn new(category: impl Into<String>, share: f64) -> Self {
        Self {
            category: category.into(),
            share,
        }
    }
}

/// Sum of all shares in a snapshot.
pub fn total_share(slices: &[CompositionSlice]) -> f64 {
    slices.iter().map(|s| s.share).sum()
}
