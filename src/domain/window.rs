// Sliding window domain model - Fixed number of per-minute buckets
use super::clock::minute_label;
use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u32,
}

impl CategoryCount {
    pub fn new(category: impl Into<String>, count: u32) -> Self {
        Self {
            category: category.into(),
            count,
        }
    }
}

/// Sales volume per category for one calendar minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    label: String,
    counts: Vec<CategoryCount>,
}

impl Bucket {
    pub fn new(at: &DateTime<Local>, counts: Vec<CategoryCount>) -> Self {
        Self {
            label: minute_label(at),
            counts,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn counts(&self) -> &[CategoryCount] {
        &self.counts
    }

    #[cfg(test)]
    pub fn count(&self, category: &str) -> Option<u32> {
        self.counts
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.count)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|c| c.count).sum()
    }
}

/// Oldest-first buckets, always holding exactly `capacity` entries once built.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    buckets: VecDeque<Bucket>,
    capacity: usize,
}

impl SlidingWindow {
    /// Fill the window with one bucket per minute, ending at the minute of
    /// `now`. `counts` is called once per bucket, oldest first.
    pub fn initialize<F>(capacity: usize, now: DateTime<Local>, mut counts: F) -> Self
    where
        F: FnMut() -> Vec<CategoryCount>,
    {
        assert!(capacity > 0, "sliding window capacity must be > 0");

        let buckets = (0..capacity)
            .rev()
            .map(|minutes_back| {
                let at = now - TimeDelta::minutes(minutes_back as i64);
                Bucket::new(&at, counts())
            })
            .collect::<VecDeque<_>>();

        Self { buckets, capacity }
    }

    /// Append `bucket` as the newest entry and return the evicted oldest one.
    pub fn push_and_evict(&mut self, bucket: Bucket) -> Option<Bucket> {
        let evicted = self.buckets.pop_front();
        self.buckets.push_back(bucket);
        debug_assert_eq!(self.buckets.len(), self.capacity);
        evicted
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    #[cfg(test)]
    pub fn newest(&self) -> Option<&Bucket> {
        self.buckets.back()
    }

    pub fn to_vec(&self) -> Vec<Bucket> {
        self.iter().cloned().collect()
    }
}
