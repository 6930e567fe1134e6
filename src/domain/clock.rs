// Virtual clock - Labels new buckets in auto or manual mode
use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;

/// How the clock moves on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceMode {
    /// Snap the cursor to wall-clock now.
    Auto,
    /// Move the cursor exactly one minute past its previous value.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockState {
    /// Real time of the most recent advance. Display only.
    pub last_real_update: DateTime<Local>,
    /// Timestamp that labels the next bucket.
    pub virtual_cursor: DateTime<Local>,
}

/// Tracks the cursor used to label new window buckets.
///
/// A manual step followed by an auto step can jump by more than one minute:
/// the wall clock wins in auto mode and nothing reconciles the gap.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    state: ClockState,
}

impl VirtualClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            state: ClockState {
                last_real_update: now,
                virtual_cursor: now,
            },
        }
    }

    /// Advance the cursor and return its new value.
    pub fn advance(&mut self, mode: AdvanceMode, now: DateTime<Local>) -> DateTime<Local> {
        let cursor = match mode {
            AdvanceMode::Auto => now,
            AdvanceMode::Manual => self.state.virtual_cursor + TimeDelta::minutes(1),
        };

        self.state = ClockState {
            last_real_update: now,
            virtual_cursor: cursor,
        };
        cursor
    }

    pub fn state(&self) -> ClockState {
        self.state
    }
}

/// Format a timestamp as the `HH:MM` bucket label.
pub fn minute_label(at: &DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 29, hour, minute, second).unwrap()
    }

    #[test]
    fn test_manual_advance_steps_from_cursor_not_now() {
        let mut clock = VirtualClock::new(at(15, 0, 0));

        let cursor = clock.advance(AdvanceMode::Manual, at(15, 42, 0));

        assert_eq!(cursor, at(15, 1, 0));
        assert_eq!(clock.state().last_real_update, at(15, 42, 0));
    }

    #[test]
    fn test_auto_advance_snaps_to_now() {
        let mut clock = VirtualClock::new(at(15, 0, 0));
        clock.advance(AdvanceMode::Manual, at(15, 0, 5));

        let cursor = clock.advance(AdvanceMode::Auto, at(15, 7, 12));

        assert_eq!(cursor, at(15, 7, 12));
        assert_eq!(minute_label(&cursor), "15:07");
    }

    #[test]
    fn test_minute_label_is_zero_padded() {
        assert_eq!(minute_label(&at(9, 5, 59)), "09:05");
    }
}
