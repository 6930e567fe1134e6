// Wall clock trait - Source of real time for the engine
use chrono::{DateTime, Local};

pub trait WallClock: Send + Sync {
    /// Current real time.
    fn now(&self) -> DateTime<Local>;
}

#[cfg(test)]
pub mod testing {
    use super::WallClock;
    use chrono::{DateTime, Local, TimeDelta, TimeZone};
    use std::sync::Mutex;

    /// Wall clock that only moves when told to.
    #[derive(Debug)]
    pub struct ManualWallClock {
        now: Mutex<DateTime<Local>>,
    }

    impl ManualWallClock {
        pub fn at(hour: u32, minute: u32, second: u32) -> Self {
            let now = Local
                .with_ymd_and_hms(2025, 1, 29, hour, minute, second)
                .unwrap();
            Self {
                now: Mutex::new(now),
            }
        }

        pub fn set(&self, hour: u32, minute: u32, second: u32) {
            *self.now.lock().unwrap() = Local
                .with_ymd_and_hms(2025, 1, 29, hour, minute, second)
                .unwrap();
        }

        pub fn advance(&self, delta: TimeDelta) {
            let mut now = self.now.lock().unwrap();
            *now += delta;
        }
    }

    impl WallClock for ManualWallClock {
        fn now(&self) -> DateTime<Local> {
            *self.now.lock().unwrap()
        }
    }
}
