// System wall clock - Local time from the operating system
use crate::application::wall_clock::WallClock;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
