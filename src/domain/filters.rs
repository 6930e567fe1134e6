// Filter criteria domain model
//
// Filters are passed through to consumers for display. Applying them forces
// one engine step, but the generated data is never narrowed by them.
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub activity: String,
    pub date: String,
    pub time: String,
    pub ticket_type: String,
    pub start_time: String,
    pub end_time: String,
    pub attribute4: String,
    pub attribute5: String,
    pub unit_type: String,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            activity: "xxxx演唱会啦啦啦啦啦啦啦".to_string(),
            date: "2025-01-29".to_string(),
            time: "15:00".to_string(),
            ticket_type: String::new(),
            start_time: "15:00".to_string(),
            end_time: "23:59".to_string(),
            attribute4: String::new(),
            attribute5: String::new(),
            unit_type: String::new(),
        }
    }
}

impl Filters {
    /// Every field empty, as left by the reset action.
    pub fn cleared() -> Self {
        Self {
            activity: String::new(),
            date: String::new(),
            time: String::new(),
            ticket_type: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            attribute4: String::new(),
            attribute5: String::new(),
            unit_type: String::new(),
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::Activity => &mut self.activity,
            FilterField::Date => &mut self.date,
            FilterField::Time => &mut self.time,
            FilterField::TicketType => &mut self.ticket_type,
            FilterField::StartTime => &mut self.start_time,
            FilterField::EndTime => &mut self.end_time,
            FilterField::Attribute4 => &mut self.attribute4,
            FilterField::Attribute5 => &mut self.attribute5,
            FilterField::UnitType => &mut self.unit_type,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Activity,
    Date,
    Time,
    TicketType,
    StartTime,
    EndTime,
    Attribute4,
    Attribute5,
    UnitType,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown filter field: {0}")]
pub struct UnknownFilterField(pub String);

impl FromStr for FilterField {
    type Err = UnknownFilterField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "activity" => Ok(Self::Activity),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "ticket_type" => Ok(Self::TicketType),
            "start_time" => Ok(Self::StartTime),
            "end_time" => Ok(Self::EndTime),
            "attribute4" => Ok(Self::Attribute4),
            "attribute5" => Ok(Self::Attribute5),
            "unit_type" => Ok(Self::UnitType),
            _ => Err(UnknownFilterField(s.to_string())),
        }
    }
}
