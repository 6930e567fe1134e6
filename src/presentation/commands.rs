// Operator commands read from the terminal
use crate::domain::filters::{FilterField, UnknownFilterField};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSwitch {
    On,
    Off,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Slide the window forward one minute.
    Step,
    /// Apply the filter draft, stepping to wall-clock now.
    Apply,
    Set { field: FilterField, value: String },
    Reset,
    Auto(AutoSwitch),
    Export,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{command} requires {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid argument for {command}: {value}")]
    InvalidArgument { command: &'static str, value: String },

    #[error(transparent)]
    Field(#[from] UnknownFilterField),
}

pub const HELP: &str = "\
commands:
  step                  simulate a 1-minute step
  refresh | apply       apply filters and refresh now
  set <field> <value>   edit a filter field (activity, date, time, ticket_type,
                        start_time, end_time, attribute4, attribute5, unit_type)
  reset                 clear all filter fields
  auto on|off|toggle    control auto refresh
  export                export the dashboard
  json                  print the latest snapshot as JSON
  quit                  exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "step" | "s" => Ok(Command::Step),
            "refresh" | "apply" | "r" => Ok(Command::Apply),
            "reset" => Ok(Command::Reset),
            "export" => Ok(Command::Export),
            "json" => Ok(Command::Json),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "auto" => match rest.to_ascii_lowercase().as_str() {
                "on" => Ok(Command::Auto(AutoSwitch::On)),
                "off" => Ok(Command::Auto(AutoSwitch::Off)),
                "" | "toggle" => Ok(Command::Auto(AutoSwitch::Toggle)),
                other => Err(CommandError::InvalidArgument {
                    command: "auto",
                    value: other.to_string(),
                }),
            },
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None if !rest.is_empty() => (rest, ""),
                    None => {
                        return Err(CommandError::MissingArgument {
                            command: "set",
                            argument: "a field name",
                        });
                    }
                };
                Ok(Command::Set {
                    field: field.parse()?,
                    value: value.to_string(),
                })
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
