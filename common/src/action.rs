use std::fmt;
use std::str::FromStr;

use crate::error::GeoError;

/// What a converter does to the shared container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Remove,
    Output,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => f.write_str("add"),
            Action::Remove => f.write_str("remove"),
            Action::Output => f.write_str("output"),
        }
    }
}

impl FromStr for Action {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Action::Add),
            "remove" => Ok(Action::Remove),
            "output" => Ok(Action::Output),
            other => Err(GeoError::UnknownAction(other.to_string())),
        }
    }
}
