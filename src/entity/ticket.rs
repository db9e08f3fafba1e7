use anyhow::anyhow;
use std::fmt;
use std::str::FromStr;

/// Support ticket workflow: open, picked up, closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "OPEN",
            TicketStatus::InProgress => "IN_PROGRESS",
            TicketStatus::Closed => "CLOSED",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "OPEN" => Ok(TicketStatus::Open),
            "IN_PROGRESS" => Ok(TicketStatus::InProgress),
            "CLOSED" => Ok(TicketStatus::Closed),
            _ => Err(anyhow!("Unknown ticket status '{}'", s)),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_and_cli_spellings() {
        assert_eq!("IN_PROGRESS".parse::<TicketStatus>().unwrap(), TicketStatus::InProgress);
        assert_eq!("in-progress".parse::<TicketStatus>().unwrap(), TicketStatus::InProgress);
        assert_eq!("closed".parse::<TicketStatus>().unwrap(), TicketStatus::Closed);
        assert!("RESOLVED".parse::<TicketStatus>().is_err());
    }
}
