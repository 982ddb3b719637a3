//! Flag groups shared across subcommands.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;

use crate::pagination::{ListOptions, PaginationError, PaginationParams};

/// Pagination flags for list commands.
#[derive(Debug, Clone, Args)]
pub struct PaginationArgs {
    /// Pagination limit
    #[arg(short = 'l', long, default_value = "25")]
    pub limit: String,

    /// Sort direction
    #[arg(short = 'd', long = "sort-direction", default_value = "DESC")]
    pub sort_direction: String,

    /// Print all results without manually paging through them
    #[arg(long)]
    pub all: bool,

    /// Page through results manually, one keypress per page
    #[arg(long)]
    pub interactive: bool,
}

impl PaginationArgs {
    pub fn to_params(&self) -> Result<PaginationParams, PaginationError> {
        PaginationParams::from_flags(&self.limit, &self.sort_direction)
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            all: self.all,
            interactive: self.interactive,
        }
    }
}

/// Portfolio selector; empty falls back to the credentials' portfolio.
#[derive(Debug, Clone, Args)]
pub struct PortfolioArg {
    /// Portfolio ID. Uses the environment credentials if blank
    #[arg(long = "portfolio-id")]
    pub portfolio_id: Option<String>,
}

/// Entity selector; empty falls back to the credentials' entity.
#[derive(Debug, Clone, Args)]
pub struct EntityArg {
    /// Entity ID. Uses the environment credentials if blank
    #[arg(long = "entity-id")]
    pub entity_id: Option<String>,
}

/// Time-window filter flags.
#[derive(Debug, Clone, Args)]
pub struct DateRangeArgs {
    /// Start time in RFC3339 format
    #[arg(long)]
    pub start: Option<String>,

    /// End time in RFC3339 format
    #[arg(long)]
    pub end: Option<String>,
}

impl DateRangeArgs {
    pub fn parse(&self) -> anyhow::Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
        parse_date_range(self.start.as_deref(), self.end.as_deref())
    }
}

pub fn parse_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> anyhow::Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let start = parse_rfc3339(start).context("invalid start time")?;
    let end = parse_rfc3339(end).context("invalid end time")?;
    Ok((start, end))
}

fn parse_rfc3339(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    match raw {
        Some(raw) if !raw.is_empty() => Ok(Some(
            DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc),
        )),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: Option<&str>, end: Option<&str>) -> DateRangeArgs {
        DateRangeArgs {
            start: start.map(str::to_owned),
            end: end.map(str::to_owned),
        }
    }

    #[test]
    fn absent_bounds_parse_to_none() {
        let (start, end) = range(None, None).parse().unwrap();
        assert!(start.is_none());
        assert!(end.is_none());
    }

    #[test]
    fn rfc3339_bounds_parse() {
        let (start, end) = range(Some("2026-01-02T03:04:05Z"), Some("2026-02-02T00:00:00Z"))
            .parse()
            .unwrap();
        assert!(start.unwrap() < end.unwrap());
    }

    #[test]
    fn malformed_start_is_rejected() {
        let err = range(Some("yesterday"), None).parse().unwrap_err();
        assert!(err.to_string().contains("invalid start time"));
    }
}
