use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};

use crate::formats::ToolRecord;

/// The `sort` query parameter of the tools page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SortKey {
    Name,
    Cites,
    Refs,
    Pubs,
    Pres,
    Added,
    Updated,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Cites => "cites",
            Self::Refs => "refs",
            Self::Pubs => "pubs",
            Self::Pres => "pres",
            Self::Added => "added",
            Self::Updated => "updated",
        }
    }

    /// Name sort lays the list out in letter buckets, everything else in two
    /// numbered columns.
    pub fn is_alphabetical(self) -> bool {
        self == Self::Name
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "name" => Ok(Self::Name),
            "cites" => Ok(Self::Cites),
            "refs" => Ok(Self::Refs),
            "pubs" => Ok(Self::Pubs),
            "pres" => Ok(Self::Pres),
            "added" => Ok(Self::Added),
            "updated" => Ok(Self::Updated),
            other => anyhow::bail!("unsupported sort key: {other}"),
        }
    }
}

/// Sorts in place. The sort is stable, so equal keys keep input order; with
/// no key the input is left untouched.
pub fn sort_tools(tools: &mut [ToolRecord], key: Option<SortKey>) {
    let Some(key) = key else {
        return;
    };

    match key {
        SortKey::Name => tools.sort_by_cached_key(|tool| tool.name.to_lowercase()),
        SortKey::Cites => tools.sort_by(|a, b| b.citations.cmp(&a.citations)),
        SortKey::Refs => tools.sort_by(|a, b| b.total_refs().cmp(&a.total_refs())),
        SortKey::Pubs => tools.sort_by(|a, b| b.publication_count().cmp(&a.publication_count())),
        SortKey::Pres => tools.sort_by(|a, b| b.preprint_count().cmp(&a.preprint_count())),
        SortKey::Added => tools.sort_by(|a, b| newest_first(&a.added, &b.added)),
        SortKey::Updated => tools.sort_by(|a, b| newest_first(&a.updated, &b.updated)),
    }
}

/// Returns a sorted copy of `tools`.
pub fn sorted(tools: &[ToolRecord], key: Option<SortKey>) -> Vec<ToolRecord> {
    let mut out = tools.to_vec();
    sort_tools(&mut out, key);
    out
}

fn newest_first(a: &str, b: &str) -> Ordering {
    // `None` orders below any date, so unparseable dates end up last.
    parse_date(b).cmp(&parse_date(a))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
