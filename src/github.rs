use std::fmt;
use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use chrono::{Datelike as _, NaiveDate, Utc};
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::formats::RepoStats;
use crate::sort::parse_date;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `owner/repo`, taken from the last two path segments of a code URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    pub fn from_code_url(code_url: &str) -> Option<Self> {
        let mut segments = code_url
            .trim()
            .trim_end_matches('/')
            .rsplit('/')
            .filter(|s| !s.is_empty());
        let repo = segments.next()?;
        let owner = segments.next()?;
        if owner.ends_with(':') {
            return None;
        }
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        Some(Self {
            owner: owner.to_owned(),
            repo: repo.to_owned(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Source of the numbers behind the stars/forks/last-commit badges.
#[async_trait]
pub trait BadgeSource: Send + Sync {
    async fn repo_stats(&self, slug: &RepoSlug) -> Result<RepoStats, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
    today: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    forks: u64,
    stargazers_count: u64,
    pushed_at: String,
}

impl GithubClient {
    pub fn new(api_base: &str, token: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("build github http client")?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_owned(),
            token: token.filter(|t| !t.trim().is_empty()),
            today: Utc::now().date_naive(),
        })
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn search_url(&self, slug: &RepoSlug) -> String {
        format!("{}/search/repositories?q=repo:{slug}", self.api_base)
    }

    async fn fetch(&self, slug: &RepoSlug) -> anyhow::Result<RepoStats> {
        let url = self.search_url(slug);
        let mut request = self
            .client
            .get(&url)
            .header(USER_AGENT, "toolcatalog/0.1")
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("GET {url} returned {status}");
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("parse repository search response")?;
        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("repository search returned no items"))?;

        let pushed = parse_date(&item.pushed_at)
            .ok_or_else(|| anyhow::anyhow!("unparseable pushed_at: {}", item.pushed_at))?;
        let (label, colour) = last_push(pushed, self.today);

        Ok(RepoStats {
            stars: item.stargazers_count,
            forks: item.forks,
            last_push_label: label,
            last_push_colour: colour.to_owned(),
        })
    }
}

#[async_trait]
impl BadgeSource for GithubClient {
    async fn repo_stats(&self, slug: &RepoSlug) -> Result<RepoStats, CatalogError> {
        self.fetch(slug)
            .await
            .map_err(|err| CatalogError::enrichment_unavailable(slug.to_string(), format!("{err:#}")))
    }
}

/// Recency label and badge colour for the last push.
pub fn last_push(pushed: NaiveDate, today: NaiveDate) -> (String, &'static str) {
    let diff_days = (today - pushed).num_days();

    let label = match diff_days {
        0 => Some("today"),
        1 => Some("yesterday"),
        d if d <= 7 => Some("this week"),
        _ => None,
    };
    let colour = match diff_days {
        d if d <= 7 => "bright-green",
        d if d <= 30 => "light-green",
        d if d < 183 => "citron",
        d if d < 365 => "yellow",
        d if d < 548 => "orange",
        _ => "red",
    };

    let label = match label {
        Some(label) => label.to_owned(),
        None => {
            let month = MONTHS[pushed.month0() as usize];
            if pushed.year() == today.year() {
                month.to_owned()
            } else {
                format!("{month} {}", pushed.year())
            }
        }
    };

    (label, colour)
}
