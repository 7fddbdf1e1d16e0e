use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::sort::SortKey;

/// `catalog.yaml`: where the data lives and how the tools page is sorted by
/// default. Every data entry is optional; `build` renders only what is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faqs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Default sort token for the tools page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl CatalogConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&yaml)
            .with_context(|| format!("parse config: {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for location in [
            &mut config.tools,
            &mut config.categories,
            &mut config.faqs,
            &mut config.platforms,
            &mut config.table,
        ]
        .into_iter()
        .flatten()
        {
            *location = resolve_location(base, location);
        }

        Ok(config)
    }

    pub fn sort_key(&self) -> anyhow::Result<Option<SortKey>> {
        self.sort
            .as_deref()
            .map(str::parse)
            .transpose()
            .context("config `sort`")
    }
}

/// URLs are kept as-is; relative paths resolve against the config directory.
fn resolve_location(base: &Path, location: &str) -> String {
    if let Ok(url) = Url::parse(location)
        && (url.scheme() == "http" || url.scheme() == "https")
    {
        return location.to_owned();
    }
    let path = Path::new(location);
    if path.is_absolute() {
        return location.to_owned();
    }
    base.join(path).to_string_lossy().to_string()
}
