use percent_encoding::percent_decode_str;
use url::{Url, form_urlencoded};

use crate::sort::SortKey;

/// Sort and filter selection of the tools page, as carried in the page URL
/// (`?sort=cites&cats=SingleCell,Python`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort: Option<SortKey>,
    pub cats: Vec<String>,
}

impl ListQuery {
    /// Reads `sort` and `cats` from a query string (with or without the
    /// leading `?`). Unknown sort tokens are dropped. Repeated `cats`
    /// parameters, as sent by a multi-select form, accumulate.
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut out = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "sort" => match value.parse::<SortKey>() {
                    Ok(key) => out.sort = Some(key),
                    Err(err) => tracing::debug!(%err, "ignoring sort parameter"),
                },
                "cats" => out.cats.extend(split_categories(&value)),
                _ => {}
            }
        }
        out
    }

    pub fn from_url(url: &Url) -> Self {
        Self::parse(url.query().unwrap_or_default())
    }

    /// Name sort and a missing sort both give the alphabetical layout.
    pub fn is_alphabetical(&self) -> bool {
        self.sort.is_none_or(SortKey::is_alphabetical)
    }

    /// Changing the sort clears the category selection.
    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self {
            sort: Some(sort),
            cats: Vec::new(),
        }
    }

    /// Query string for this selection, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some(sort) = self.sort {
            parts.push(format!("sort={sort}"));
        }
        if !self.cats.is_empty() {
            let cats = self
                .cats
                .iter()
                .map(|cat| form_urlencoded::byte_serialize(cat.as_bytes()).collect::<String>())
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("cats={cats}"));
        }
        parts.join("&")
    }

    /// Link back to `page` with this selection, keeping an anchor if given.
    pub fn href(&self, page: &str, fragment: Option<&str>) -> String {
        let mut out = page.to_owned();
        let query = self.to_query_string();
        if !query.is_empty() {
            out.push('?');
            out.push_str(&query);
        }
        if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

pub fn split_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|cat| !cat.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Splits a page address such as `tools.html?sort=cites#Seurat` into the
/// selection and the fragment. Relative addresses are accepted; the fragment
/// is percent-decoded so `#Cell%20Ranger` names the `Cell Ranger` panel.
pub fn parse_page_address(address: &str) -> (ListQuery, Option<String>) {
    let (rest, fragment) = match address.split_once('#') {
        Some((rest, fragment)) if !fragment.is_empty() => (
            rest,
            Some(percent_decode_str(fragment).decode_utf8_lossy().into_owned()),
        ),
        Some((rest, _)) => (rest, None),
        None => (address, None),
    };
    let query = match rest.split_once('?') {
        Some((_, query)) => ListQuery::parse(query),
        None => ListQuery::default(),
    };
    (query, fragment)
}
