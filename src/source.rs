use std::collections::HashSet;
use std::time::Duration;

use reqwest::header::{ACCEPT, CACHE_CONTROL, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::CatalogError;
use crate::formats::{CategoryRecord, FaqRecord, PlatformRecord, ToolRecord};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads a data file from disk, or over HTTP when `location` is an
/// `http`/`https` URL.
pub async fn load_text(location: &str) -> Result<String, CatalogError> {
    match Url::parse(location) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => fetch_text(&url).await,
        _ => tokio::fs::read_to_string(location)
            .await
            .map_err(|err| CatalogError::data_unavailable(location, err)),
    }
}

async fn fetch_text(url: &Url) -> Result<String, CatalogError> {
    let client = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|err| CatalogError::data_unavailable(url.as_str(), err))?;

    let response = client
        .get(url.clone())
        .header(USER_AGENT, "toolcatalog/0.1")
        .header(ACCEPT, "application/json,text/plain;q=0.9,*/*;q=0.8")
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(|err| CatalogError::data_unavailable(url.as_str(), format!("GET {url}: {err}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::data_unavailable(
            url.as_str(),
            format!("GET {url} returned {status}"),
        ));
    }

    response
        .text()
        .await
        .map_err(|err| CatalogError::data_unavailable(url.as_str(), err))
}

/// Loads a JSON array of records. A document that is not a JSON array is
/// `DataUnavailable`; an element that does not fit `T` is `MalformedRecord`.
pub async fn load_records<T: DeserializeOwned>(location: &str) -> Result<Vec<T>, CatalogError> {
    let text = load_text(location).await?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&text)
        .map_err(|err| CatalogError::data_unavailable(location, format!("parse json: {err}")))?;
    let records = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|err| CatalogError::malformed(index, err.to_string()))
        })
        .collect::<Result<Vec<T>, _>>()?;
    tracing::debug!(source = location, count = records.len(), "loaded records");
    Ok(records)
}

pub async fn load_tools(location: &str) -> Result<Vec<ToolRecord>, CatalogError> {
    let tools = load_records(location).await?;
    validate_tools(&tools)?;
    Ok(tools)
}

pub async fn load_categories(location: &str) -> Result<Vec<CategoryRecord>, CatalogError> {
    let categories = load_records(location).await?;
    validate_categories(&categories)?;
    Ok(categories)
}

pub async fn load_faqs(location: &str) -> Result<Vec<FaqRecord>, CatalogError> {
    let faqs = load_records(location).await?;
    validate_faqs(&faqs)?;
    Ok(faqs)
}

pub async fn load_platforms(location: &str) -> Result<Vec<PlatformRecord>, CatalogError> {
    let platforms = load_records(location).await?;
    validate_platforms(&platforms)?;
    Ok(platforms)
}

pub fn validate_tools(tools: &[ToolRecord]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for (index, tool) in tools.iter().enumerate() {
        if tool.name.trim().is_empty() {
            return Err(CatalogError::malformed(index, "tool name is empty"));
        }
        if tool.description.trim().is_empty() {
            return Err(CatalogError::malformed(
                index,
                format!("tool {} has an empty description", tool.name),
            ));
        }
        if tool.categories.is_empty() {
            return Err(CatalogError::malformed(
                index,
                format!("tool {} has no categories", tool.name),
            ));
        }
        if !seen.insert(tool.name.as_str()) {
            tracing::warn!(tool = %tool.name, "duplicate tool name; anchor links may mis-navigate");
        }
    }
    Ok(())
}

pub fn validate_categories(categories: &[CategoryRecord]) -> Result<(), CatalogError> {
    for (index, category) in categories.iter().enumerate() {
        if category.category.trim().is_empty() {
            return Err(CatalogError::malformed(index, "category name is empty"));
        }
        if category.tools.iter().any(|tool| tool.name.trim().is_empty()) {
            return Err(CatalogError::malformed(
                index,
                format!("category {} lists a tool without a name", category.category),
            ));
        }
    }
    Ok(())
}

pub fn validate_faqs(faqs: &[FaqRecord]) -> Result<(), CatalogError> {
    for (index, faq) in faqs.iter().enumerate() {
        if faq.id.trim().is_empty() {
            return Err(CatalogError::malformed(index, "faq id is empty"));
        }
    }
    Ok(())
}

pub fn validate_platforms(platforms: &[PlatformRecord]) -> Result<(), CatalogError> {
    match platforms.iter().position(|p| p.name.trim().is_empty()) {
        Some(index) => Err(CatalogError::malformed(index, "platform name is empty")),
        None => Ok(()),
    }
}
