/// Failures at the data and enrichment seams of the catalog.
///
/// Command handlers downgrade `DataUnavailable` to an empty list and
/// `EnrichmentUnavailable` to the sentinel badge text, logging either way.
/// `MalformedRecord` fails the command.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("data unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    #[error("enrichment unavailable for {repo}: {reason}")]
    EnrichmentUnavailable { repo: String, reason: String },

    #[error("malformed record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

impl CatalogError {
    pub fn data_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn enrichment_unavailable(repo: impl Into<String>, reason: impl ToString) -> Self {
        Self::EnrichmentUnavailable {
            repo: repo.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }
}
