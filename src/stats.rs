use crate::formats::{CatalogStats, CategoryRecord, ToolRecord};

/// Landing-page counts. The category count is rounded down to a multiple of
/// ten so the page can say "over N categories".
pub fn catalog_stats(tools: &[ToolRecord], categories: &[CategoryRecord]) -> CatalogStats {
    CatalogStats {
        tools: tools.len(),
        categories: categories.len() / 10 * 10,
    }
}
