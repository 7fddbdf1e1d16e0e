use crate::formats::ToolRecord;

/// Keeps the tools that carry at least one of the selected categories.
///
/// An empty selection means "no filter", not "match nothing".
pub fn filter_by_categories(tools: Vec<ToolRecord>, selected: &[String]) -> Vec<ToolRecord> {
    if selected.is_empty() {
        return tools;
    }

    tools
        .into_iter()
        .filter(|tool| selected.iter().any(|cat| tool.has_category(cat)))
        .collect()
}
