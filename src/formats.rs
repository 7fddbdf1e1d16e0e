use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(rename = "Title")]
    pub title: String,
    /// DOI, or an arXiv identifier such as `arxiv/1234.5678`.
    #[serde(rename = "DOI")]
    pub doi: String,
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "Citations", default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<u64>,
}

impl Publication {
    pub fn is_arxiv(&self) -> bool {
        self.doi.contains("arxiv")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    #[serde(rename = "Tool")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "Code", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "GitHub", default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(rename = "Bioc", default, skip_serializing_if = "Option::is_none")]
    pub bioc: Option<String>,
    #[serde(rename = "CRAN", default, skip_serializing_if = "Option::is_none")]
    pub cran: Option<String>,
    #[serde(rename = "PyPI", default, skip_serializing_if = "Option::is_none")]
    pub pypi: Option<String>,
    #[serde(rename = "Categories")]
    pub categories: Vec<String>,
    #[serde(rename = "License", default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(rename = "Added", default)]
    pub added: String,
    #[serde(rename = "Updated", default)]
    pub updated: String,
    #[serde(rename = "Citations", default)]
    pub citations: u64,
    #[serde(rename = "Publications", default)]
    pub publications: Vec<Publication>,
    #[serde(rename = "Preprints", default)]
    pub preprints: Vec<Publication>,
}

impl ToolRecord {
    /// A record with only the required fields set.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        platform: impl Into<String>,
        categories: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            platform: platform.into(),
            code: None,
            github: None,
            bioc: None,
            cran: None,
            pypi: None,
            categories,
            license: None,
            added: String::new(),
            updated: String::new(),
            citations: 0,
            publications: Vec::new(),
            preprints: Vec::new(),
        }
    }

    pub fn publication_count(&self) -> usize {
        self.publications.len()
    }

    pub fn preprint_count(&self) -> usize {
        self.preprints.len()
    }

    pub fn total_refs(&self) -> usize {
        self.publication_count() + self.preprint_count()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryToolRef {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "BioC", default, skip_serializing_if = "Option::is_none")]
    pub bioc: Option<String>,
    #[serde(rename = "CRAN", default, skip_serializing_if = "Option::is_none")]
    pub cran: Option<String>,
    #[serde(rename = "PyPI", default, skip_serializing_if = "Option::is_none")]
    pub pypi: Option<String>,
    #[serde(rename = "Github", default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Tools", default)]
    pub tools: Vec<CategoryToolRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRecord {
    #[serde(rename = "Name")]
    pub name: String,
}

/// Repository numbers returned by the badge-enrichment lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub stars: u64,
    pub forks: u64,
    pub last_push_label: String,
    pub last_push_colour: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub tools: usize,
    /// Rounded down to the nearest ten, as shown on the landing page.
    pub categories: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_record_keeps_absent_and_empty_optionals_apart() {
        let json = r#"{
            "Tool": "Seurat",
            "Description": "R toolkit",
            "Platform": "R",
            "License": "",
            "Categories": ["SingleCell"],
            "Added": "2016-09-08",
            "Updated": "2020-01-01",
            "Citations": 500,
            "NumPubs": 1,
            "Publications": [{"Title": "Paper", "DOI": "10.1/x", "Date": "2015-04-13"}]
        }"#;

        let tool: ToolRecord = serde_json::from_str(json).unwrap();
        assert_eq!(tool.license.as_deref(), Some(""));
        assert_eq!(tool.code, None);
        assert_eq!(tool.bioc, None);
        assert_eq!(tool.publication_count(), 1);
        assert_eq!(tool.preprint_count(), 0);
        assert_eq!(tool.total_refs(), 1);
        assert_eq!(tool.publications[0].citations, None);
    }

    #[test]
    fn arxiv_detection_is_a_substring_match() {
        let arxiv = Publication {
            title: "T".to_owned(),
            doi: "arxiv/1234.5678".to_owned(),
            date: None,
            citations: None,
        };
        let doi = Publication {
            doi: "10.1101/2020.01.01".to_owned(),
            ..arxiv.clone()
        };
        assert!(arxiv.is_arxiv());
        assert!(!doi.is_arxiv());
    }
}
