use crate::formats::ToolRecord;

/// Two side-by-side columns of the tools list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns<T> {
    pub first: Vec<T>,
    pub second: Vec<T>,
}

impl<T> Columns<T> {
    pub fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty()
    }
}

/// Half/half split by count: the first column takes `ceil(n / 2)` items and
/// the second column the rest, both in input order.
pub fn split_columns<T>(mut items: Vec<T>) -> Columns<T> {
    let half = items.len().div_ceil(2);
    let second = items.split_off(half);
    Columns {
        first: items,
        second,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBucket {
    /// Uppercased first character of the member names.
    pub letter: String,
    pub columns: Columns<ToolRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Numbered two-column list, used for every non-name sort.
    Columns(Columns<ToolRecord>),
    /// One heading plus two columns per first letter.
    Alphabetical(Vec<LetterBucket>),
}

impl Layout {
    pub fn columns(tools: Vec<ToolRecord>) -> Self {
        Self::Columns(split_columns(tools))
    }

    pub fn alphabetical(tools: Vec<ToolRecord>) -> Self {
        Self::Alphabetical(group_by_letter(tools))
    }

    /// Letters that have a bucket, in bucket order. Empty for column layout.
    pub fn jump_letters(&self) -> Vec<&str> {
        match self {
            Self::Columns(_) => Vec::new(),
            Self::Alphabetical(buckets) => buckets.iter().map(|b| b.letter.as_str()).collect(),
        }
    }

    pub fn tool_count(&self) -> usize {
        match self {
            Self::Columns(columns) => columns.len(),
            Self::Alphabetical(buckets) => buckets.iter().map(|b| b.columns.len()).sum(),
        }
    }

    /// All tools in display order: first column before second, bucket by
    /// bucket.
    pub fn tools(&self) -> Vec<&ToolRecord> {
        match self {
            Self::Columns(columns) => columns.first.iter().chain(&columns.second).collect(),
            Self::Alphabetical(buckets) => buckets
                .iter()
                .flat_map(|b| b.columns.first.iter().chain(&b.columns.second))
                .collect(),
        }
    }
}

pub fn first_letter(name: &str) -> String {
    match name.chars().next() {
        Some(ch) => ch.to_uppercase().collect(),
        None => "#".to_owned(),
    }
}

/// Groups tools by the uppercase first letter of their name. Buckets appear
/// in the order their first member is seen, and each bucket is split with
/// [`split_columns`].
pub fn group_by_letter(tools: Vec<ToolRecord>) -> Vec<LetterBucket> {
    let mut groups: Vec<(String, Vec<ToolRecord>)> = Vec::new();

    for tool in tools {
        let letter = first_letter(&tool.name);
        match groups.iter_mut().find(|(existing, _)| *existing == letter) {
            Some((_, members)) => members.push(tool),
            None => groups.push((letter, vec![tool])),
        }
    }

    groups
        .into_iter()
        .map(|(letter, members)| LetterBucket {
            letter,
            columns: split_columns(members),
        })
        .collect()
}
